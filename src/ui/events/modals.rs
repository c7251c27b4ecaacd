//! Modal event handlers
//!
//! This module handles keys while an overlay is on screen:
//! - Sample viewer (close, scroll)
//! - Backend URL input

use super::helpers::{apply, collect_paste_batch, log_debug};
use crate::actions::AppAction;
use crate::config::validate_url;
use crate::state::AppState;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Handle keys while the sample viewer is open. The viewer closes only from
/// here; nothing else (filtering, refreshes) dismisses it.
pub fn handle_sample_modal(key: KeyEvent, state: Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            apply(state, AppAction::CloseSample);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            apply(state, AppAction::ScrollSampleUp);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            apply(state, AppAction::ScrollSampleDown);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ScrollSampleUp);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ScrollSampleDown);
        }
        _ => {}
    }
}

/// Open the URL configuration modal prefilled with the current value
pub fn handle_url_dialog(state: Arc<RwLock<AppState>>, current: Option<String>) {
    apply(state, AppAction::EnterUrlInputMode { current });
}

/// Handle keys while the URL modal is open. Returns the submitted URL once it
/// validates.
pub fn handle_url_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<Option<String>> {
    match key.code {
        KeyCode::Enter => {
            let url = state.read().unwrap().ui.url_input.trim().to_string();
            match validate_url(&url) {
                Ok(()) => {
                    apply(state, AppAction::ExitUrlInputMode);
                    return Ok(Some(url));
                }
                Err(e) => {
                    log_debug(&format!("Rejected URL '{url}': {e}"));
                }
            }
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitUrlInputMode);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearUrlInput);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceUrlInput);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToUrlInput(batch));
        }
        _ => {}
    }
    Ok(None)
}
