//! Conversion form handlers
//!
//! This module handles the right-hand panel:
//! - Moving between form fields
//! - Editing a field value (buffered, confirmed with Enter)
//! - Submitting the conversion run

use super::helpers::{apply, collect_paste_batch, log_debug};
use crate::actions::AppAction;
use crate::client::run_conversion_background;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

/// Move to the next form field
pub fn handle_field_next(state: Arc<RwLock<AppState>>) {
    apply(state, AppAction::SelectNextField);
}

/// Move to the previous form field
pub fn handle_field_prev(state: Arc<RwLock<AppState>>) {
    apply(state, AppAction::SelectPrevField);
}

/// Start editing the active field
pub fn handle_start_edit(state: Arc<RwLock<AppState>>) {
    apply(state, AppAction::StartEditingField);
}

/// Handle keys while a field value is being typed
pub fn handle_field_input(key: KeyEvent, state: Arc<RwLock<AppState>>) {
    use crossterm::event::KeyModifiers;

    match key.code {
        KeyCode::Enter => {
            apply(state, AppAction::ConfirmFieldEdit);
        }
        KeyCode::Esc => {
            apply(state, AppAction::CancelFieldEdit);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceFieldBuffer);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToFieldBuffer(batch));
        }
        _ => {}
    }
}

/// Submit the conversion form. Ignored while a previous run is outstanding or
/// when no backend URL is configured.
pub fn handle_run(state: Arc<RwLock<AppState>>, base_url: Option<String>) {
    match base_url {
        Some(base_url) => run_conversion_background(state, base_url),
        None => log_debug("Cannot run conversion: backend URL not configured"),
    }
}
