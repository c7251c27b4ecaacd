//! Search handlers
//!
//! This module handles searching/filtering catalog entries:
//! - Activating search mode
//! - Handling search input (every keystroke refilters synchronously)
//! - Clearing search filters

use super::helpers::{apply, collect_paste_batch, log_debug};
use crate::actions::AppAction;
use crate::state::AppState;
use color_eyre::Result;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Activate search mode
pub fn handle_search_activate(state: Arc<RwLock<AppState>>) {
    apply(state, AppAction::EnterSearchMode);
}

/// Handle search input
pub fn handle_search_input(
    selected_index: &mut usize,
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) -> Result<()> {
    use crossterm::event::KeyModifiers;

    match key.code {
        KeyCode::Enter => {
            // Exit search mode and keep the filter active
            apply(state, AppAction::ExitSearchMode);
            log_debug("Exiting search mode (keeping filter)");
        }
        KeyCode::Esc => {
            // Exit search mode and clear the filter
            apply(state.clone(), AppAction::ClearSearchQuery);
            apply(state, AppAction::ExitSearchMode);
            log_debug("Exiting search mode (cleared filter)");

            *selected_index = 0;
            list_state.select(Some(0));
        }
        KeyCode::Backspace => {
            apply(state.clone(), AppAction::BackspaceSearchQuery);
            log_debug(&format!(
                "Search query: '{}'",
                state.read().unwrap().search.query
            ));

            // Reset selection to top
            *selected_index = 0;
            list_state.select(Some(0));
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl+L: Clear search (consistent with other inputs)
            apply(state, AppAction::ClearSearchQuery);
            log_debug("Cleared search query");

            *selected_index = 0;
            list_state.select(Some(0));
        }
        KeyCode::Char(c) => {
            let batch = collect_paste_batch(c);
            apply(state.clone(), AppAction::AppendToSearchQuery(batch));
            log_debug(&format!(
                "Search query: '{}'",
                state.read().unwrap().search.query
            ));

            // Reset selection to top when search changes
            *selected_index = 0;
            list_state.select(Some(0));
        }
        _ => {}
    }
    Ok(())
}

/// Clear search filter from normal mode (Ctrl+L)
pub fn handle_search_clear(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    let has_query = !state.read().unwrap().search.query.is_empty();
    if has_query {
        apply(state, AppAction::ClearSearchQuery);
        log_debug("Cleared search filter");

        *selected_index = 0;
        list_state.select(Some(0));
    }
}
