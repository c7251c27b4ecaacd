//! Navigation handlers
//!
//! This module handles movement through the catalog list and panel focus.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::PanelFocus;
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Navigate up in the catalog list
pub fn handle_up(
    selected_index: &mut usize,
    _state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    if *selected_index > 0 {
        *selected_index -= 1;
        list_state.select(Some(*selected_index));
    }
}

/// Navigate down in the catalog list
pub fn handle_down(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    let max_index = {
        let state_guard = state.read().unwrap();
        state_guard.visible_entries().len().saturating_sub(1)
    };

    if *selected_index < max_index {
        *selected_index += 1;
        list_state.select(Some(*selected_index));
    }
}

/// Toggle the selected row's expanded path display. Only flips the row's
/// display state; the sample flow is untouched.
pub fn handle_toggle_expanded(selected_index: usize, state: Arc<RwLock<AppState>>) {
    let in_bounds = {
        let state_guard = state.read().unwrap();
        selected_index < state_guard.visible_entries().len()
    };

    if in_bounds {
        apply(state, AppAction::ToggleRowExpanded(selected_index));
    }
}

/// Switch focus between the catalog list and the conversion form
pub fn handle_toggle_panel(state: Arc<RwLock<AppState>>) {
    let next = match state.read().unwrap().ui.panel_focus {
        PanelFocus::Catalog => PanelFocus::Convert,
        PanelFocus::Convert => PanelFocus::Catalog,
    };
    apply(state, AppAction::NavigateToPanel(next));
}
