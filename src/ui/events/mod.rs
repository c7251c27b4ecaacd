//! Event handling system for yamlcon-tui
//!
//! This module processes user input and translates it into state-changing
//! actions. It handles several input modes:
//! - Normal: navigation, row expansion, sample opening, run trigger
//! - Searching: filtering the catalog by query
//! - EnteringUrl: modal for configuring the backend URL
//! - EditingField: typing a conversion form field value
//!
//! While the sample viewer is open it captures all keys, so typing cannot leak
//! into the list underneath the overlay.
//!
//! # Architecture
//!
//! Input events generate AppActions that are applied to AppState via the
//! apply_action function in actions.rs; background completions arrive through
//! the same path.

mod form;
mod helpers;
mod modals;
mod navigation;
mod search;

// Re-export public items
pub use helpers::{apply, log_debug};

use crate::client::fetch_sample_background;
use crate::state::AppState;
use crate::types::{InputMode, LoadingState, PanelFocus, SampleViewer};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Event handler for managing user input and state updates
#[derive(Debug)]
pub struct EventHandler {
    pub should_quit: bool,
    pub selected_index: usize,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            selected_index: 0,
        }
    }

    /// Main event handling loop - dispatches to the handler for the current
    /// input mode. Returns whether a catalog fetch was requested and an
    /// optionally submitted backend URL.
    pub fn handle_events(
        &mut self,
        state: Arc<RwLock<AppState>>,
        list_state: &mut ListState,
        base_url: Option<String>,
    ) -> Result<(bool, Option<String>)> {
        let mut should_fetch = false;
        let mut url_submitted = None;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // The sample overlay owns the keyboard while it is open.
                let viewer_open = matches!(
                    state.read().unwrap().sample.viewer,
                    SampleViewer::Open { .. }
                );
                if viewer_open {
                    modals::handle_sample_modal(key, state);
                    return Ok((false, None));
                }

                let input_mode = state.read().unwrap().ui.input_mode.clone();

                match input_mode {
                    InputMode::EnteringUrl => {
                        url_submitted = modals::handle_url_input(key, state.clone())?;
                    }

                    InputMode::Searching => {
                        search::handle_search_input(
                            &mut self.selected_index,
                            key,
                            state.clone(),
                            list_state,
                        )?;
                    }

                    InputMode::EditingField => {
                        form::handle_field_input(key, state.clone());
                    }

                    InputMode::Normal => match key.code {
                        // QUIT
                        KeyCode::Char('q') => {
                            self.should_quit = true;
                        }

                        // search catalog
                        KeyCode::Char('/') => {
                            search::handle_search_activate(state.clone());
                        }

                        // panel focus
                        KeyCode::Tab | KeyCode::BackTab => {
                            navigation::handle_toggle_panel(state.clone());
                        }
                        KeyCode::Char('1') => {
                            apply(
                                state.clone(),
                                crate::actions::AppAction::NavigateToPanel(PanelFocus::Catalog),
                            );
                        }
                        KeyCode::Char('2') => {
                            apply(
                                state.clone(),
                                crate::actions::AppAction::NavigateToPanel(PanelFocus::Convert),
                            );
                        }

                        // config url
                        KeyCode::Char(',') => {
                            modals::handle_url_dialog(state.clone(), base_url.clone());
                        }

                        // manual catalog refresh
                        KeyCode::F(5) => {
                            should_fetch = true;
                        }

                        // ctrl + modifiers
                        // retry after a failed initial fetch
                        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            should_fetch = handle_retry(state.clone());
                        }

                        // Ctrl+l: Clear search filter
                        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            search::handle_search_clear(
                                &mut self.selected_index,
                                state.clone(),
                                list_state,
                            );
                        }

                        // run conversion
                        KeyCode::Char('r') => {
                            form::handle_run(state.clone(), base_url.clone());
                        }

                        // nav down
                        KeyCode::Char('j') | KeyCode::Down => {
                            // Bind the focus before dispatching so the read
                            // guard is released before handlers take locks.
                            let panel = state.read().unwrap().ui.panel_focus;
                            match panel {
                                PanelFocus::Catalog => navigation::handle_down(
                                    &mut self.selected_index,
                                    state.clone(),
                                    list_state,
                                ),
                                PanelFocus::Convert => form::handle_field_next(state.clone()),
                            }
                        }
                        // nav up
                        KeyCode::Char('k') | KeyCode::Up => {
                            let panel = state.read().unwrap().ui.panel_focus;
                            match panel {
                                PanelFocus::Catalog => navigation::handle_up(
                                    &mut self.selected_index,
                                    state.clone(),
                                    list_state,
                                ),
                                PanelFocus::Convert => form::handle_field_prev(state.clone()),
                            }
                        }

                        // toggle the selected row's expanded path display
                        KeyCode::Char('x') => {
                            let panel = state.read().unwrap().ui.panel_focus;
                            if panel == PanelFocus::Catalog {
                                navigation::handle_toggle_expanded(
                                    self.selected_index,
                                    state.clone(),
                                );
                            }
                        }

                        // open sample / edit field
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            let panel = state.read().unwrap().ui.panel_focus;
                            match panel {
                                PanelFocus::Catalog => {
                                    self.handle_open_sample(state.clone(), base_url.clone());
                                }
                                PanelFocus::Convert => {
                                    if key.code == KeyCode::Enter {
                                        form::handle_start_edit(state.clone());
                                    }
                                }
                            }
                        }

                        // edit field
                        KeyCode::Char('e') => {
                            let panel = state.read().unwrap().ui.panel_focus;
                            if panel == PanelFocus::Convert {
                                form::handle_start_edit(state.clone());
                            }
                        }

                        _ => {}
                    },
                }
            }
        }
        Ok((should_fetch, url_submitted))
    }

    /// Open the sample viewer for the selected row and kick off its fetch
    fn handle_open_sample(&self, state: Arc<RwLock<AppState>>, base_url: Option<String>) {
        let entry = {
            let state_read = state.read().unwrap();
            state_read.visible_entries().get(self.selected_index).cloned()
        };

        let Some(entry) = entry else {
            return;
        };

        match base_url {
            Some(base_url) => {
                log_debug(&format!("Sample for: {} {}", entry.method, entry.path));
                fetch_sample_background(state, base_url, entry);
            }
            None => log_debug("Cannot fetch sample: backend URL not configured"),
        }
    }
}

/// Handle retry after a failed fetch (Ctrl+R)
fn handle_retry(state: Arc<RwLock<AppState>>) -> bool {
    let is_error = matches!(
        state.read().unwrap().catalog.loading_state,
        LoadingState::Error(_)
    );

    if is_error {
        if let Ok(mut s) = state.write() {
            s.catalog.retry_count += 1;
        }
        return true; // Signal that we should fetch
    }
    false
}
