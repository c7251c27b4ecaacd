use crate::client;
use crate::config::Config;
use crate::state::AppState;
use crate::types::{InputMode, SampleViewer};
use crate::ui;
use crate::ui::draw;
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    list_state: ListState,
    base_url: Option<String>,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let mut list_state = ListState::default();
        list_state.select(None);

        let config = Config::load()?;
        let base_url = config.server.base_url.clone();

        let mut state = AppState::default();
        // Without a configured backend there is nothing to browse; start in
        // the URL modal.
        if base_url.is_none() {
            state.ui.input_mode = InputMode::EnteringUrl;
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            list_state,
            base_url,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            config,
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Initial catalog load
        self.refresh_catalog();

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            let state = Arc::clone(&self.state);
            let (should_fetch, url_submitted) = self.event_handler.handle_events(
                state,
                &mut self.list_state,
                self.base_url.clone(),
            )?;

            // If a URL was submitted, persist it and start fetching
            if let Some(url) = url_submitted {
                self.config.set_base_url(url.clone())?;
                self.base_url = Some(url);
                self.refresh_catalog();
            } else if should_fetch {
                self.refresh_catalog();
            }

            // A finished conversion requests a re-fetch through this flag,
            // exactly once per completion.
            let refresh_pending = {
                let mut s = self.state.write().unwrap();
                std::mem::take(&mut s.catalog.refresh_pending)
            };
            if refresh_pending {
                self.refresh_catalog();
            }
        }

        Ok(())
    }

    fn refresh_catalog(&self) {
        if let Some(url) = &self.base_url {
            client::refresh_catalog_background(Arc::clone(&self.state), url.clone());
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        // Check if we need to initialize selection (do this before acquiring lock)
        let should_select = self.list_state.selected().is_none();

        let state = self.state.read().unwrap();

        // Create main layout: Header, Search Bar, Body, Status, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[2]);

        let display_url = self.base_url.as_deref().unwrap_or("No URL configured");

        draw::render_header(
            frame,
            main_chunks[0],
            display_url,
            &state.catalog.loading_state,
            state.catalog.len(),
        );

        draw::render_search_bar(frame, main_chunks[1], &state);

        // Keep the selection inside the visible row set
        let visible_count = state.visible_entries().len();
        if should_select && visible_count > 0 {
            self.list_state.select(Some(0));
        }
        if visible_count > 0 && self.event_handler.selected_index >= visible_count {
            self.event_handler.selected_index = visible_count - 1;
            self.list_state.select(Some(self.event_handler.selected_index));
        }

        draw::render_catalog_panel(
            frame,
            body_chunks[0],
            &state,
            self.spinner_index,
            &mut self.list_state,
        );
        draw::render_convert_panel(frame, body_chunks[1], &state);

        draw::render_status_bar(frame, main_chunks[3], &state);
        draw::render_footer(frame, main_chunks[4], &state);

        // Render overlays LAST - after everything else
        if matches!(state.sample.viewer, SampleViewer::Open { .. }) {
            draw::render_sample_modal(frame, &state);
        }
        if state.ui.input_mode == InputMode::EnteringUrl {
            draw::render_url_input_modal(frame, &state);
        }
    }
}
