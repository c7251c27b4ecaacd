//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (title, backend URL, catalog status)
//! - Search bar
//! - Status line (conversion log)
//! - Footer (command help)
//! - Loading spinners and error/empty state messages

use crate::state::AppState;
use crate::types::{InputMode, LoadingState, PanelFocus, SampleViewer};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the application header with the backend URL and catalog status
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    base_url: &str,
    loading_state: &LoadingState,
    entry_count: usize,
) {
    let status_text = match loading_state {
        LoadingState::Idle => "Idle".to_string(),
        LoadingState::Fetching => {
            if entry_count > 0 {
                format!("{entry_count} operations | refreshing...")
            } else {
                "Fetching...".to_string()
            }
        }
        LoadingState::Complete => format!("{entry_count} operations loaded"),
        LoadingState::Error(_) => "Error".to_string(),
    };

    let header_text = format!("yamlcon tui - {base_url} [{status_text}]");

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the search bar with active filter indication
pub fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let is_active = matches!(state.ui.input_mode, InputMode::Searching);

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if !state.search.query.is_empty() {
        Style::default().fg(Color::Green) // Show filter is active
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Show match count if filtering
    let title = if !state.search.query.is_empty() {
        let count = state.search.filtered.len();
        let total = state.catalog.len();
        format!(" Search [{count}/{total}] ")
    } else {
        " Search (/) ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let search_text = if is_active {
        format!("{}_", state.search.query) // Show cursor
    } else {
        state.search.query.clone()
    };

    let paragraph = Paragraph::new(search_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Render the status line that reports conversion progress and outcomes
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, color) = if state.convert.in_flight {
        (state.convert.status.as_str(), Color::Yellow)
    } else if state.convert.status.is_empty() {
        ("-", Color::DarkGray)
    } else {
        (state.convert.status.as_str(), Color::Green)
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Log "));

    frame.render_widget(status, area);
}

/// Render the footer with command help for the current mode
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = if matches!(state.sample.viewer, SampleViewer::Open { .. }) {
        "Esc/q:Close  j/k/Ctrl+d/Ctrl+u:Scroll"
    } else {
        match state.ui.input_mode {
            InputMode::Searching => "Type to filter | Enter:Keep filter Esc:Clear Ctrl+L:Clear",
            InputMode::EnteringUrl => "Enter:Save Ctrl+L:Clear Esc:Cancel",
            InputMode::EditingField => "Type value | Enter:Confirm Esc:Cancel",
            InputMode::Normal => match state.ui.panel_focus {
                PanelFocus::Catalog => {
                    "Tab:Panel j/k:Nav Enter/Space:Sample x:Expand /:Search r:Run F5:Refresh ,:URL q:Quit"
                }
                PanelFocus::Convert => "Tab:Panel j/k:Field e/Enter:Edit r:Run ,:URL q:Quit",
            },
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render loading spinner animation
pub fn render_loading_spinner(frame: &mut Frame, area: Rect, spinner_index: usize) {
    let spinner = ["⠋", "⠙", "⠹", "⠸"];

    let loading_text = format!(
        "{} Fetching available paths\n\nPlease wait...",
        spinner[spinner_index]
    );

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("[1] Catalog"));

    frame.render_widget(loading, area);
}

/// Render error message with retry instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, error: &str, retry_count: u32) {
    let retry_text = if retry_count > 0 {
        format!("\n\nRetry attempt: {retry_count}")
    } else {
        String::new()
    };

    let error_msg = format!("❌ {error}{retry_text}\n\nPress [Ctrl+R] to retry\nPress [F5] to refresh");

    let error_widget = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title("[1] Catalog"));

    frame.render_widget(error_widget, area);
}

/// Render empty state message
pub fn render_empty_message(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No API operations found\n\nPress [F5] to refresh")
        .block(Block::default().borders(Borders::ALL).title("[1] Catalog"));

    frame.render_widget(empty, area);
}

/// Render no search results message
pub fn render_no_search_results(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No matching operations\n\nPress [Esc] or [Ctrl+L] to clear search")
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("[1] Search Results"),
        );

    frame.render_widget(empty, area);
}
