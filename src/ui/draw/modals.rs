//! Modal overlay rendering
//!
//! This module contains rendering functions for the two overlays:
//! - Sample viewer (generated sample response for one operation)
//! - Backend URL configuration

use crate::state::AppState;
use crate::types::{SampleContent, SampleViewer};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the sample viewer overlay. Shown on top of everything; the list and
/// the form keep rendering (and updating) underneath it.
pub fn render_sample_modal(frame: &mut Frame, state: &AppState) {
    let SampleViewer::Open {
        entry, content, ..
    } = &state.sample.viewer
    else {
        return;
    };

    let area = frame.area();

    let modal_width = (area.width as f32 * 0.8).min(100.0) as u16;
    let modal_height = (area.height as f32 * 0.7) as u16;
    let modal_area = centered(area, modal_width, modal_height);

    // Clear the background behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(format!(" Sample - {} {} ", entry.method, entry.path))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    match content {
        SampleContent::Generating => {
            let placeholder =
                Paragraph::new("Generating sample...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(placeholder, chunks[0]);
        }
        SampleContent::Ready(body) => {
            let body_widget = Paragraph::new(body.as_str())
                .wrap(Wrap { trim: false })
                .scroll((state.sample.scroll as u16, 0));
            frame.render_widget(body_widget, chunks[0]);
        }
    }

    let help = Paragraph::new("Esc: Close  |  j/k, Ctrl+d/u: Scroll")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}

/// Render the backend URL input modal
pub fn render_url_input_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.6).min(80.0) as u16;
    let modal_area = centered(area, modal_width, 7);

    // Clear the background behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Backend URL ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new("Base URL (e.g. http://localhost:5000):")
        .style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    let input = Paragraph::new(format!("{}_", state.ui.url_input)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    let help = Paragraph::new("Enter: Save  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
