//! Main panel rendering
//!
//! This module contains rendering functions for the two main panels:
//! - Catalog panel (left side) - the filtered list of API operations
//! - Convert panel (right side) - the conversion form fields

use super::components::{
    render_empty_message, render_error_message, render_loading_spinner, render_no_search_results,
};
use super::styling;
use crate::state::AppState;
use crate::types::{FormField, InputMode, LoadingState, PanelFocus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use styling::get_method_color;

/// Render the left panel with the visible catalog rows.
///
/// The row set is rebuilt from scratch every frame from the current visible
/// snapshot; there is no diffing and no sorting.
pub fn render_catalog_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    match &state.catalog.loading_state {
        // The spinner replaces the list only when there is nothing to show
        // yet; a refresh of an existing catalog keeps the rows on screen.
        LoadingState::Fetching if state.catalog.is_empty() => {
            render_loading_spinner(frame, area, spinner_index);
        }
        LoadingState::Error(error) => {
            render_error_message(frame, area, error, state.catalog.retry_count);
        }
        _ => {
            if state.visible_entries().is_empty() {
                if !state.search.query.is_empty() {
                    render_no_search_results(frame, area);
                } else {
                    render_empty_message(frame, area);
                }
            } else {
                render_entry_list(frame, area, state, list_state);
            }
        }
    }
}

/// Render the right panel with the conversion form
pub fn render_convert_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let border_color = if state.ui.panel_focus == PanelFocus::Convert {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let title = if state.convert.in_flight {
        "[2] Convert (running...)"
    } else {
        "[2] Convert"
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::ALL {
        let is_active =
            state.ui.panel_focus == PanelFocus::Convert && state.convert.active_field == field;
        let is_editing = is_active && state.ui.input_mode == InputMode::EditingField;

        let marker = if is_active { ">" } else { " " };

        let label_style = if is_active {
            Style::default()
                .fg(styling::focused_border())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styling::default_fg())
        };

        let value_span = if is_editing {
            Span::styled(
                format!("{}_", state.convert.edit_buffer),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            let value = state.convert.form.value(field);
            if value.is_empty() {
                Span::styled("(empty)", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(value.to_string())
            }
        };

        lines.push(Line::from(vec![
            Span::raw(format!("{marker} ")),
            Span::styled(format!("{:14}", field.label()), label_style),
            value_span,
        ]));
    }

    lines.push(Line::raw(""));
    let run_hint = if state.convert.in_flight {
        Span::styled(
            "Conversion in progress...",
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled("Press [r] to run", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(run_hint));

    let form = Paragraph::new(lines).block(block);
    frame.render_widget(form, area);
}

/// Render the catalog rows, one item per entry in visible order. Expanded rows
/// get their full path wrapped onto extra indented lines.
fn render_entry_list(frame: &mut Frame, area: Rect, state: &AppState, list_state: &mut ListState) {
    // Borders, highlight symbol and the padded method column.
    let wrap_width = (area.width as usize).saturating_sub(14).max(8);

    let items: Vec<ListItem> = state
        .visible_entries()
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            let method_color = get_method_color(&entry.method);
            let method_span = Span::styled(
                format!("{:7}", entry.method),
                Style::default()
                    .fg(method_color)
                    .add_modifier(Modifier::BOLD),
            );

            if state.ui.expanded_rows.contains(&row) {
                let segments = wrap_path(&entry.path, wrap_width);
                let mut lines = Vec::with_capacity(segments.len() + 1);
                let mut segments = segments.into_iter();

                lines.push(Line::from(vec![
                    method_span,
                    Span::raw(" "),
                    Span::raw(segments.next().unwrap_or_default()),
                ]));
                for segment in segments {
                    lines.push(Line::from(vec![Span::raw("        "), Span::raw(segment)]));
                }

                ListItem::new(lines)
            } else {
                ListItem::new(Line::from(vec![
                    method_span,
                    Span::raw(" "),
                    Span::raw(entry.path.clone()),
                ]))
            }
        })
        .collect();

    let border_color = if state.ui.panel_focus == PanelFocus::Catalog {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("[1] Catalog ({})", state.visible_entries().len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}

/// Split a path into chunks of at most `width` characters so an expanded row
/// can show the whole path instead of a truncated one.
fn wrap_path(path: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = path.chars().collect();

    if chars.is_empty() {
        return vec![String::new()];
    }

    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_path_short_path_single_segment() {
        assert_eq!(wrap_path("/users", 40), vec!["/users".to_string()]);
    }

    #[test]
    fn test_wrap_path_splits_long_path() {
        let segments = wrap_path("/very/long/path/with/many/segments", 10);
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| s.chars().count() <= 10));
        assert_eq!(segments.join(""), "/very/long/path/with/many/segments");
    }

    #[test]
    fn test_wrap_path_empty() {
        assert_eq!(wrap_path("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wrap_path_zero_width_does_not_panic() {
        let segments = wrap_path("/a", 0);
        assert_eq!(segments.join(""), "/a");
    }
}
