use crate::state::{AppState, STATUS_NO_MESSAGE, STATUS_TRANSPORT_FAILURE};
use crate::types::{
    ConvertOutcome, FormField, InputMode, LoadingState, PanelFocus, SampleContent, SampleViewer,
};

/// Represents all state-changing completions and UI transitions. Input handling
/// turns key events into actions; background tasks report their results as
/// actions. Keeping the mutations in `apply_action` makes the sequencing rules
/// (stale-token discard, refresh-once) testable without a terminal or a server.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Catalog lifecycle
    CatalogRefreshStarted,
    CatalogFetched(Vec<crate::types::ApiEntry>),
    CatalogFetchFailed(String),

    // Search
    EnterSearchMode,
    ExitSearchMode,
    AppendToSearchQuery(String),
    BackspaceSearchQuery,
    ClearSearchQuery,

    // Panels and rows
    NavigateToPanel(PanelFocus),
    ToggleRowExpanded(usize),

    // Sample viewer
    SampleArrived { token: u64, body: String },
    CloseSample,
    ScrollSampleUp,
    ScrollSampleDown,

    // Conversion form
    SelectNextField,
    SelectPrevField,
    StartEditingField,
    AppendToFieldBuffer(String),
    BackspaceFieldBuffer,
    ConfirmFieldEdit,
    CancelFieldEdit,
    ConversionFinished(ConvertOutcome),

    // URL modal
    EnterUrlInputMode { current: Option<String> },
    ExitUrlInputMode,
    AppendToUrlInput(String),
    BackspaceUrlInput,
    ClearUrlInput,
}

/// Apply an action to the application state. Pure state transformation; all
/// mutations triggered by events or task completions go through here.
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Catalog lifecycle
        AppAction::CatalogRefreshStarted => {
            state.catalog.loading_state = LoadingState::Fetching;
        }
        AppAction::CatalogFetched(entries) => {
            state.catalog.replace_all(entries);
            state.catalog.loading_state = LoadingState::Complete;
            state.catalog.retry_count = 0;
            // Re-project the current query onto the fresh snapshot so the rows
            // are never a mix of old and new entries.
            state.update_filtered_entries();
        }
        AppAction::CatalogFetchFailed(error) => {
            if state.catalog.is_empty() {
                state.catalog.loading_state = LoadingState::Error(error);
            } else {
                // A refresh of an already-shown catalog fails silently: the
                // previous entries stay rendered and no error text appears.
                state.catalog.loading_state = LoadingState::Complete;
            }
        }

        // Search
        AppAction::EnterSearchMode => {
            state.ui.input_mode = InputMode::Searching;
            state.search.query.clear();
            state.update_filtered_entries();
        }
        AppAction::ExitSearchMode => {
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::AppendToSearchQuery(text) => {
            state.search.query.push_str(&text);
            state.update_filtered_entries();
        }
        AppAction::BackspaceSearchQuery => {
            state.search.query.pop();
            state.update_filtered_entries();
        }
        AppAction::ClearSearchQuery => {
            state.search.query.clear();
            state.update_filtered_entries();
        }

        // Panels and rows
        AppAction::NavigateToPanel(panel) => {
            state.ui.panel_focus = panel;
        }
        AppAction::ToggleRowExpanded(row) => {
            if !state.ui.expanded_rows.remove(&row) {
                state.ui.expanded_rows.insert(row);
            }
        }

        // Sample viewer
        AppAction::SampleArrived { token, body } => {
            if let SampleViewer::Open {
                token: open_token,
                content,
                ..
            } = &mut state.sample.viewer
            {
                if *open_token == token {
                    *content = SampleContent::Ready(body);
                    state.sample.scroll = 0;
                }
                // A mismatched token means this response belongs to an earlier
                // open; it must never overwrite the current row's content.
            }
        }
        AppAction::CloseSample => {
            state.sample.viewer = SampleViewer::Closed;
            state.sample.scroll = 0;
        }
        AppAction::ScrollSampleUp => {
            state.sample.scroll = state.sample.scroll.saturating_sub(5);
        }
        AppAction::ScrollSampleDown => {
            state.sample.scroll = state.sample.scroll.saturating_add(5);
        }

        // Conversion form
        AppAction::SelectNextField => {
            state.convert.active_field = state.convert.active_field.next();
        }
        AppAction::SelectPrevField => {
            state.convert.active_field = state.convert.active_field.prev();
        }
        AppAction::StartEditingField => {
            state.convert.edit_buffer = state
                .convert
                .form
                .value(state.convert.active_field)
                .to_string();
            state.ui.input_mode = InputMode::EditingField;
        }
        AppAction::AppendToFieldBuffer(text) => {
            state.convert.edit_buffer.push_str(&text);
        }
        AppAction::BackspaceFieldBuffer => {
            state.convert.edit_buffer.pop();
        }
        AppAction::ConfirmFieldEdit => {
            let value = std::mem::take(&mut state.convert.edit_buffer);
            let field = state.convert.active_field;
            state.convert.form.set_value(field, value);
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::CancelFieldEdit => {
            state.convert.edit_buffer.clear();
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::ConversionFinished(outcome) => {
            state.convert.in_flight = false;
            state.convert.status = match outcome {
                ConvertOutcome::Reply(reply) => reply
                    .message
                    .or(reply.error)
                    .unwrap_or_else(|| STATUS_NO_MESSAGE.to_string()),
                ConvertOutcome::Transport => STATUS_TRANSPORT_FAILURE.to_string(),
            };
            // The catalog is re-fetched regardless of how the conversion went.
            state.catalog.refresh_pending = true;
        }

        // URL modal
        AppAction::EnterUrlInputMode { current } => {
            state.ui.input_mode = InputMode::EnteringUrl;
            state.ui.url_input = current.unwrap_or_default();
        }
        AppAction::ExitUrlInputMode => {
            state.ui.input_mode = InputMode::Normal;
            state.ui.url_input.clear();
        }
        AppAction::AppendToUrlInput(text) => {
            state.ui.url_input.push_str(&text);
        }
        AppAction::BackspaceUrlInput => {
            state.ui.url_input.pop();
        }
        AppAction::ClearUrlInput => {
            state.ui.url_input.clear();
        }
    }

    // Keep the active field list sane even if it cycled while editing.
    debug_assert!(FormField::ALL.contains(&state.convert.active_field));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiEntry, ConvertReply};

    fn entry(method: &str, path: &str) -> ApiEntry {
        ApiEntry {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    fn catalog() -> Vec<ApiEntry> {
        vec![entry("GET", "/a"), entry("POST", "/a/b"), entry("GET", "/c")]
    }

    #[test]
    fn test_catalog_fetched_replaces_wholesale() {
        let mut state = AppState::default();
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        assert_eq!(state.catalog.all().len(), 3);
        assert_eq!(state.catalog.loading_state, LoadingState::Complete);

        apply_action(
            AppAction::CatalogFetched(vec![entry("PUT", "/only")]),
            &mut state,
        );
        assert_eq!(state.catalog.all(), &[entry("PUT", "/only")]);
    }

    #[test]
    fn test_catalog_fetched_reapplies_active_filter() {
        let mut state = AppState::default();
        state.search.query = "a".to_string();
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);

        assert_eq!(
            state.visible_entries(),
            &[entry("GET", "/a"), entry("POST", "/a/b")]
        );
    }

    #[test]
    fn test_catalog_fetched_resets_row_expansion() {
        let mut state = AppState::default();
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        apply_action(AppAction::ToggleRowExpanded(0), &mut state);
        assert!(state.ui.expanded_rows.contains(&0));

        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        assert!(state.ui.expanded_rows.is_empty());
    }

    #[test]
    fn test_refresh_failure_keeps_previous_rows_silently() {
        let mut state = AppState::default();
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        apply_action(AppAction::CatalogRefreshStarted, &mut state);
        apply_action(
            AppAction::CatalogFetchFailed("connection refused".into()),
            &mut state,
        );

        assert_eq!(state.catalog.all().len(), 3);
        assert_eq!(state.catalog.loading_state, LoadingState::Complete);
        assert!(state.convert.status.is_empty());
    }

    #[test]
    fn test_initial_fetch_failure_shows_error_state() {
        let mut state = AppState::default();
        apply_action(AppAction::CatalogRefreshStarted, &mut state);
        apply_action(
            AppAction::CatalogFetchFailed("connection refused".into()),
            &mut state,
        );

        assert_eq!(
            state.catalog.loading_state,
            LoadingState::Error("connection refused".into())
        );
    }

    #[test]
    fn test_search_keystrokes_filter_synchronously() {
        let mut state = AppState::default();
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        apply_action(AppAction::EnterSearchMode, &mut state);
        apply_action(AppAction::AppendToSearchQuery("a".into()), &mut state);

        assert_eq!(state.visible_entries().len(), 2);

        apply_action(AppAction::BackspaceSearchQuery, &mut state);
        assert_eq!(state.visible_entries().len(), 3);
    }

    #[test]
    fn test_toggle_row_expanded_does_not_open_sample() {
        let mut state = AppState::default();
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        apply_action(AppAction::ToggleRowExpanded(1), &mut state);

        assert!(state.ui.expanded_rows.contains(&1));
        assert_eq!(state.sample.viewer, SampleViewer::Closed);

        apply_action(AppAction::ToggleRowExpanded(1), &mut state);
        assert!(state.ui.expanded_rows.is_empty());
    }

    #[test]
    fn test_sample_arrival_with_matching_token() {
        let mut state = AppState::default();
        let token = state.begin_sample(entry("GET", "/a"));
        apply_action(
            AppAction::SampleArrived {
                token,
                body: "{\n  \"id\": 1\n}".into(),
            },
            &mut state,
        );

        match &state.sample.viewer {
            SampleViewer::Open { content, .. } => {
                assert_eq!(*content, SampleContent::Ready("{\n  \"id\": 1\n}".into()));
            }
            SampleViewer::Closed => panic!("viewer should stay open"),
        }
    }

    #[test]
    fn test_stale_sample_response_is_discarded() {
        let mut state = AppState::default();
        let stale = state.begin_sample(entry("GET", "/a"));
        let current = state.begin_sample(entry("POST", "/a/b"));

        // The first request resolves after the second open.
        apply_action(
            AppAction::SampleArrived {
                token: stale,
                body: "stale body".into(),
            },
            &mut state,
        );

        match &state.sample.viewer {
            SampleViewer::Open {
                token,
                entry: open_entry,
                content,
            } => {
                assert_eq!(*token, current);
                assert_eq!(open_entry.path, "/a/b");
                assert_eq!(*content, SampleContent::Generating);
            }
            SampleViewer::Closed => panic!("viewer should stay open"),
        }

        apply_action(
            AppAction::SampleArrived {
                token: current,
                body: "fresh body".into(),
            },
            &mut state,
        );
        match &state.sample.viewer {
            SampleViewer::Open { content, .. } => {
                assert_eq!(*content, SampleContent::Ready("fresh body".into()));
            }
            SampleViewer::Closed => panic!("viewer should stay open"),
        }
    }

    #[test]
    fn test_sample_response_after_close_is_dropped() {
        let mut state = AppState::default();
        let token = state.begin_sample(entry("GET", "/a"));
        apply_action(AppAction::CloseSample, &mut state);
        apply_action(
            AppAction::SampleArrived {
                token,
                body: "late".into(),
            },
            &mut state,
        );
        assert_eq!(state.sample.viewer, SampleViewer::Closed);
    }

    #[test]
    fn test_refresh_does_not_close_sample_viewer() {
        let mut state = AppState::default();
        state.begin_sample(entry("GET", "/a"));
        apply_action(AppAction::CatalogFetched(catalog()), &mut state);
        assert!(matches!(state.sample.viewer, SampleViewer::Open { .. }));
    }

    #[test]
    fn test_conversion_success_sets_status_and_requests_one_refresh() {
        let mut state = AppState::default();
        state.convert.in_flight = true;
        apply_action(
            AppAction::ConversionFinished(ConvertOutcome::Reply(ConvertReply {
                message: Some("wrote 3 files".into()),
                error: None,
            })),
            &mut state,
        );

        assert_eq!(state.convert.status, "wrote 3 files");
        assert!(!state.convert.in_flight);
        assert!(state.catalog.refresh_pending);

        // The run loop consumes the flag; nothing re-arms it.
        state.catalog.refresh_pending = false;
        assert!(!state.catalog.refresh_pending);
    }

    #[test]
    fn test_conversion_error_surfaces_text_and_still_refreshes() {
        let mut state = AppState::default();
        state.convert.in_flight = true;
        apply_action(
            AppAction::ConversionFinished(ConvertOutcome::Reply(ConvertReply {
                message: None,
                error: Some("bad xml".into()),
            })),
            &mut state,
        );

        assert_eq!(state.convert.status, "bad xml");
        assert!(state.catalog.refresh_pending);
    }

    #[test]
    fn test_conversion_transport_failure_generic_text_and_refresh() {
        let mut state = AppState::default();
        state.convert.in_flight = true;
        apply_action(
            AppAction::ConversionFinished(ConvertOutcome::Transport),
            &mut state,
        );

        assert_eq!(state.convert.status, STATUS_TRANSPORT_FAILURE);
        assert!(state.catalog.refresh_pending);
    }

    #[test]
    fn test_conversion_reply_without_fields_gets_generic_text() {
        let mut state = AppState::default();
        apply_action(
            AppAction::ConversionFinished(ConvertOutcome::Reply(ConvertReply {
                message: None,
                error: None,
            })),
            &mut state,
        );
        assert_eq!(state.convert.status, STATUS_NO_MESSAGE);
    }

    #[test]
    fn test_field_edit_confirm_and_cancel() {
        let mut state = AppState::default();
        state.convert.active_field = FormField::Tag;
        apply_action(AppAction::StartEditingField, &mut state);
        assert_eq!(state.ui.input_mode, InputMode::EditingField);

        apply_action(AppAction::AppendToFieldBuffer("auto".into()), &mut state);
        apply_action(AppAction::ConfirmFieldEdit, &mut state);
        assert_eq!(state.convert.form.tag, "auto");
        assert_eq!(state.ui.input_mode, InputMode::Normal);

        apply_action(AppAction::StartEditingField, &mut state);
        assert_eq!(state.convert.edit_buffer, "auto");
        apply_action(AppAction::AppendToFieldBuffer("x".into()), &mut state);
        apply_action(AppAction::CancelFieldEdit, &mut state);
        assert_eq!(state.convert.form.tag, "auto");
    }

    #[test]
    fn test_url_modal_transitions() {
        let mut state = AppState::default();
        apply_action(
            AppAction::EnterUrlInputMode {
                current: Some("http://localhost:5000".into()),
            },
            &mut state,
        );
        assert_eq!(state.ui.input_mode, InputMode::EnteringUrl);
        assert_eq!(state.ui.url_input, "http://localhost:5000");

        apply_action(AppAction::BackspaceUrlInput, &mut state);
        apply_action(AppAction::AppendToUrlInput("1".into()), &mut state);
        assert_eq!(state.ui.url_input, "http://localhost:5001");

        apply_action(AppAction::ExitUrlInputMode, &mut state);
        assert_eq!(state.ui.input_mode, InputMode::Normal);
        assert!(state.ui.url_input.is_empty());
    }
}
