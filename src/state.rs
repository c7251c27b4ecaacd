use crate::types::{
    ApiEntry, ConversionRequest, ConvertForm, FormField, InputMode, LoadingState, PanelFocus,
    SampleContent, SampleViewer,
};
use std::collections::HashSet;

/// Status text shown while a conversion call is outstanding.
pub const STATUS_RUNNING: &str = "Running yamlcon conversion...";
/// Status text for a conversion whose request never produced a JSON reply.
pub const STATUS_TRANSPORT_FAILURE: &str = "Error executing conversion request";
/// Status text for a JSON reply carrying neither `message` nor `error`.
pub const STATUS_NO_MESSAGE: &str = "Conversion finished";

/// Owner of the catalog entries. Everything else reads snapshots through
/// `all()`; replacement is wholesale, never an incremental patch.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    entries: Vec<ApiEntry>,
    pub loading_state: LoadingState,
    pub retry_count: u32,
    /// Set when a finished conversion asks for a re-fetch; the run loop
    /// consumes it.
    pub refresh_pending: bool,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loading_state: LoadingState::Idle,
            retry_count: 0,
            refresh_pending: false,
        }
    }
}

impl CatalogStore {
    pub fn all(&self) -> &[ApiEntry] {
        &self.entries
    }

    pub fn replace_all(&mut self, entries: Vec<ApiEntry>) {
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub filtered: Vec<ApiEntry>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub input_mode: InputMode,
    pub panel_focus: PanelFocus,
    /// Visible-row indices whose path is shown expanded. Transient: cleared on
    /// every filter change and on every catalog replace.
    pub expanded_rows: HashSet<usize>,
    pub url_input: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Normal,
            panel_focus: PanelFocus::Catalog,
            expanded_rows: HashSet::new(),
            url_input: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertState {
    pub form: ConvertForm,
    pub active_field: FormField,
    /// Edit buffer for the field currently being typed into.
    pub edit_buffer: String,
    /// Run trigger is disabled while this is set; a second activation is a no-op.
    pub in_flight: bool,
    /// Text shown in the status line under the panels.
    pub status: String,
}

impl Default for ConvertState {
    fn default() -> Self {
        Self {
            form: ConvertForm::default(),
            active_field: FormField::Path,
            edit_buffer: String::new(),
            in_flight: false,
            status: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleState {
    pub viewer: SampleViewer,
    next_token: u64,
    pub scroll: usize,
}

impl Default for SampleState {
    fn default() -> Self {
        Self {
            viewer: SampleViewer::Closed,
            next_token: 0,
            scroll: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub search: SearchState,
    pub ui: UiState,
    pub convert: ConvertState,
    pub sample: SampleState,
}

impl AppState {
    /// The entries the list currently shows: the whole catalog when the query
    /// is empty, the filtered subsequence otherwise.
    pub fn visible_entries(&self) -> &[ApiEntry] {
        if self.search.query.is_empty() {
            self.catalog.all()
        } else {
            &self.search.filtered
        }
    }

    /// Recompute the filtered view from the current catalog snapshot. Rebuilding
    /// throws the rows away, so expansion state resets with it.
    pub fn update_filtered_entries(&mut self) {
        self.search.filtered = filter_entries(&self.search.query, self.catalog.all());
        self.ui.expanded_rows.clear();
    }

    /// Open the sample viewer for `entry` with a fresh token and return the
    /// token the background fetch must carry back.
    pub fn begin_sample(&mut self, entry: ApiEntry) -> u64 {
        self.sample.next_token += 1;
        let token = self.sample.next_token;
        self.sample.viewer = SampleViewer::Open {
            token,
            entry,
            content: SampleContent::Generating,
        };
        self.sample.scroll = 0;
        token
    }

    /// Claim the run trigger. Returns the request snapshot when no conversion
    /// is outstanding; `None` while one is, so a second activation is a no-op.
    pub fn try_start_conversion(&mut self) -> Option<ConversionRequest> {
        if self.convert.in_flight {
            return None;
        }
        self.convert.in_flight = true;
        self.convert.status = STATUS_RUNNING.to_string();
        Some(self.convert.form.to_request())
    }
}

/// Case-insensitive substring filter over method and path. Pure; preserves the
/// input order and returns everything for an empty query.
pub fn filter_entries(query: &str, entries: &[ApiEntry]) -> Vec<ApiEntry> {
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry.method.to_lowercase().contains(&query)
                || entry.path.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: &str, path: &str) -> ApiEntry {
        ApiEntry {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    fn sample_catalog() -> Vec<ApiEntry> {
        vec![entry("GET", "/a"), entry("POST", "/a/b"), entry("GET", "/c")]
    }

    #[test]
    fn test_filter_empty_query_returns_everything() {
        let catalog = sample_catalog();
        assert_eq!(filter_entries("", &catalog), catalog);
    }

    #[test]
    fn test_filter_matches_path_substring() {
        let visible = filter_entries("a", &sample_catalog());
        assert_eq!(visible, vec![entry("GET", "/a"), entry("POST", "/a/b")]);
    }

    #[test]
    fn test_filter_matches_method_case_insensitive() {
        let visible = filter_entries("post", &sample_catalog());
        assert_eq!(visible, vec![entry("POST", "/a/b")]);

        let visible = filter_entries("GET", &sample_catalog());
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let catalog = vec![
            entry("GET", "/pets"),
            entry("DELETE", "/pets/{id}"),
            entry("GET", "/pets/{id}/photos"),
        ];
        let visible = filter_entries("pets", &catalog);
        assert_eq!(visible, catalog);
    }

    #[test]
    fn test_filter_is_subsequence() {
        let catalog = sample_catalog();
        let visible = filter_entries("c", &catalog);
        // Every result must come from the catalog, with matches only.
        for e in &visible {
            assert!(catalog.contains(e));
            assert!(e.method.to_lowercase().contains('c') || e.path.to_lowercase().contains('c'));
        }
        assert_eq!(visible, vec![entry("GET", "/c")]);
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter_entries("zzz", &sample_catalog()).is_empty());
    }

    #[test]
    fn test_filter_duplicate_entries_kept_separately() {
        let catalog = vec![entry("GET", "/a"), entry("GET", "/a")];
        assert_eq!(filter_entries("a", &catalog).len(), 2);
    }

    #[test]
    fn test_visible_entries_unfiltered_is_catalog() {
        let mut state = AppState::default();
        state.catalog.replace_all(sample_catalog());
        assert_eq!(state.visible_entries(), sample_catalog().as_slice());
    }

    #[test]
    fn test_update_filtered_entries_resets_expansion() {
        let mut state = AppState::default();
        state.catalog.replace_all(sample_catalog());
        state.ui.expanded_rows.insert(1);

        state.search.query = "a".to_string();
        state.update_filtered_entries();

        assert!(state.ui.expanded_rows.is_empty());
        assert_eq!(state.visible_entries().len(), 2);
    }

    #[test]
    fn test_update_filtered_entries_is_idempotent() {
        let mut state = AppState::default();
        state.catalog.replace_all(sample_catalog());
        state.search.query = "a".to_string();

        state.update_filtered_entries();
        let first = state.visible_entries().to_vec();
        state.update_filtered_entries();

        assert_eq!(state.visible_entries(), first.as_slice());
        assert!(state.ui.expanded_rows.is_empty());
    }

    #[test]
    fn test_try_start_conversion_blocks_overlapping_submit() {
        let mut state = AppState::default();
        state.convert.form.tag = "auto".to_string();

        let first = state.try_start_conversion();
        assert!(first.is_some());
        assert_eq!(first.unwrap().tag, "auto");
        assert!(state.convert.in_flight);
        assert_eq!(state.convert.status, STATUS_RUNNING);

        // The run trigger stays disabled until the first call resolves.
        assert!(state.try_start_conversion().is_none());

        state.convert.in_flight = false;
        assert!(state.try_start_conversion().is_some());
    }

    #[test]
    fn test_begin_sample_tokens_increase() {
        let mut state = AppState::default();
        let first = state.begin_sample(entry("GET", "/a"));
        let second = state.begin_sample(entry("POST", "/a/b"));
        assert!(second > first);

        match &state.sample.viewer {
            SampleViewer::Open {
                token,
                entry: open_entry,
                content,
            } => {
                assert_eq!(*token, second);
                assert_eq!(open_entry.path, "/a/b");
                assert_eq!(*content, SampleContent::Generating);
            }
            SampleViewer::Closed => panic!("viewer should be open"),
        }
    }
}
