//! Backend HTTP calls
//!
//! The three yamlcon endpoints are driven from here:
//! - `GET /available-paths` - the catalog of generated API operations
//! - `POST /convert` - run the converter with the form's field values
//! - `POST /sample-response` - generate a sample payload for one operation
//!
//! Each call runs in a spawned tokio task and reports its result back into
//! `AppState` through `apply_action`, so the UI thread never blocks on I/O.

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crate::types::{ApiEntry, ConversionRequest, ConvertOutcome, ConvertReply, SampleRequest};
use crate::ui::log_debug;
use std::sync::{Arc, RwLock};
use url::Url;

/// Spawns a background task that re-fetches the catalog and swaps it in
/// wholesale. A failed refresh of an already-shown catalog is silent.
pub fn refresh_catalog_background(state: Arc<RwLock<AppState>>, base_url: String) {
    if let Ok(mut s) = state.write() {
        apply_action(AppAction::CatalogRefreshStarted, &mut s);
    }

    tokio::spawn(async move {
        match fetch_catalog(&base_url).await {
            Ok(entries) => {
                if let Ok(mut s) = state.write() {
                    apply_action(AppAction::CatalogFetched(entries), &mut s);
                }
            }
            Err(e) => {
                log_debug(&format!("Catalog fetch failed: {e}"));
                if let Ok(mut s) = state.write() {
                    apply_action(AppAction::CatalogFetchFailed(e.to_string()), &mut s);
                }
            }
        }
    });
}

/// Submit the conversion form. No-op while a previous submission is still in
/// flight; completion always schedules a catalog refresh.
pub fn run_conversion_background(state: Arc<RwLock<AppState>>, base_url: String) {
    let request = {
        let mut s = state.write().unwrap();
        match s.try_start_conversion() {
            Some(request) => request,
            None => {
                log_debug("Conversion already in flight, ignoring run trigger");
                return;
            }
        }
    };

    tokio::spawn(async move {
        let outcome = match post_convert(&base_url, &request).await {
            Ok(reply) => ConvertOutcome::Reply(reply),
            Err(e) => {
                log_debug(&format!("Conversion request failed: {e}"));
                ConvertOutcome::Transport
            }
        };

        if let Ok(mut s) = state.write() {
            apply_action(AppAction::ConversionFinished(outcome), &mut s);
        }
    });
}

/// Open the sample viewer for `entry` and fetch its generated sample. The
/// token handed out by `begin_sample` rides along so a response that arrives
/// after the viewer moved on gets discarded in `apply_action`.
pub fn fetch_sample_background(state: Arc<RwLock<AppState>>, base_url: String, entry: ApiEntry) {
    let token = {
        let mut s = state.write().unwrap();
        s.begin_sample(entry.clone())
    };

    tokio::spawn(async move {
        let body = match post_sample(&base_url, &entry).await {
            Ok(value) => pretty_json(&value),
            Err(e) => {
                log_debug(&format!("Sample request failed: {e}"));
                format!("Failed to generate sample: {e}")
            }
        };

        if let Ok(mut s) = state.write() {
            apply_action(AppAction::SampleArrived { token, body }, &mut s);
        }
    });
}

async fn fetch_catalog(base_url: &str) -> anyhow::Result<Vec<ApiEntry>> {
    let url = endpoint_url(base_url, "/available-paths")?;
    let entries = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json::<Vec<ApiEntry>>()
        .await?;
    Ok(entries)
}

async fn post_convert(base_url: &str, request: &ConversionRequest) -> anyhow::Result<ConvertReply> {
    let url = endpoint_url(base_url, "/convert")?;
    let client = reqwest::Client::new();

    // The reply body carries the outcome even on non-2xx statuses, so parse it
    // regardless of the status code.
    let reply = client
        .post(&url)
        .json(request)
        .send()
        .await?
        .json::<ConvertReply>()
        .await?;
    Ok(reply)
}

async fn post_sample(base_url: &str, entry: &ApiEntry) -> anyhow::Result<serde_json::Value> {
    let url = endpoint_url(base_url, "/sample-response")?;
    let client = reqwest::Client::new();

    // The backend answers 400 with an {"error": ...} body; that body is shown
    // exactly like a successful sample.
    let value = client
        .post(&url)
        .json(&SampleRequest {
            path: entry.path.clone(),
            method: entry.method.clone(),
        })
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    Ok(value)
}

/// Join the backend base URL with an endpoint path and validate the result.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> anyhow::Result<String> {
    let full = format!("{}{}", base_url.trim_end_matches('/'), path);
    let url = Url::parse(&full).map_err(|e| anyhow::anyhow!("Invalid URL {full}: {e}"))?;
    Ok(url.to_string())
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_url_basic() {
        let url = endpoint_url("http://localhost:5000", "/available-paths").unwrap();
        assert_eq!(url, "http://localhost:5000/available-paths");
    }

    #[test]
    fn test_endpoint_url_trailing_slash_in_base() {
        let url = endpoint_url("http://localhost:5000/", "/convert").unwrap();
        assert_eq!(url, "http://localhost:5000/convert");
    }

    #[test]
    fn test_endpoint_url_invalid_base() {
        assert!(endpoint_url("not a valid url", "/convert").is_err());
    }

    #[test]
    fn test_pretty_json_object() {
        let value = json!({"id": 1, "name": "string_example"});
        let text = pretty_json(&value);
        assert!(text.contains("\"id\": 1"));
        assert!(text.lines().count() > 1);
    }

    #[test]
    fn test_pretty_json_error_payload_renders_like_data() {
        // An application error from the sample endpoint is still just JSON.
        let value = json!({"error": "Schema not found for GET /a (200)"});
        let text = pretty_json(&value);
        assert!(text.contains("Schema not found"));
    }
}
