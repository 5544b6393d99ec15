//! Dockfleet Dashboard Configuration
//!
//! Settings are read from `data-*` attributes on the document root, e.g.
//!
//! ```html
//! <html data-api-url="http://fleet.local:8000" data-request-timeout-ms="15000">
//! ```
//!
//! Anything missing falls back to [`DashboardConfig::default`]. When no API
//! URL is configured the page origin is used (same-origin requests).

use crate::controller::ViewKind;
use crate::retry::{duration_ms, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Id of the permanent central node the backend creates on first start.
pub const DEFAULT_CENTRAL_ID: &str = "main";

/// Fallback for development builds served without an origin.
const DEV_API_URL: &str = "http://127.0.0.1:8000";

// =============================================================================
// Dashboard Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL prefixed to every `/api/...` path. No trailing slash.
    pub api_base_url: String,
    /// Upper bound for any single request.
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,
    /// How long a toast stays on screen.
    #[serde(with = "duration_ms")]
    pub toast_duration: Duration,
    /// Roster reload schedule after a successful delete.
    pub delete_reload_retry: RetryPolicy,
    /// Node that can never be deleted or edited from the dashboard.
    pub reserved_node_id: String,
    /// View shown on first load.
    pub initial_view: ViewKind,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout: Duration::from_secs(30),
            toast_duration: Duration::from_millis(3000),
            delete_reload_retry: RetryPolicy::default(),
            reserved_node_id: DEFAULT_CENTRAL_ID.to_string(),
            initial_view: ViewKind::ServerGraph,
        }
    }
}

impl DashboardConfig {
    /// Build a configuration from an attribute lookup. Unparseable values
    /// are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = get("data-api-url") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(ms) = get("data-request-timeout-ms").and_then(|v| parse_millis("data-request-timeout-ms", &v)) {
            config.request_timeout = ms;
        }
        if let Some(ms) = get("data-toast-ms").and_then(|v| parse_millis("data-toast-ms", &v)) {
            config.toast_duration = ms;
        }
        if let Some(n) = get("data-delete-retry-attempts") {
            match n.parse::<u32>() {
                Ok(n) if n > 0 => config.delete_reload_retry.max_attempts = n,
                _ => log::warn!("ignoring data-delete-retry-attempts={:?}", n),
            }
        }
        if let Some(ms) = get("data-delete-retry-delay-ms").and_then(|v| parse_millis("data-delete-retry-delay-ms", &v)) {
            config.delete_reload_retry.delay = ms;
        }
        if let Some(id) = get("data-central-id") {
            config.reserved_node_id = id;
        }
        if let Some(view) = get("data-initial-view") {
            config.initial_view = ViewKind::parse(&view);
        }

        config
    }

    /// Read configuration from the live document, defaulting the API URL to
    /// the page origin.
    pub fn from_document() -> Self {
        let root = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.document_element());

        let mut config = Self::from_lookup(|name| root.as_ref().and_then(|el| el.get_attribute(name)));

        if config.api_base_url.is_empty() {
            config.api_base_url = web_sys::window()
                .and_then(|win| win.location().origin().ok())
                .filter(|origin| !origin.is_empty() && origin != "null")
                .unwrap_or_else(|| DEV_API_URL.to_string());
        }

        config
    }
}

fn parse_millis(name: &str, raw: &str) -> Option<Duration> {
    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            log::warn!("ignoring {}={:?}: expected a positive number of milliseconds", name, raw);
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_lookup(|_| None);
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.reserved_node_id, "main");
        assert_eq!(config.initial_view, ViewKind::ServerGraph);
        assert_eq!(config.delete_reload_retry.max_attempts, 3);
    }

    #[test]
    fn test_attributes_override_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("data-api-url", "http://fleet.local:8000/"),
            ("data-request-timeout-ms", "15000"),
            ("data-toast-ms", "1200"),
            ("data-delete-retry-attempts", "5"),
            ("data-initial-view", "server"),
        ]));

        assert_eq!(config.api_base_url, "http://fleet.local:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.toast_duration, Duration::from_millis(1200));
        assert_eq!(config.delete_reload_retry.max_attempts, 5);
        assert_eq!(config.initial_view, ViewKind::Server);
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("data-request-timeout-ms", "soon"),
            ("data-delete-retry-attempts", "0"),
            ("data-api-url", "   "),
        ]));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.delete_reload_retry.max_attempts, 3);
        assert!(config.api_base_url.is_empty());
    }
}
