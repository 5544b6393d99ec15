//! Dockfleet Error Types
//!
//! Every backend interaction resolves to an [`ApiError`] at the call site
//! that issued it. Nothing here is allowed to escape to the top of a view:
//! the controller turns each variant into a toast or an inline empty state.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// API Error
// =============================================================================

/// Errors produced while talking to the dashboard backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (network, DNS, CORS).
    #[error("network error: {0}")]
    Transport(String),

    /// No response arrived within the configured bound.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// A non-2xx response. `message` is the most specific text the body had.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Valid JSON, but not the shape the endpoint promises.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A business-level refusal reported inside a 2xx body.
    #[error("{0}")]
    Rejected(String),
}

/// Coarse classification used for logging and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Timeout,
    Http,
    Payload,
    Domain,
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    /// Build an HTTP error from a raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::http(status, extract_error_message(status, body))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Timeout(_) => ErrorKind::Timeout,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Decode(_) | ApiError::UnexpectedShape(_) => ErrorKind::Payload,
            ApiError::Rejected(_) => ErrorKind::Domain,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Timeout(_) => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Pull the most specific message out of an error body: `detail`, then
/// `message`, then the raw text, then `HTTP <status>`.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let fallback = format!("HTTP {}", status);

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            for key in ["detail", "message"] {
                match map.get(key) {
                    Some(serde_json::Value::String(s)) => {
                        if !s.trim().is_empty() {
                            return s.clone();
                        }
                    }
                    Some(serde_json::Value::Null) | None => {}
                    // FastAPI validation errors put a list under `detail`
                    Some(serde_json::Value::Array(items)) => {
                        if let Some(msg) = items
                            .iter()
                            .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                        {
                            return msg.to_string();
                        }
                    }
                    Some(other) => return other.to_string(),
                }
            }
            fallback
        }
        Ok(_) => fallback,
        Err(_) => {
            let text = body.trim();
            if text.is_empty() || text.starts_with('<') {
                fallback
            } else {
                text.to_string()
            }
        }
    }
}

// =============================================================================
// Form Error
// =============================================================================

/// Client-side validation failures for the server form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("please fill in all required fields ({})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("enter a server id before testing the connection")]
    MissingId,

    #[error("enter a URL before testing the connection")]
    MissingUrl,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wins_over_message() {
        let body = r#"{"detail":"server id 'edge' already exists","message":"nope"}"#;
        assert_eq!(extract_error_message(400, body), "server id 'edge' already exists");
    }

    #[test]
    fn test_message_used_when_detail_missing() {
        assert_eq!(extract_error_message(500, r#"{"message":"docker down"}"#), "docker down");
        assert_eq!(
            extract_error_message(500, r#"{"detail":null,"message":"docker down"}"#),
            "docker down"
        );
    }

    #[test]
    fn test_blank_detail_falls_through() {
        assert_eq!(
            extract_error_message(400, r#"{"detail":"","message":"server id already exists"}"#),
            "server id already exists"
        );
        assert_eq!(extract_error_message(400, r#"{"detail":"   "}"#), "HTTP 400");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(extract_error_message(502, ""), "HTTP 502");
        assert_eq!(extract_error_message(404, r#"{"other":1}"#), "HTTP 404");
        assert_eq!(extract_error_message(500, "<html>oops</html>"), "HTTP 500");
        assert_eq!(extract_error_message(500, "plain failure"), "plain failure");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail":[{"loc":["body","id"],"msg":"field required"}]}"#;
        assert_eq!(extract_error_message(422, body), "field required");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ApiError::Transport("x".into()).kind(), ErrorKind::Transport);
        assert_eq!(ApiError::Timeout(Duration::from_secs(3)).kind(), ErrorKind::Timeout);
        assert_eq!(ApiError::UnexpectedShape("x".into()).kind(), ErrorKind::Payload);
        assert_eq!(ApiError::Rejected("dup".into()).kind(), ErrorKind::Domain);

        let err = ApiError::from_response(404, r#"{"detail":"missing"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "missing");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ApiError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(ApiError::http(503, "busy").is_retryable());
        assert!(!ApiError::http(400, "bad").is_retryable());
        assert!(!ApiError::Rejected("dup".into()).is_retryable());
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::MissingFields(vec!["id", "base_url"]);
        assert_eq!(err.to_string(), "please fill in all required fields (id, base_url)");
    }
}
