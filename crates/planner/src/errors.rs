//! Error taxonomy for the planner.
//!
//! There are exactly two failure classes. Neither is retried: every failure
//! surfaces immediately and ends the run with a non-zero exit code.
//!
//! - [`PlannerError::ConfigurationError`]: a required input is missing or invalid.
//!   Always produced before any network call.
//! - [`PlannerError::UpstreamError`]: an outbound call to Jules or GitHub failed or
//!   answered with a non-success status.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of response-body bytes kept in an error.
pub const MAX_ERROR_BODY_BYTES: usize = 400;

/// The external service an [`PlannerError::UpstreamError`] error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamService {
    /// The Jules planning API.
    Jules,
    /// The GitHub REST API.
    GitHub,
}

impl std::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jules => write!(f, "Jules API"),
            Self::GitHub => write!(f, "GitHub API"),
        }
    }
}

/// Errors that end a planner run.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum PlannerError {
    /// A required environment value or event-payload field is missing or invalid.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// An outbound HTTP call failed.
    ///
    /// `status` is `None` when the request never produced a response (DNS,
    /// connect, timeout) or the response could not be decoded.
    #[error("{service} error{}: {body}", status_suffix(.status))]
    UpstreamError {
        /// Which service failed.
        service: UpstreamService,
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Response body (truncated) or transport error description.
        body: String,
    },
}

impl PlannerError {
    /// Builds a [`PlannerError::ConfigurationError`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Builds a [`PlannerError::UpstreamError`] from a non-success response.
    pub fn upstream_status(service: UpstreamService, status: u16, body: &[u8]) -> Self {
        Self::UpstreamError {
            service,
            status: Some(status),
            body: truncate_body(body),
        }
    }

    /// Builds a [`PlannerError::UpstreamError`] for a call that produced no
    /// usable response.
    pub fn upstream_transport(service: UpstreamService, detail: impl std::fmt::Display) -> Self {
        Self::UpstreamError {
            service,
            status: None,
            body: detail.to_string(),
        }
    }

    /// Returns `true` for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }

    /// Returns the upstream status code, if this error carries one.
    pub fn upstream_status_code(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { status, .. } => *status,
            Self::ConfigurationError { .. } => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

/// Converts a response body to text, capped at [`MAX_ERROR_BODY_BYTES`].
///
/// Servers may return large HTML pages on 5xx; only the head is kept.
pub fn truncate_body(body: &[u8]) -> String {
    let head = &body[..body.len().min(MAX_ERROR_BODY_BYTES)];
    String::from_utf8_lossy(head).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_includes_status_and_body() {
        let err = PlannerError::upstream_status(UpstreamService::GitHub, 403, b"Forbidden");
        assert_eq!(err.to_string(), "GitHub API error (HTTP 403): Forbidden");
        assert_eq!(err.upstream_status_code(), Some(403));
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = PlannerError::upstream_transport(UpstreamService::Jules, "connection refused");
        assert_eq!(err.to_string(), "Jules API error: connection refused");
        assert_eq!(err.upstream_status_code(), None);
        assert!(!err.is_configuration());
    }

    #[test]
    fn bodies_are_truncated() {
        let big = vec![b'x'; 1000];
        let err = PlannerError::upstream_status(UpstreamService::Jules, 500, &big);
        match err {
            PlannerError::UpstreamError { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY_BYTES),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn configuration_display() {
        let err = PlannerError::configuration("JULES_API_KEY is required");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Configuration error: JULES_API_KEY is required"
        );
    }
}
