//! Check error types.

use thiserror::Error;

/// Errors returned by [`Checker::run`](crate::Checker::run) and its helpers.
///
/// A non-2xx status written by the handler chain is never an error; it is
/// captured in the [`CheckResult`](crate::CheckResult) like any other status.
#[derive(Debug, Error)]
pub enum CheckError {
    /// No terminal handler was configured.
    #[error("handler must be set before running a check")]
    MissingHandler,

    /// The request path was empty.
    #[error("url path cannot be empty")]
    EmptyPath,

    /// The method is not a valid HTTP token.
    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// The path could not be parsed as a request URI.
    #[error("invalid request URI '{uri}': {reason}")]
    InvalidUri {
        /// URI as configured
        uri: String,
        /// Parser message
        reason: String,
    },

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as configured
        name: String,
        /// Parser message
        reason: String,
    },

    /// The captured response could not be read back.
    #[error("failed to capture response: {0}")]
    Capture(String),

    /// The router refused a pattern.
    #[error("failed to register pattern '{pattern}': {reason}")]
    Registration {
        /// Pattern passed to the router
        pattern: String,
        /// Engine message
        reason: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckError {
    /// Returns true for errors caused by missing or empty required fields.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingHandler | Self::EmptyPath)
    }

    /// Returns true for errors raised while building the request.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::InvalidMethod(_) | Self::InvalidUri { .. } | Self::InvalidHeader { .. }
        )
    }

    pub(crate) fn registration(pattern: &str, reason: impl ToString) -> Self {
        Self::Registration {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
