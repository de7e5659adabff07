//! Planner error types.

use deck_core::PlanError;
use thiserror::Error;

/// Result type for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors that can occur while requesting a slide plan.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The API base URL is invalid.
    #[error("invalid planner API URL: {0}")]
    InvalidUrl(String),

    /// A required input or setting is missing. The message is user facing.
    #[error("{0}")]
    MissingConfig(String),

    /// HTTP layer failed (connection, timeout, body decoding).
    #[error("planner HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Claude API error: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Upstream `error.message`, or `HTTP <status>` when absent.
        message: String,
    },

    /// The response did not have the Messages API shape.
    #[error("unexpected planner response: {0}")]
    UnexpectedResponse(String),

    /// The response text did not contain a usable slide plan.
    #[error(transparent)]
    MalformedPlan(#[from] PlanError),
}

impl PlannerError {
    /// Returns true for transient failures worth retrying.
    ///
    /// Transport errors, rate limiting (429) and server-side errors (5xx)
    /// are retryable; everything else is final.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
