//! Error types for deck operations.

use thiserror::Error;

use crate::plan::PlanError;

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur while building or rendering a deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The slide plan could not be extracted or parsed.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// A style guide failed validation.
    #[error("Invalid style guide: {0}")]
    InvalidStyle(String),

    /// A frame referenced by a placement does not exist on the host.
    #[error("Frame not found: {0}")]
    FrameNotFound(String),

    /// The host could not load a font resource.
    #[error("Failed to load font {family} {style}")]
    FontUnavailable {
        /// Requested font family.
        family: String,
        /// Requested font style.
        style: String,
    },

    /// The rendering host rejected an operation.
    #[error("Render host error: {0}")]
    Host(String),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
