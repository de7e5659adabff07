//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The scene has nothing to export.
    #[error("Scene has no frames to export")]
    EmptyScene,

    /// The output format is not compiled in.
    #[error("Export format not supported in this build: {0}")]
    Unsupported(String),

    /// The format name is not recognised.
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// SVG parsing or rasterisation failed.
    #[error("Rasterisation failed: {0}")]
    Raster(String),

    /// Document assembly or encoding failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Writing output files failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene serialisation failed.
    #[error(transparent)]
    Deck(#[from] deck_core::DeckError),
}
