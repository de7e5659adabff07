//! # Deck Renderer
//!
//! Turns an assembled [`deck_core::DeckScene`] into files.
//!
//! ## Pipeline
//!
//! ```text
//! DeckScene ──► SVG per frame ──┬──► .svg files + page overview
//!                               ├──► resvg/tiny-skia ──► .png files
//!                               └──► rasterised pages ──► printpdf ──► .pdf
//! ```
//!
//! SVG output is always available. PNG and PDF need the `raster` feature
//! (on by default).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{file_name, DeckExporter, ExportConfig, ExportFormat};
