//! The rendering host seam.
//!
//! A host owns the canvas: it creates pages and frames, loads fonts and
//! materialises primitive placements. The assembler drives it strictly one
//! awaited call at a time.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::font::FontDescriptor;
use crate::primitive::Primitive;
use crate::DeckResult;

/// Host-assigned identifier of a slide frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// Everything a host needs to create one slide frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Frame name, e.g. `03 - STATS`.
    pub name: String,
    /// X offset on the page.
    pub x: f32,
    /// Y offset on the page.
    pub y: f32,
    /// Frame width.
    pub width: f32,
    /// Frame height.
    pub height: f32,
    /// Background fill as hex.
    pub background: String,
}

/// A scene-graph host that can materialise laid-out slides.
#[async_trait]
pub trait RenderHost: Send {
    /// Create a page and make it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the page.
    async fn create_page(&mut self, name: &str) -> DeckResult<()>;

    /// Create a clipped slide frame on the current page.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the frame.
    async fn create_frame(&mut self, spec: &FrameSpec) -> DeckResult<FrameId>;

    /// Load a font resource so text can use it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeckError::FontUnavailable`] if the font is unknown.
    async fn load_font(&mut self, font: &FontDescriptor) -> DeckResult<()>;

    /// Place one primitive inside a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame does not exist or placement fails.
    async fn place(&mut self, frame: FrameId, primitive: &Primitive) -> DeckResult<()>;

    /// Called once after every slide has been placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to finalise the page.
    async fn finish(&mut self) -> DeckResult<()> {
        Ok(())
    }
}
