//! # Deck Core
//!
//! Deterministic slide layout for generated presentations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 deck-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Style Guide     │  Slide Plan              │
//! │  - Tone palettes │  - Typed slide contents  │
//! │  - Type scales   │  - JSON extraction       │
//! │  - Layout consts │  - Validation            │
//! ├─────────────────────────────────────────────┤
//! │  Layout Engine   │  Deck Assembler          │
//! │  - 8 slide types │  - Frame placement       │
//! │  - Measure/place │  - Progress events       │
//! │  - Primitives    │  - RenderHost seam       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The flow is: a [`SlidesPlan`] and a [`StyleGuide`] go into
//! [`DeckAssembler::assemble`], which lays out each slide with the
//! [`LayoutEngine`] and issues the resulting [`Primitive`]s to a
//! [`RenderHost`] one at a time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assembler;
pub mod error;
pub mod event;
pub mod font;
pub mod host;
pub mod layout;
pub mod plan;
pub mod primitive;
pub mod scene;
pub mod style;
pub mod text;

pub use assembler::{frame_name, frame_offset, progress_percent, DeckAssembler};
pub use error::{DeckError, DeckResult};
pub use event::DeckEvent;
pub use font::{resolve_font, FontBook, FontDescriptor};
pub use host::{FrameId, FrameSpec, RenderHost};
pub use layout::{layout_slide, LayoutEngine, SlideLayout};
pub use plan::{
    extract_plan, Audience, ImageHint, PlanError, Slide, SlideType, SlidesPlan,
};
pub use primitive::{Primitive, ShapePlacement, TextAlign, TextPlacement};
pub use scene::{DeckScene, Frame, Node, NodeId, Page, SceneHost};
pub use style::{build_style_guide, StyleGuide, Tone, TypeScale};
pub use text::{wrap_lines, ApproxMetrics, TextExtent, TextMeasure, TextStyle};

/// Deck core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
