//! Primitive placement commands - the output of the layout engine.
//!
//! Coordinates are relative to the top-left corner of the slide frame.

use serde::{Deserialize, Serialize};

use crate::font::FontDescriptor;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// A positioned, styled block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    /// Optional node name for the host (e.g. `title`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Characters to draw.
    pub content: String,
    /// Requested font.
    pub font: FontDescriptor,
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color as hex.
    pub color: String,
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Fixed block width; text wraps inside it.
    pub width: f32,
    /// Measured block height.
    pub height: f32,
    /// Line height multiplier, if not the font default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// Letter spacing in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: TextAlign,
}

/// A positioned, filled rectangle or ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePlacement {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Fill color as hex.
    pub fill: String,
    /// Fill opacity (0.0 to 1.0).
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    /// Corner radius (rectangles only).
    #[serde(default)]
    pub corner_radius: f32,
}

fn full_opacity() -> f32 {
    1.0
}

impl ShapePlacement {
    /// Opaque square-cornered shape.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32, fill: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: fill.to_string(),
            opacity: 1.0,
            corner_radius: 0.0,
        }
    }

    /// Set the corner radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the fill opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// One placement command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Primitive {
    /// Text block.
    Text(TextPlacement),
    /// Rectangle.
    Rect(ShapePlacement),
    /// Ellipse inscribed in the placement box.
    Ellipse(ShapePlacement),
}

impl Primitive {
    /// Bounding box as `(x, y, width, height)`.
    #[must_use]
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            Primitive::Text(t) => (t.x, t.y, t.width, t.height),
            Primitive::Rect(s) | Primitive::Ellipse(s) => (s.x, s.y, s.width, s.height),
        }
    }

    /// The text placement, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextPlacement> {
        match self {
            Primitive::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Short kind name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Text(_) => "text",
            Primitive::Rect(_) => "rect",
            Primitive::Ellipse(_) => "ellipse",
        }
    }
}
