//! Layout engine - one deterministic layout per slide type.
//!
//! Every layout is a pure function of the slide content and the style guide.
//! Coordinates are relative to the slide frame's top-left corner. Vertical
//! flow keeps a running cursor; text that precedes other elements is measured
//! through [`TextMeasure`] before the next element is positioned.

mod agenda;
mod closing;
mod content;
mod divider;
mod hero;
mod quote;
mod stats;
mod two_col;

use std::sync::Arc;

use crate::font::FontDescriptor;
use crate::plan::Slide;
use crate::primitive::{Primitive, ShapePlacement, TextAlign, TextPlacement};
use crate::style::{StyleGuide, TypeScale, BODY_FAMILY};
use crate::text::{ApproxMetrics, TextMeasure, TextStyle};

/// Font size of small caps section labels.
const LABEL_SIZE: f32 = 13.0;

/// Letter spacing of small caps section labels.
const LABEL_TRACKING: f32 = 2.0;

/// Laid-out slide: frame background plus ordered placement commands.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    /// Frame background fill.
    pub background: String,
    /// Placement commands in paint order.
    pub primitives: Vec<Primitive>,
}

impl SlideLayout {
    /// Text placements only.
    pub fn texts(&self) -> impl Iterator<Item = &TextPlacement> {
        self.primitives.iter().filter_map(Primitive::as_text)
    }

    /// Find a text placement by content.
    #[must_use]
    pub fn find_text(&self, content: &str) -> Option<&TextPlacement> {
        self.texts().find(|t| t.content == content)
    }
}

/// Computes slide layouts with a pluggable text measurer.
#[derive(Clone)]
pub struct LayoutEngine {
    measure: Arc<dyn TextMeasure>,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine").finish_non_exhaustive()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Arc::new(ApproxMetrics::default()))
    }
}

impl LayoutEngine {
    /// Create an engine using the given text measurer.
    #[must_use]
    pub fn new(measure: Arc<dyn TextMeasure>) -> Self {
        Self { measure }
    }

    /// Lay out one slide. `index` is the 0-based position in the deck.
    #[must_use]
    pub fn layout_slide(&self, slide: &Slide, style: &StyleGuide, index: usize) -> SlideLayout {
        let mut canvas = SlideCanvas::new(style, self.measure.as_ref());

        match slide {
            Slide::Hero(c) => hero::layout(c, &mut canvas),
            Slide::Agenda(c) => agenda::layout(c, &mut canvas),
            Slide::Content(c) => content::layout(c, &mut canvas),
            Slide::TwoCol(c) => two_col::layout(c, &mut canvas),
            Slide::Stats(c) => stats::layout(c, &mut canvas),
            Slide::Quote(c) => quote::layout(c, &mut canvas),
            Slide::Divider(c) => divider::layout(c, &mut canvas),
            Slide::Closing(c) => closing::layout(c, &mut canvas),
        }

        tracing::debug!(
            index,
            slide_type = %slide.slide_type(),
            primitives = canvas.primitives.len(),
            "Laid out slide"
        );

        canvas.finish()
    }
}

/// Lay out one slide with the default text metrics.
#[must_use]
pub fn layout_slide(slide: &Slide, style: &StyleGuide, index: usize) -> SlideLayout {
    LayoutEngine::default().layout_slide(slide, style, index)
}

/// Text block parameters before measurement.
#[derive(Debug, Clone)]
pub(crate) struct TextSpec {
    font: FontDescriptor,
    size: f32,
    color: String,
    x: f32,
    y: f32,
    width: f32,
    line_height: Option<f32>,
    letter_spacing: Option<f32>,
    align: TextAlign,
    name: Option<&'static str>,
}

impl TextSpec {
    pub(crate) fn new(family: &str, style: &str, size: f32, color: &str) -> Self {
        Self {
            font: FontDescriptor::new(family, style),
            size,
            color: color.to_string(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            line_height: None,
            letter_spacing: None,
            align: TextAlign::Left,
            name: None,
        }
    }

    /// Body family (`Inter`) in the given style.
    pub(crate) fn body(style: &str, size: f32, color: &str) -> Self {
        Self::new(BODY_FAMILY, style, size, color)
    }

    /// Family, style and size of a type scale.
    pub(crate) fn scale(scale: &TypeScale, color: &str) -> Self {
        Self::new(&scale.font_family, &scale.font_style, scale.font_size, color)
    }

    pub(crate) fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub(crate) fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub(crate) fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub(crate) fn letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub(crate) fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }
}

/// Accumulates placements for one slide.
pub(crate) struct SlideCanvas<'a> {
    pub(crate) style: &'a StyleGuide,
    measure: &'a dyn TextMeasure,
    background: String,
    primitives: Vec<Primitive>,
}

impl<'a> SlideCanvas<'a> {
    fn new(style: &'a StyleGuide, measure: &'a dyn TextMeasure) -> Self {
        Self {
            style,
            measure,
            background: style.colors.background.clone(),
            primitives: Vec::new(),
        }
    }

    fn finish(self) -> SlideLayout {
        SlideLayout {
            background: self.background,
            primitives: self.primitives,
        }
    }

    /// Slide width.
    pub(crate) fn w(&self) -> f32 {
        self.style.layout.slide_width
    }

    /// Slide height.
    pub(crate) fn h(&self) -> f32 {
        self.style.layout.slide_height
    }

    /// Horizontal content padding.
    pub(crate) fn pad(&self) -> f32 {
        self.style.layout.content_padding.left
    }

    pub(crate) fn set_background(&mut self, color: &str) {
        self.background = color.to_string();
    }

    /// Measure and place a text block, returning its height.
    pub(crate) fn text(&mut self, content: &str, spec: TextSpec) -> f32 {
        let text_style = TextStyle {
            font: spec.font.clone(),
            font_size: spec.size,
            line_height: spec.line_height,
            letter_spacing: spec.letter_spacing.unwrap_or(0.0),
        };
        let extent = self.measure.measure(content, &text_style, spec.width);

        self.primitives.push(Primitive::Text(TextPlacement {
            name: spec.name.map(str::to_string),
            content: content.to_string(),
            font: spec.font,
            font_size: spec.size,
            color: spec.color,
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: extent.height,
            line_height: spec.line_height,
            letter_spacing: spec.letter_spacing,
            align: spec.align,
        }));

        extent.height
    }

    pub(crate) fn rect(&mut self, shape: ShapePlacement) {
        self.primitives.push(Primitive::Rect(shape));
    }

    pub(crate) fn ellipse(&mut self, shape: ShapePlacement) {
        self.primitives.push(Primitive::Ellipse(shape));
    }

    /// Small caps label in the primary color.
    pub(crate) fn label(&mut self, content: &str, x: f32, y: f32, width: f32) {
        let spec = TextSpec::body("Medium", LABEL_SIZE, &self.style.colors.primary)
            .at(x, y)
            .width(width)
            .letter_spacing(LABEL_TRACKING);
        self.text(content, spec);
    }

    /// Small filled dot preceding a list item.
    pub(crate) fn dot(&mut self, x: f32, y: f32, size: f32) {
        let shape = ShapePlacement::new(x, y, size, size, &self.style.colors.primary)
            .with_radius(3.0);
        self.rect(shape);
    }
}
