//! Deck assembly: drives a [`RenderHost`] through a whole plan.
//!
//! Slides are processed strictly in order, one awaited host call at a time.
//! After each slide a [`DeckEvent::Progress`] is yielded. The first failure
//! yields a single [`DeckEvent::Error`] and ends the stream; frames created
//! before it remain on the host.

use std::collections::HashMap;

use async_stream::stream;
use futures::Stream;

use crate::event::DeckEvent;
use crate::font::{resolve_font, FontDescriptor};
use crate::host::{FrameSpec, RenderHost};
use crate::layout::LayoutEngine;
use crate::plan::{Slide, SlideType, SlidesPlan};
use crate::primitive::Primitive;
use crate::style::StyleGuide;
use crate::DeckResult;

/// Horizontal canvas offset of the `index`-th frame.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frame_offset(index: usize, style: &StyleGuide) -> f32 {
    index as f32 * (style.layout.slide_width + style.layout.frame_spacing)
}

/// Frame name, e.g. `03 - STATS`.
#[must_use]
pub fn frame_name(index: usize, slide_type: SlideType) -> String {
    format!("{:02} - {slide_type}", index + 1)
}

/// Percent complete after the `index`-th of `total` slides.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = ((index + 1) as f64 * 100.0 / total as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Lays out slides and places them on a host.
#[derive(Debug, Clone, Default)]
pub struct DeckAssembler {
    engine: LayoutEngine,
}

impl DeckAssembler {
    /// Create an assembler with a specific layout engine.
    #[must_use]
    pub fn new(engine: LayoutEngine) -> Self {
        Self { engine }
    }

    /// Assemble `plan` onto `host`, yielding progress as slides are placed.
    ///
    /// The stream ends after [`DeckEvent::Done`] or [`DeckEvent::Error`].
    pub fn assemble<'a, H>(
        &'a self,
        plan: &'a SlidesPlan,
        style: &'a StyleGuide,
        host: &'a mut H,
    ) -> impl Stream<Item = DeckEvent> + 'a
    where
        H: RenderHost + ?Sized,
    {
        stream! {
            let total = plan.slides.len();
            tracing::info!(title = %plan.title, slides = total, "Assembling deck");

            if let Err(e) = host.create_page(&plan.title).await {
                tracing::error!("Failed to create page: {e}");
                yield DeckEvent::error(e.to_string());
                return;
            }

            let mut fonts = HashMap::new();
            for (index, slide) in plan.slides.iter().enumerate() {
                if let Err(e) = self.place_slide(host, &mut fonts, slide, style, index).await {
                    tracing::error!(index, "Failed to place slide: {e}");
                    yield DeckEvent::error(e.to_string());
                    return;
                }

                let message = format!(
                    "Creating slide {}/{total}: {}",
                    index + 1,
                    slide.slide_type()
                );
                tracing::info!("{message}");
                yield DeckEvent::progress(message, progress_percent(index, total));
            }

            if let Err(e) = host.finish().await {
                tracing::error!("Failed to finish page: {e}");
                yield DeckEvent::error(e.to_string());
                return;
            }

            yield DeckEvent::Done { slide_count: total };
        }
    }

    async fn place_slide<H>(
        &self,
        host: &mut H,
        fonts: &mut HashMap<FontDescriptor, FontDescriptor>,
        slide: &Slide,
        style: &StyleGuide,
        index: usize,
    ) -> DeckResult<()>
    where
        H: RenderHost + ?Sized,
    {
        let layout = self.engine.layout_slide(slide, style, index);
        let spec = FrameSpec {
            name: frame_name(index, slide.slide_type()),
            x: frame_offset(index, style),
            y: 0.0,
            width: style.layout.slide_width,
            height: style.layout.slide_height,
            background: layout.background.clone(),
        };
        let frame = host.create_frame(&spec).await?;

        for primitive in &layout.primitives {
            let Primitive::Text(text) = primitive else {
                host.place(frame, primitive).await?;
                continue;
            };

            let font = match fonts.get(&text.font) {
                Some(font) => font.clone(),
                None => {
                    let font = resolve_font(host, &text.font).await;
                    fonts.insert(text.font.clone(), font.clone());
                    font
                }
            };

            if font == text.font {
                host.place(frame, primitive).await?;
            } else {
                let mut text = text.clone();
                text.font = font;
                host.place(frame, &Primitive::Text(text)).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{build_style_guide, Tone};

    #[test]
    fn test_frame_offsets() {
        let style = build_style_guide(Tone::Minimal);
        assert_eq!(frame_offset(0, &style), 0.0);
        assert_eq!(frame_offset(1, &style), 2000.0);
        assert_eq!(frame_offset(2, &style), 4000.0);
    }

    #[test]
    fn test_frame_name() {
        assert_eq!(frame_name(0, SlideType::Hero), "01 - HERO");
        assert_eq!(frame_name(11, SlideType::TwoCol), "12 - TWO_COL");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(1, 3), 67);
        assert_eq!(progress_percent(2, 3), 100);
        assert_eq!(progress_percent(0, 8), 13);
        assert_eq!(progress_percent(0, 0), 100);
    }
}
