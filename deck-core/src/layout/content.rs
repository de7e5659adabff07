//! Heading, body, bullets and an optional image region.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, ContentSlide};
use crate::primitive::{ShapePlacement, TextAlign};

const ACCENT_WIDTH: f32 = 6.0;
const BLOCK_GAP: f32 = 32.0;
const DOT_SIZE: f32 = 6.0;
const BULLET_INDENT: f32 = 20.0;
const BULLET_LINE_HEIGHT: f32 = 1.5;
const IMAGE_LABEL_WIDTH: f32 = 160.0;
const SECTION_LABEL_WIDTH: f32 = 500.0;

pub(crate) fn layout(c: &ContentSlide, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());
    let top = s.layout.content_padding.top;

    canvas.rect(ShapePlacement::new(0.0, 0.0, ACCENT_WIDTH, h, &s.colors.primary));

    let mut y = top;

    if let Some(label) = present(c.section_label.as_ref()) {
        canvas.label(label, pad, y, SECTION_LABEL_WIDTH);
        y += BLOCK_GAP;
    }

    let h2 = &s.typography.heading2;
    y += canvas.text(
        &c.heading,
        TextSpec::scale(h2, &s.colors.text.primary)
            .at(pad, y)
            .width(w * 0.55)
            .line_height(h2.line_height)
            .letter_spacing(h2.letter_spacing),
    ) + BLOCK_GAP;

    let body = &s.typography.body;
    if let Some(text) = present(c.body.as_ref()) {
        y += canvas.text(
            text,
            TextSpec::body("Regular", body.font_size, &s.colors.text.secondary)
                .at(pad, y)
                .width(w * 0.5)
                .line_height(body.line_height),
        ) + BLOCK_GAP;
    }

    for bullet in &c.bullets {
        canvas.dot(pad, y + 10.0, DOT_SIZE);
        let height = canvas.text(
            bullet,
            TextSpec::body("Regular", body.font_size, &s.colors.text.primary)
                .at(pad + BULLET_INDENT, y)
                .width(w * 0.5 - BULLET_INDENT)
                .line_height(BULLET_LINE_HEIGHT),
        );
        y += height + s.layout.item_gap;
    }

    if let Some(label) = c.image_hint.placeholder_label() {
        canvas.rect(
            ShapePlacement::new(w * 0.6, top, w * 0.35, h - top * 2.0, &s.colors.surface)
                .with_radius(s.layout.corner_radius),
        );
        canvas.text(
            label,
            TextSpec::body("Regular", 16.0, &s.colors.text.secondary)
                .at(w * 0.6 + w * 0.175 - IMAGE_LABEL_WIDTH / 2.0, h / 2.0 - 10.0)
                .width(IMAGE_LABEL_WIDTH)
                .align(TextAlign::Center),
        );
    }
}
