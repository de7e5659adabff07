//! Side-by-side comparison cards.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, Column, TwoColContent};
use crate::primitive::ShapePlacement;

const STRIP_WIDTH: f32 = 4.0;
const CARD_INSET: f32 = 32.0;
const BULLETS_TOP: f32 = 88.0;
const BULLET_PITCH: f32 = 40.0;
const DOT_SIZE: f32 = 5.0;

/// Place the optional section label and the heading, both anchored at the
/// horizontal padding. Shared with the stats layout.
pub(crate) fn header(
    canvas: &mut SlideCanvas<'_>,
    section_label: Option<&String>,
    heading: &str,
) {
    let s = canvas.style;
    let (w, pad) = (canvas.w(), canvas.pad());
    let mut y = pad;

    if let Some(label) = present(section_label) {
        canvas.label(label, pad, y, w - pad * 2.0);
        y += 32.0;
    }

    let h2 = &s.typography.heading2;
    canvas.text(
        heading,
        TextSpec::scale(h2, &s.colors.text.primary)
            .at(pad, y)
            .width(w - pad * 2.0)
            .letter_spacing(h2.letter_spacing),
    );
}

pub(crate) fn layout(c: &TwoColContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());

    header(canvas, c.section_label.as_ref(), &c.heading);

    let col_y = h * 0.32;
    let col_w = (w - pad * 2.0 - s.layout.column_gap) / 2.0;
    let col_h = h - col_y - pad;

    column(canvas, &c.left_col, pad, col_y, col_w, col_h);
    column(canvas, &c.right_col, pad + col_w + s.layout.column_gap, col_y, col_w, col_h);
}

fn column(canvas: &mut SlideCanvas<'_>, col: &Column, x: f32, y: f32, width: f32, height: f32) {
    let s = canvas.style;

    canvas.rect(
        ShapePlacement::new(x, y, width, height, &s.colors.surface)
            .with_radius(s.layout.corner_radius),
    );
    canvas.rect(ShapePlacement::new(x, y, STRIP_WIDTH, height, &s.colors.primary));

    let h3 = &s.typography.heading3;
    canvas.text(
        &col.heading,
        TextSpec::scale(h3, &s.colors.text.primary)
            .at(x + CARD_INSET, y + CARD_INSET)
            .width(width - 48.0)
            .letter_spacing(h3.letter_spacing),
    );

    let mut bullet_y = y + BULLETS_TOP;
    for bullet in &col.bullets {
        canvas.dot(x + CARD_INSET, bullet_y + 10.0, DOT_SIZE);
        canvas.text(
            bullet,
            TextSpec::body("Regular", 18.0, &s.colors.text.primary)
                .at(x + 48.0, bullet_y)
                .width(width - 64.0)
                .line_height(1.5),
        );
        bullet_y += BULLET_PITCH;
    }
}
