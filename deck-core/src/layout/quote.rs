//! Full-bleed pull quote. The only layout that inverts background and text.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, QuoteContent};
use crate::primitive::ShapePlacement;

const GLYPH_SIZE: f32 = 320.0;
const ATTRIBUTION_GAP: f32 = 40.0;
const ATTRIBUTION_INDENT: f32 = 60.0;

pub(crate) fn layout(c: &QuoteContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());
    let inverse = &s.colors.text.inverse;

    canvas.set_background(&s.colors.primary);

    let h1 = &s.typography.heading1;
    canvas.text(
        "\"",
        TextSpec::new(&h1.font_family, &h1.font_style, GLYPH_SIZE, &s.colors.background)
            .at(pad - 20.0, -60.0)
            .width(300.0),
    );

    let quote_y = h * 0.32;
    let quote_height = canvas.text(
        &format!("\"{}\"", c.quote),
        TextSpec::new(&s.typography.heading2.font_family, "Regular", 44.0, inverse)
            .at(pad, quote_y)
            .width(w - pad * 2.0)
            .line_height(1.4)
            .letter_spacing(-0.5),
    );

    let attr_y = quote_y + quote_height + ATTRIBUTION_GAP;
    canvas.rect(ShapePlacement::new(pad, attr_y - 8.0, 48.0, 3.0, inverse).with_opacity(0.5));
    canvas.text(
        &c.attribution,
        TextSpec::body("SemiBold", 22.0, inverse)
            .at(pad + ATTRIBUTION_INDENT, attr_y - 4.0)
            .width(500.0),
    );

    if let Some(role) = present(c.role.as_ref()) {
        canvas.text(
            role,
            TextSpec::body("Regular", 18.0, inverse)
                .at(pad + ATTRIBUTION_INDENT, attr_y + 26.0)
                .width(500.0),
        );
    }
}
