//! Section divider.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, DividerContent};
use crate::primitive::{ShapePlacement, TextAlign};

pub(crate) fn layout(c: &DividerContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());
    let h1 = &s.typography.heading1;

    canvas.text(
        &format!("{:02}", c.section_number),
        TextSpec::new(&h1.font_family, &h1.font_style, 320.0, &s.colors.primary)
            .at(w * 0.5, h * 0.05)
            .width(w * 0.5)
            .align(TextAlign::Right),
    );

    canvas.text(
        &c.section_title,
        TextSpec::scale(h1, &s.colors.text.primary)
            .at(pad, h * 0.38)
            .width(w * 0.6)
            .line_height(h1.line_height)
            .letter_spacing(h1.letter_spacing),
    );

    canvas.rect(ShapePlacement::new(pad, h * 0.62, 80.0, 4.0, &s.colors.primary));

    if let Some(description) = present(c.description.as_ref()) {
        canvas.text(
            description,
            TextSpec::body("Regular", 24.0, &s.colors.text.secondary)
                .at(pad, h * 0.66)
                .width(w * 0.5),
        );
    }
}
