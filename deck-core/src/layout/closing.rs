//! Closing slide with takeaways and a call to action.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, ClosingContent};
use crate::primitive::ShapePlacement;

/// Heading of the takeaways panel.
pub(crate) const TAKEAWAYS_LABEL: &str = "KEY TAKEAWAYS";

const TAKEAWAY_PITCH: f32 = 52.0;
const PANEL_INSET: f32 = 28.0;
const CTA_WIDTH: f32 = 400.0;
const CTA_HEIGHT: f32 = 52.0;

#[allow(clippy::cast_precision_loss)]
pub(crate) fn layout(c: &ClosingContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());
    let top = s.layout.content_padding.top;

    canvas.rect(ShapePlacement::new(0.0, 0.0, w, 6.0, &s.colors.primary));

    let mut y = top;
    if let Some(tagline) = present(c.tagline.as_ref()) {
        canvas.label(tagline, pad, y, 500.0);
        y += 32.0;
    }

    let h1 = &s.typography.heading1;
    y += canvas.text(
        &c.heading,
        TextSpec::scale(h1, &s.colors.text.primary)
            .at(pad, y)
            .width(w * 0.55)
            .line_height(h1.line_height)
            .letter_spacing(h1.letter_spacing),
    ) + 20.0;

    if let Some(subheading) = present(c.subheading.as_ref()) {
        canvas.text(
            subheading,
            TextSpec::body("Regular", 24.0, &s.colors.text.secondary)
                .at(pad, y)
                .width(w * 0.5),
        );
    }

    if !c.key_takeaways.is_empty() {
        let box_x = w * 0.58;
        let box_w = w * 0.38;
        let box_h = h - top * 2.0;

        canvas.rect(
            ShapePlacement::new(box_x, top, box_w, box_h, &s.colors.surface)
                .with_radius(s.layout.corner_radius),
        );
        canvas.rect(ShapePlacement::new(box_x, top, 4.0, box_h, &s.colors.primary));
        canvas.label(
            TAKEAWAYS_LABEL,
            box_x + PANEL_INSET,
            top + PANEL_INSET,
            box_w - PANEL_INSET * 2.0,
        );

        for (i, item) in c.key_takeaways.iter().enumerate() {
            let row_y = top + 72.0 + i as f32 * TAKEAWAY_PITCH;
            canvas.dot(box_x + PANEL_INSET, row_y + 10.0, 5.0);
            canvas.text(
                item,
                TextSpec::body("Regular", 17.0, &s.colors.text.primary)
                    .at(box_x + 48.0, row_y)
                    .width(box_w - 76.0)
                    .line_height(1.5),
            );
        }
    }

    if let Some(cta) = present(c.cta.as_ref()) {
        let cta_y = h * 0.72;
        canvas.rect(
            ShapePlacement::new(pad, cta_y, CTA_WIDTH, CTA_HEIGHT, &s.colors.primary)
                .with_radius(4.0),
        );
        canvas.text(
            cta,
            TextSpec::body("Medium", 18.0, &s.colors.text.inverse)
                .at(pad + 24.0, cta_y + 14.0)
                .width(CTA_WIDTH - 48.0),
        );
    }

    if let Some(contact) = present(c.contact_info.as_ref()) {
        canvas.text(
            contact,
            TextSpec::body("Regular", 15.0, &s.colors.text.secondary)
                .at(pad, h - s.layout.content_padding.bottom)
                .width(w * 0.5),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::TAKEAWAYS_LABEL;
    use crate::layout::test_support::{guide, kinds, lay};
    use crate::plan::{ClosingContent, Slide};

    fn closing() -> ClosingContent {
        ClosingContent {
            heading: "Thank you".into(),
            ..ClosingContent::default()
        }
    }

    #[test]
    fn test_minimal_closing() {
        let layout = lay(Slide::Closing(closing()));
        assert_eq!(kinds(&layout), vec!["rect", "text"]);
        assert!(layout.find_text(TAKEAWAYS_LABEL).is_none());
    }

    #[test]
    fn test_takeaways_panel() {
        let layout = lay(Slide::Closing(ClosingContent {
            key_takeaways: vec!["Ship weekly".into(), "Measure".into(), "Iterate".into()],
            ..closing()
        }));
        let label = layout.find_text(TAKEAWAYS_LABEL).expect("label");
        assert!((label.x - (1920.0 * 0.58 + 28.0)).abs() < 1e-3);
        assert_eq!(label.y, 100.0);

        let first = layout.find_text("Ship weekly").expect("first");
        let third = layout.find_text("Iterate").expect("third");
        assert_eq!(first.y, 144.0);
        assert!((third.y - first.y - 104.0).abs() < 1e-3);
        assert_eq!(first.font_size, 17.0);
    }

    #[test]
    fn test_cta_and_contact() {
        let g = guide();
        let layout = lay(Slide::Closing(ClosingContent {
            cta: Some("Book a demo".into()),
            contact_info: Some("hello@example.com".into()),
            ..closing()
        }));
        let cta = layout.find_text("Book a demo").expect("cta");
        assert_eq!(cta.color, g.colors.text.inverse);
        assert!((cta.y - (1080.0 * 0.72 + 14.0)).abs() < 1e-3);
        assert_eq!(cta.width, 352.0);

        let contact = layout.find_text("hello@example.com").expect("contact");
        assert_eq!(contact.y, 1080.0 - 72.0);
    }

    #[test]
    fn test_subheading_follows_heading() {
        let layout = lay(Slide::Closing(ClosingContent {
            tagline: Some("WHAT'S NEXT".into()),
            subheading: Some("Questions welcome".into()),
            ..closing()
        }));
        let heading = layout.find_text("Thank you").expect("heading");
        assert_eq!(heading.y, 104.0);
        let sub = layout.find_text("Questions welcome").expect("subheading");
        assert!((sub.y - (heading.y + heading.height + 20.0)).abs() < 1e-3);
    }
}
