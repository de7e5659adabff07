//! Opening slide.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, HeroContent};
use crate::primitive::ShapePlacement;

const ACCENT_WIDTH: f32 = 8.0;
const CIRCLE_SIZE: f32 = 600.0;
const CIRCLE_INSET: f32 = 500.0;
const CIRCLE_OPACITY: f32 = 0.07;
const SUBTITLE_GAP: f32 = 24.0;

pub(crate) fn layout(c: &HeroContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());

    canvas.rect(ShapePlacement::new(0.0, 0.0, ACCENT_WIDTH, h, &s.colors.primary));
    canvas.ellipse(
        ShapePlacement::new(
            w - CIRCLE_INSET,
            h - CIRCLE_INSET,
            CIRCLE_SIZE,
            CIRCLE_SIZE,
            &s.colors.primary,
        )
        .with_opacity(CIRCLE_OPACITY),
    );

    if let Some(tagline) = present(c.tagline.as_ref()) {
        let size = if s.layout.content_padding.top <= 60.0 {
            13.0
        } else {
            14.0
        };
        let spec = TextSpec::body("Medium", size, &s.colors.primary)
            .at(pad, h * 0.25)
            .width(w - pad * 2.0)
            .letter_spacing(2.0)
            .named("tagline");
        canvas.text(tagline, spec);
    }

    let h1 = &s.typography.heading1;
    let title_y = h * 0.35;
    let title_height = canvas.text(
        &c.title,
        TextSpec::scale(h1, &s.colors.text.primary)
            .at(pad, title_y)
            .width(w * 0.7)
            .line_height(h1.line_height)
            .letter_spacing(h1.letter_spacing)
            .named("title"),
    );

    if !c.subtitle.is_empty() {
        let spec = TextSpec::new(
            &s.typography.heading2.font_family,
            "Regular",
            32.0,
            &s.colors.text.secondary,
        )
        .at(pad, title_y + title_height + SUBTITLE_GAP)
        .width(w * 0.6)
        .line_height(1.3);
        canvas.text(&c.subtitle, spec);
    }

    canvas.rect(ShapePlacement::new(pad, h * 0.75, 80.0, 3.0, &s.colors.primary));

    let meta_y = h * 0.77;
    if let Some(author) = present(c.author.as_ref()) {
        let spec = TextSpec::body("Medium", 18.0, &s.colors.text.primary)
            .at(pad, meta_y)
            .width(400.0);
        canvas.text(author, spec);
    }
    if let Some(date) = present(c.date.as_ref()) {
        let spec = TextSpec::body("Regular", 16.0, &s.colors.text.secondary)
            .at(pad, meta_y + 28.0)
            .width(300.0);
        canvas.text(date, spec);
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::test_support::{guide, kinds, lay};
    use crate::plan::{HeroContent, Slide};
    use crate::primitive::Primitive;

    fn minimal() -> HeroContent {
        HeroContent {
            title: "Quarterly Review".into(),
            subtitle: "What we shipped".into(),
            ..HeroContent::default()
        }
    }

    #[test]
    fn test_minimal_hero_emits_only_mandatory_elements() {
        let layout = lay(Slide::Hero(minimal()));
        assert_eq!(kinds(&layout), vec!["rect", "ellipse", "text", "text", "rect"]);
        assert!(layout.texts().all(|t| t.name.as_deref() != Some("tagline")));
        assert_eq!(layout.background, guide().colors.background);
    }

    #[test]
    fn test_subtitle_follows_measured_title() {
        let short = lay(Slide::Hero(minimal()));
        let long = lay(Slide::Hero(HeroContent {
            title: "An extremely long title that certainly wraps across several lines of the hero slide"
                .into(),
            ..minimal()
        }));

        let title = long
            .texts()
            .find(|t| t.name.as_deref() == Some("title"))
            .expect("title");
        assert!(title.height > 72.0 * 1.1 * 1.5);
        let subtitle = long.find_text("What we shipped").expect("subtitle");
        assert!((subtitle.y - (title.y + title.height + 24.0)).abs() < 1e-3);

        let short_sub = short.find_text("What we shipped").expect("subtitle");
        assert!(subtitle.y > short_sub.y);
    }

    #[test]
    fn test_full_hero() {
        let layout = lay(Slide::Hero(HeroContent {
            tagline: Some("ANNUAL KICKOFF".into()),
            author: Some("Dana Reyes".into()),
            date: Some("March 2025".into()),
            ..minimal()
        }));
        assert_eq!(layout.primitives.len(), 8);

        let g = guide();
        let tagline = layout.find_text("ANNUAL KICKOFF").expect("tagline");
        assert_eq!(tagline.name.as_deref(), Some("tagline"));
        assert_eq!(tagline.font_size, 14.0);
        assert!((tagline.y - 1080.0 * 0.25).abs() < 1e-3);

        let date = layout.find_text("March 2025").expect("date");
        let author = layout.find_text("Dana Reyes").expect("author");
        assert!((date.y - author.y - 28.0).abs() < 1e-3);
        assert_eq!(date.color, g.colors.text.secondary);
    }

    #[test]
    fn test_decorative_circle() {
        let layout = lay(Slide::Hero(minimal()));
        let Primitive::Ellipse(circle) = &layout.primitives[1] else {
            panic!("expected ellipse");
        };
        assert_eq!((circle.x, circle.y), (1420.0, 580.0));
        assert_eq!(circle.width, 600.0);
        assert!((circle.opacity - 0.07).abs() < f32::EPSILON);
    }

    #[test]
    fn test_title_width_capped() {
        let layout = lay(Slide::Hero(minimal()));
        let title = layout.find_text("Quarterly Review").expect("title");
        assert!((title.width - 1920.0 * 0.7).abs() < 1e-3);
        assert_eq!(title.name.as_deref(), Some("title"));
    }
}
