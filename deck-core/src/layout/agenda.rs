//! Numbered agenda.

use super::{SlideCanvas, TextSpec};
use crate::plan::{present, AgendaContent};
use crate::primitive::ShapePlacement;

const ACCENT_WIDTH: f32 = 6.0;
const MAX_ROW_PITCH: f32 = 90.0;
const NUMBER_COLUMN: f32 = 80.0;
const SEPARATOR_OFFSET: f32 = 52.0;
const SEPARATOR_OPACITY: f32 = 0.2;

/// Row pitch for `count` items on a slide of height `h`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn row_pitch(h: f32, count: usize) -> f32 {
    (h * 0.55 / count.max(1) as f32).min(MAX_ROW_PITCH)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn layout(c: &AgendaContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());

    canvas.rect(ShapePlacement::new(0.0, 0.0, ACCENT_WIDTH, h, &s.colors.primary));

    let label = present(c.section_label.as_ref());
    if let Some(label) = label {
        canvas.label(label, pad, pad, 400.0);
    }

    let h2 = &s.typography.heading2;
    canvas.text(
        &c.heading,
        TextSpec::scale(h2, &s.colors.text.primary)
            .at(pad, pad + if label.is_some() { 36.0 } else { 0.0 })
            .width(w * 0.4)
            .letter_spacing(h2.letter_spacing),
    );

    let start_y = h * 0.3;
    let pitch = row_pitch(h, c.items.len());
    let last = c.items.len().saturating_sub(1);

    for (i, item) in c.items.iter().enumerate() {
        let y = start_y + i as f32 * pitch;

        canvas.text(
            &format!("{:02}", i + 1),
            TextSpec::body("Light", 36.0, &s.colors.primary)
                .at(pad, y)
                .width(NUMBER_COLUMN),
        );
        canvas.text(
            item,
            TextSpec::new(
                &s.typography.heading3.font_family,
                "Regular",
                28.0,
                &s.colors.text.primary,
            )
            .at(pad + NUMBER_COLUMN, y + 6.0)
            .width(w * 0.55),
        );

        if i < last {
            canvas.rect(
                ShapePlacement::new(
                    pad,
                    y + SEPARATOR_OFFSET,
                    w - pad * 2.0,
                    1.0,
                    &s.colors.text.secondary,
                )
                .with_opacity(SEPARATOR_OPACITY),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::row_pitch;
    use crate::layout::test_support::{kinds, lay};
    use crate::plan::{AgendaContent, Slide};
    use crate::primitive::Primitive;

    fn agenda(n: usize) -> AgendaContent {
        AgendaContent {
            heading: "Agenda".into(),
            section_label: None,
            items: (1..=n).map(|i| format!("Topic {i}")).collect(),
        }
    }

    #[test]
    fn test_row_pitch_is_capped() {
        assert_eq!(row_pitch(1080.0, 3), 90.0);
        assert!((row_pitch(1080.0, 10) - 59.4).abs() < 1e-3);
        assert_eq!(row_pitch(1080.0, 0), 90.0);
    }

    #[test]
    fn test_minimal_agenda() {
        let layout = lay(Slide::Agenda(agenda(0)));
        assert_eq!(kinds(&layout), vec!["rect", "text"]);
        let heading = layout.find_text("Agenda").expect("heading");
        assert_eq!(heading.y, 96.0);
    }

    #[test]
    fn test_items_numbers_and_separators() {
        let layout = lay(Slide::Agenda(agenda(4)));
        for n in ["01", "02", "03", "04"] {
            assert!(layout.find_text(n).is_some(), "missing {n}");
        }
        let separators = layout
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Rect(r) if r.height == 1.0))
            .count();
        assert_eq!(separators, 3);

        let first = layout.find_text("01").expect("01");
        let second = layout.find_text("02").expect("02");
        assert!((first.y - 324.0).abs() < 1e-3);
        assert!((second.y - first.y - 90.0).abs() < 1e-3);

        let item = layout.find_text("Topic 1").expect("item");
        assert!((item.y - first.y - 6.0).abs() < 1e-3);
        assert_eq!(item.x, 176.0);
    }

    #[test]
    fn test_label_shifts_heading() {
        let layout = lay(Slide::Agenda(AgendaContent {
            section_label: Some("OVERVIEW".into()),
            ..agenda(1)
        }));
        let heading = layout.find_text("Agenda").expect("heading");
        assert_eq!(heading.y, 132.0);
        let label = layout.find_text("OVERVIEW").expect("label");
        assert_eq!(label.letter_spacing, Some(2.0));
    }
}
