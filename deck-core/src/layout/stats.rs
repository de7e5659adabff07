//! Up to four metric cards.

use super::two_col::header;
use super::{SlideCanvas, TextSpec};
use crate::plan::{present, StatItem, StatsContent};
use crate::primitive::ShapePlacement;

/// Cards beyond this count are dropped.
pub(crate) const MAX_STAT_CARDS: usize = 4;

const CARD_INSET: f32 = 28.0;

/// Width of each of `count` cards sharing `available` width.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn card_width(available: f32, gap: f32, count: usize) -> f32 {
    let n = count.max(1) as f32;
    (available - (n - 1.0) * gap) / n
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn layout(c: &StatsContent, canvas: &mut SlideCanvas<'_>) {
    let s = canvas.style;
    let (w, h, pad) = (canvas.w(), canvas.h(), canvas.pad());

    canvas.rect(ShapePlacement::new(0.0, 0.0, w, 6.0, &s.colors.primary));
    header(canvas, c.section_label.as_ref(), &c.heading);

    if c.stats.len() > MAX_STAT_CARDS {
        tracing::debug!(
            stats = c.stats.len(),
            kept = MAX_STAT_CARDS,
            "Truncating stat cards"
        );
    }

    let stats = &c.stats[..c.stats.len().min(MAX_STAT_CARDS)];
    if stats.is_empty() {
        return;
    }

    let gap = s.layout.column_gap;
    let card_y = h * 0.38;
    let card_h = h - card_y - pad;
    let card_w = card_width(w - pad * 2.0, gap, stats.len());

    for (i, stat) in stats.iter().enumerate() {
        let card_x = pad + i as f32 * (card_w + gap);
        card(canvas, stat, card_x, card_y, card_w, card_h);
    }
}

fn card(canvas: &mut SlideCanvas<'_>, stat: &StatItem, x: f32, y: f32, width: f32, height: f32) {
    let s = canvas.style;
    let inner = width - CARD_INSET * 2.0;
    let tx = x + CARD_INSET;

    canvas.rect(
        ShapePlacement::new(x, y, width, height, &s.colors.surface)
            .with_radius(s.layout.corner_radius),
    );
    canvas.rect(ShapePlacement::new(x, y, width, 4.0, &s.colors.primary));

    let h1 = &s.typography.heading1;
    canvas.text(
        &stat.number,
        TextSpec::new(&h1.font_family, &h1.font_style, 64.0, &s.colors.primary)
            .at(tx, y + CARD_INSET)
            .width(inner),
    );

    if let Some(trend) = present(stat.trend.as_ref()) {
        canvas.text(
            trend,
            TextSpec::body("Medium", 14.0, &s.colors.text.secondary)
                .at(tx, y + 108.0)
                .width(inner)
                .letter_spacing(1.0),
        );
    }

    canvas.text(
        &stat.label,
        TextSpec::new(
            &s.typography.heading3.font_family,
            "SemiBold",
            20.0,
            &s.colors.text.primary,
        )
        .at(tx, y + 140.0)
        .width(inner),
    );

    if let Some(description) = present(stat.description.as_ref()) {
        canvas.text(
            description,
            TextSpec::body("Regular", 15.0, &s.colors.text.secondary)
                .at(tx, y + 172.0)
                .width(inner)
                .line_height(1.4),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::card_width;
    use crate::layout::test_support::{kinds, lay};
    use crate::plan::{Slide, StatItem, StatsContent};
    use crate::primitive::Primitive;

    fn stats(n: usize) -> Slide {
        Slide::Stats(StatsContent {
            section_label: None,
            heading: "By the numbers".into(),
            stats: (1..=n)
                .map(|i| StatItem {
                    number: format!("{i}0%"),
                    label: format!("Metric {i}"),
                    trend: None,
                    description: None,
                })
                .collect(),
        })
    }

    fn cards(slide: Slide) -> Vec<(f32, f32)> {
        lay(slide)
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect(r) if r.height > 100.0 => Some((r.x, r.width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_six_stats_truncate_to_four_cards() {
        let cards = cards(stats(6));
        assert_eq!(cards.len(), 4);
        let expected = (1920.0 - 2.0 * 96.0 - 3.0 * 48.0) / 4.0;
        assert_eq!(expected, 396.0);
        for (i, (x, w)) in cards.iter().enumerate() {
            assert!((w - expected).abs() < 1e-3);
            #[allow(clippy::cast_precision_loss)]
            let want = 96.0 + i as f32 * (396.0 + 48.0);
            assert!((x - want).abs() < 1e-3);
        }
        let layout = lay(stats(6));
        assert!(layout.find_text("50%").is_none());
    }

    #[test]
    fn test_zero_stats_emit_no_cards() {
        let layout = lay(stats(0));
        assert_eq!(kinds(&layout), vec!["rect", "text"]);
    }

    #[test]
    fn test_single_card_spans_width() {
        assert_eq!(cards(stats(1)), vec![(96.0, 1728.0)]);
        assert_eq!(card_width(1728.0, 48.0, 2), 840.0);
    }

    #[test]
    fn test_card_offsets() {
        let layout = lay(Slide::Stats(StatsContent {
            section_label: None,
            heading: "KPIs".into(),
            stats: vec![StatItem {
                number: "3x".into(),
                label: "Throughput".into(),
                trend: Some("UP 12%".into()),
                description: Some("Since launch".into()),
            }],
        }));
        let top = 1080.0 * 0.38;
        let number = layout.find_text("3x").expect("number");
        assert_eq!(number.font_size, 64.0);
        assert!((number.y - (top + 28.0)).abs() < 1e-3);
        assert!((layout.find_text("UP 12%").expect("trend").y - (top + 108.0)).abs() < 1e-3);
        assert!((layout.find_text("Throughput").expect("label").y - (top + 140.0)).abs() < 1e-3);
        let description = layout.find_text("Since launch").expect("description");
        assert!((description.y - (top + 172.0)).abs() < 1e-3);
        assert_eq!(description.width, 1728.0 - 56.0);
    }
}
