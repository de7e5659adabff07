//! Text measurement for the measure-then-place protocol.
//!
//! Layouts that stack text under variable-length text measure each block
//! before placing the next element. [`ApproxMetrics`] is a deterministic
//! average-advance model; hosts with real font metrics can supply their own
//! [`TextMeasure`].

use serde::{Deserialize, Serialize};

use crate::font::FontDescriptor;

/// Line height multiplier used when a text block does not set one.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Style inputs that affect text extent.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font to measure with.
    pub font: FontDescriptor,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height multiplier, or the default when `None`.
    pub line_height: Option<f32>,
    /// Letter spacing in pixels.
    pub letter_spacing: f32,
}

impl TextStyle {
    /// Distance between baselines in pixels.
    #[must_use]
    pub fn line_pitch(&self) -> f32 {
        self.font_size * self.line_height.unwrap_or(DEFAULT_LINE_HEIGHT)
    }
}

/// Measured size of a wrapped text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextExtent {
    /// Number of lines after wrapping.
    pub lines: usize,
    /// Line pitch in pixels.
    pub line_height: f32,
    /// Total block height in pixels.
    pub height: f32,
}

/// Measures text blocks wrapped to a fixed width.
pub trait TextMeasure: Send + Sync {
    /// Measure `text` set in `style` and wrapped to `width`.
    fn measure(&self, text: &str, style: &TextStyle, width: f32) -> TextExtent;
}

/// Average-advance text metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxMetrics {
    /// Advance of a sans-serif glyph as a fraction of the font size.
    pub sans_advance: f32,
    /// Advance of a serif glyph as a fraction of the font size.
    pub serif_advance: f32,
    /// Advance of a monospace glyph as a fraction of the font size.
    pub mono_advance: f32,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self {
            sans_advance: 0.50,
            serif_advance: 0.52,
            mono_advance: 0.60,
        }
    }
}

impl ApproxMetrics {
    /// Average horizontal advance of one glyph, including letter spacing.
    #[must_use]
    pub fn glyph_advance(&self, style: &TextStyle) -> f32 {
        let base = if style.font.is_monospace() {
            self.mono_advance
        } else if style.font.is_serif() {
            self.serif_advance
        } else {
            self.sans_advance
        };
        let weight = match style.font.style.as_str() {
            "Bold" | "SemiBold" | "Black" | "ExtraBold" => 1.05,
            "Light" | "Thin" | "ExtraLight" => 0.97,
            _ => 1.0,
        };
        (style.font_size * base * weight + style.letter_spacing).max(1.0)
    }

    /// Wrap `text` into the lines this model would produce.
    #[must_use]
    pub fn lines(&self, text: &str, style: &TextStyle, width: f32) -> Vec<String> {
        wrap_lines(text, self.glyph_advance(style), width)
    }
}

impl TextMeasure for ApproxMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, style: &TextStyle, width: f32) -> TextExtent {
        let lines = self.lines(text, style, width).len().max(1);
        let line_height = style.line_pitch();
        TextExtent {
            lines,
            line_height,
            height: lines as f32 * line_height,
        }
    }
}

/// Greedy word wrap with a fixed glyph advance.
///
/// Explicit newlines always break. Words longer than a line are split.
/// Empty input yields a single empty line.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn wrap_lines(text: &str, glyph_advance: f32, width: f32) -> Vec<String> {
    let max_chars = if glyph_advance > 0.0 && width.is_finite() {
        ((width / glyph_advance).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len <= max_chars {
                current.push_str(word);
                current_len = word_len;
            } else {
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_chars).peekable();
                while let Some(chunk) = chunks.next() {
                    let piece: String = chunk.iter().collect();
                    if chunks.peek().is_some() {
                        lines.push(piece);
                    } else {
                        current_len = chunk.len();
                        current = piece;
                    }
                }
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inter(size: f32, line_height: Option<f32>) -> TextStyle {
        TextStyle {
            font: FontDescriptor::new("Inter", "Regular"),
            font_size: size,
            line_height,
            letter_spacing: 0.0,
        }
    }

    #[test]
    fn test_single_line_height() {
        let extent = ApproxMetrics::default().measure("Hello", &inter(20.0, Some(1.5)), 800.0);
        assert_eq!(extent.lines, 1);
        assert!((extent.height - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_line_height() {
        let extent = ApproxMetrics::default().measure("Hi", &inter(10.0, None), 800.0);
        assert!((extent.height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_wraps_to_width() {
        // 10px advance, 100px width: 10 chars per line.
        let lines = wrap_lines("alpha beta gamma delta", 10.0, 100.0);
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn test_newlines_and_empty() {
        assert_eq!(wrap_lines("a\n\nb", 10.0, 100.0), vec!["a", "", "b"]);
        assert_eq!(wrap_lines("", 10.0, 100.0), vec![""]);
    }

    #[test]
    fn test_long_word_is_split() {
        let lines = wrap_lines("abcdefghijklmnop xy", 10.0, 50.0);
        assert_eq!(lines, vec!["abcde", "fghij", "klmno", "p xy"]);
    }

    #[test]
    fn test_longer_text_is_taller() {
        let metrics = ApproxMetrics::default();
        let style = inter(48.0, Some(1.2));
        let short = metrics.measure("Short", &style, 1000.0);
        let long = metrics.measure(&"Much longer heading text ".repeat(6), &style, 1000.0);
        assert!(long.height > short.height);
        assert!(long.lines > 1);
    }

    #[test]
    fn test_monospace_is_wider() {
        let metrics = ApproxMetrics::default();
        let mono = TextStyle {
            font: FontDescriptor::new("JetBrains Mono", "Regular"),
            ..inter(20.0, None)
        };
        assert!(metrics.glyph_advance(&mono) > metrics.glyph_advance(&inter(20.0, None)));
    }
}
