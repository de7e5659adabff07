//! Style guides - palette, typography and layout constants for a deck.
//!
//! A [`StyleGuide`] is resolved once per deck from a [`Tone`] and then shared
//! read-only by every slide layout. Body and caption text always use the
//! same sans-serif family; only the heading family follows the tone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DeckError, DeckResult};

/// Family used for body, caption and UI labels regardless of tone.
pub const BODY_FAMILY: &str = "Inter";

/// Aesthetic direction selected for a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Black on white, generous whitespace.
    Minimal,
    /// High-contrast dark theme with a loud accent.
    Bold,
    /// Gold on near-black with a serif display face.
    Luxury,
    /// Print-inspired serif on warm paper.
    Editorial,
    /// Monospace headings on a dark blue ground.
    Technical,
    /// Warm pastel ground with a coral accent.
    Playful,
}

impl Tone {
    /// All tones, in presentation order.
    pub const ALL: [Tone; 6] = [
        Tone::Minimal,
        Tone::Bold,
        Tone::Luxury,
        Tone::Editorial,
        Tone::Technical,
        Tone::Playful,
    ];

    /// Lowercase identifier used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Minimal => "minimal",
            Tone::Bold => "bold",
            Tone::Luxury => "luxury",
            Tone::Editorial => "editorial",
            Tone::Technical => "technical",
            Tone::Playful => "playful",
        }
    }

    /// Heading font family for this tone.
    #[must_use]
    pub fn heading_family(self) -> &'static str {
        match self {
            Tone::Minimal | Tone::Bold | Tone::Playful => "Inter",
            Tone::Luxury => "Playfair Display",
            Tone::Editorial => "Georgia",
            Tone::Technical => "JetBrains Mono",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeckError::InvalidStyle(format!("unknown tone: {s}")))
    }
}

/// Text colors of a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColors {
    /// Main text color.
    pub primary: String,
    /// De-emphasised text color.
    pub secondary: String,
    /// Text drawn on the primary color.
    pub inverse: String,
    /// Accent text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// A named extra swatch carried with the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    /// Swatch name.
    pub name: String,
    /// Hex color.
    pub hex: String,
}

/// Color palette. All colors are `#RRGGBB` hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors {
    /// Brand/accent color.
    pub primary: String,
    /// Darker variant of the primary color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_dark: Option<String>,
    /// Secondary brand color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    /// Slide background.
    pub background: String,
    /// Card and panel fill.
    pub surface: String,
    /// Alternate card fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_alt: Option<String>,
    /// Text colors.
    pub text: TextColors,
    /// Extra swatches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<NamedColor>,
}

/// One typographic scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    /// Font family name.
    pub font_family: String,
    /// Font style name (e.g. `Bold`).
    pub font_style: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Letter spacing in pixels.
    pub letter_spacing: f32,
}

impl TypeScale {
    fn new(family: &str, style: &str, size: f32, line_height: f32, letter_spacing: f32) -> Self {
        Self {
            font_family: family.to_string(),
            font_style: style.to_string(),
            font_size: size,
            line_height,
            letter_spacing,
        }
    }
}

/// The six named type scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Slide titles.
    pub heading1: TypeScale,
    /// Section headings.
    pub heading2: TypeScale,
    /// Card and column headings.
    pub heading3: TypeScale,
    /// Running text.
    pub body: TypeScale,
    /// Small print.
    pub caption: TypeScale,
    /// Oversized display text.
    pub display: TypeScale,
}

impl Typography {
    /// Iterate over all scales with their names.
    pub fn scales(&self) -> impl Iterator<Item = (&'static str, &TypeScale)> {
        [
            ("heading1", &self.heading1),
            ("heading2", &self.heading2),
            ("heading3", &self.heading3),
            ("body", &self.body),
            ("caption", &self.caption),
            ("display", &self.display),
        ]
        .into_iter()
    }
}

/// Padding around slide content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Top padding.
    pub top: f32,
    /// Right padding.
    pub right: f32,
    /// Bottom padding.
    pub bottom: f32,
    /// Left padding.
    pub left: f32,
}

/// Canvas and spacing constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Slide frame width.
    pub slide_width: f32,
    /// Slide frame height.
    pub slide_height: f32,
    /// Content padding.
    pub content_padding: Padding,
    /// Height reserved for slide headers.
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    /// Gap between columns and cards.
    pub column_gap: f32,
    /// Gap between list items.
    pub item_gap: f32,
    /// Corner radius of cards and panels.
    pub corner_radius: f32,
    /// Horizontal gap between slide frames on the canvas.
    pub frame_spacing: f32,
}

fn default_header_height() -> f32 {
    120.0
}

/// Background treatment tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    /// Flat fill.
    Solid,
    /// Linear gradient.
    Gradient,
    /// Mesh gradient.
    Mesh,
}

/// Aesthetic metadata carried with the style guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aesthetic {
    /// Tone the guide was built for.
    pub direction: Tone,
    /// Background treatment.
    pub background_style: BackgroundStyle,
    /// Motion style tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_style: Option<String>,
}

/// A complete, immutable style guide for one deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleGuide {
    /// Color palette.
    pub colors: Colors,
    /// Type scales.
    pub typography: Typography,
    /// Canvas and spacing constants.
    pub layout: Layout,
    /// Aesthetic metadata.
    pub aesthetic: Aesthetic,
}

/// Resolve the style guide for a tone.
#[must_use]
pub fn build_style_guide(tone: Tone) -> StyleGuide {
    StyleGuide::for_tone(tone)
}

fn palette(tone: Tone) -> Colors {
    let (primary, background, surface, text, secondary, inverse, accent) = match tone {
        Tone::Minimal => (
            "#1A1A1A", "#FFFFFF", "#F5F5F5", "#1A1A1A", "#666666", "#FFFFFF", "#1A1A1A",
        ),
        Tone::Bold => (
            "#FF3B00", "#0A0A0A", "#1A1A1A", "#FFFFFF", "#999999", "#0A0A0A", "#FF3B00",
        ),
        Tone::Luxury => (
            "#C9A96E", "#0D0D0D", "#1A1A1A", "#F5F0E8", "#9A8A6E", "#0D0D0D", "#C9A96E",
        ),
        Tone::Editorial => (
            "#2B2B2B", "#F8F6F1", "#EEECE7", "#2B2B2B", "#6B6B6B", "#F8F6F1", "#CC3333",
        ),
        Tone::Technical => (
            "#00D4FF", "#0F0F1A", "#1A1A2E", "#E0E0E0", "#8888AA", "#0F0F1A", "#00D4FF",
        ),
        Tone::Playful => (
            "#FF6B6B", "#FFF9F0", "#FFF0E0", "#2D2D2D", "#777777", "#FFFFFF", "#FF6B6B",
        ),
    };

    Colors {
        primary: primary.to_string(),
        primary_dark: None,
        secondary: None,
        background: background.to_string(),
        surface: surface.to_string(),
        surface_alt: None,
        text: TextColors {
            primary: text.to_string(),
            secondary: secondary.to_string(),
            inverse: inverse.to_string(),
            accent: Some(accent.to_string()),
        },
        extras: Vec::new(),
    }
}

impl StyleGuide {
    /// Build the fixed style guide for a tone.
    #[must_use]
    pub fn for_tone(tone: Tone) -> Self {
        let heading = tone.heading_family();

        Self {
            colors: palette(tone),
            typography: Typography {
                heading1: TypeScale::new(heading, "Bold", 72.0, 1.1, -2.0),
                heading2: TypeScale::new(heading, "Bold", 48.0, 1.2, -1.2),
                heading3: TypeScale::new(heading, "SemiBold", 30.0, 1.35, -0.4),
                body: TypeScale::new(BODY_FAMILY, "Regular", 20.0, 1.65, 0.0),
                caption: TypeScale::new(BODY_FAMILY, "Regular", 14.0, 1.5, 0.1),
                display: TypeScale::new(heading, "Light", 96.0, 1.0, -3.0),
            },
            layout: Layout {
                slide_width: 1920.0,
                slide_height: 1080.0,
                content_padding: Padding {
                    top: 72.0,
                    right: 96.0,
                    bottom: 72.0,
                    left: 96.0,
                },
                header_height: 120.0,
                column_gap: 48.0,
                item_gap: 24.0,
                corner_radius: 8.0,
                frame_spacing: 80.0,
            },
            aesthetic: Aesthetic {
                direction: tone,
                background_style: BackgroundStyle::Solid,
                motion_style: Some("dynamic".to_string()),
            },
        }
    }

    /// Parse a style guide from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the guide is invalid.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        let guide: Self = serde_json::from_str(json)?;
        guide.validate()?;
        Ok(guide)
    }

    /// Check colors, canvas size and type scales.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidStyle`] naming the first offending field.
    pub fn validate(&self) -> DeckResult<()> {
        let c = &self.colors;
        let required = [
            ("colors.primary", Some(&c.primary)),
            ("colors.background", Some(&c.background)),
            ("colors.surface", Some(&c.surface)),
            ("colors.text.primary", Some(&c.text.primary)),
            ("colors.text.secondary", Some(&c.text.secondary)),
            ("colors.text.inverse", Some(&c.text.inverse)),
            ("colors.text.accent", c.text.accent.as_ref()),
            ("colors.primaryDark", c.primary_dark.as_ref()),
            ("colors.secondary", c.secondary.as_ref()),
            ("colors.surfaceAlt", c.surface_alt.as_ref()),
        ];
        for (field, value) in required {
            if let Some(hex) = value {
                if !is_hex_color(hex) {
                    return Err(DeckError::InvalidStyle(format!(
                        "{field} is not a #RRGGBB color: {hex}"
                    )));
                }
            }
        }
        for extra in &c.extras {
            if !is_hex_color(&extra.hex) {
                return Err(DeckError::InvalidStyle(format!(
                    "extra color {} is not a #RRGGBB color: {}",
                    extra.name, extra.hex
                )));
            }
        }

        if self.layout.slide_width <= 0.0 || self.layout.slide_height <= 0.0 {
            return Err(DeckError::InvalidStyle(
                "slide dimensions must be positive".to_string(),
            ));
        }

        for (name, scale) in self.typography.scales() {
            if scale.font_size <= 0.0 {
                return Err(DeckError::InvalidStyle(format!(
                    "typography.{name}.fontSize must be positive"
                )));
            }
            if scale.font_family.trim().is_empty() {
                return Err(DeckError::InvalidStyle(format!(
                    "typography.{name}.fontFamily is empty"
                )));
            }
        }

        Ok(())
    }
}

/// Check for a `#RRGGBB` hex color.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tone_builds_valid_guide() {
        for tone in Tone::ALL {
            let guide = build_style_guide(tone);
            guide.validate().expect("built-in guide should validate");
            assert_eq!(guide.aesthetic.direction, tone);
            assert!(guide.colors.text.accent.is_some());
        }
    }

    #[test]
    fn test_heading_family_consistent_and_body_fixed() {
        for tone in Tone::ALL {
            let t = build_style_guide(tone).typography;
            assert_eq!(t.heading1.font_family, t.heading2.font_family);
            assert_eq!(t.heading2.font_family, t.heading3.font_family);
            assert_eq!(t.heading1.font_family, tone.heading_family());
            assert_eq!(t.body.font_family, BODY_FAMILY);
            assert_eq!(t.caption.font_family, BODY_FAMILY);
        }
    }

    #[test]
    fn test_layout_constants() {
        let layout = build_style_guide(Tone::Bold).layout;
        assert_eq!(layout.slide_width, 1920.0);
        assert_eq!(layout.slide_height, 1080.0);
        assert_eq!(layout.content_padding.left, 96.0);
        assert_eq!(layout.content_padding.top, 72.0);
        assert_eq!(layout.frame_spacing, 80.0);
    }

    #[test]
    fn test_tone_from_str() {
        assert_eq!("Luxury".parse::<Tone>().expect("tone"), Tone::Luxury);
        assert!("neon".parse::<Tone>().is_err());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_string(&build_style_guide(Tone::Technical)).expect("json");
        assert!(json.contains("\"slideWidth\":1920"));
        assert!(json.contains("\"fontFamily\":\"JetBrains Mono\""));
        assert!(json.contains("\"direction\":\"technical\""));

        let back = StyleGuide::from_json(&json).expect("parse");
        assert_eq!(back, build_style_guide(Tone::Technical));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let mut guide = build_style_guide(Tone::Minimal);
        guide.colors.surface = "grey".to_string();
        let err = guide.validate().unwrap_err();
        assert!(err.to_string().contains("colors.surface"));
    }

    #[test]
    fn test_validate_rejects_zero_font_size() {
        let mut guide = build_style_guide(Tone::Minimal);
        guide.typography.caption.font_size = 0.0;
        assert!(guide.validate().is_err());
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#00D4FF"));
        assert!(!is_hex_color("00D4FF"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
