//! Slide plan schema - the structured deck description produced by the planner.
//!
//! Slides are a closed sum type: a plan naming an unknown slide type fails to
//! parse instead of silently dropping the slide.
//!
//! ## Example plan JSON
//!
//! ```json
//! {
//!   "title": "Q3 Review",
//!   "aesthetic": "bold",
//!   "tone": "bold",
//!   "audience": "executives",
//!   "slideCount": 2,
//!   "slides": [
//!     { "type": "HERO", "content": { "title": "Q3 Review", "subtitle": "Numbers" } },
//!     { "type": "CLOSING", "content": { "heading": "Thanks" } }
//!   ]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::style::Tone;

/// Label drawn in the image placeholder when the hint is absent or empty.
pub const IMAGE_FALLBACK_LABEL: &str = "Image / Visual";

/// Errors raised while turning planner output into a [`SlidesPlan`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// No `{...}` object was found in the response text.
    #[error("Claude returned invalid JSON response")]
    NoJsonObject,

    /// The object was found but does not match the plan schema.
    #[error("Failed to parse slide plan from Claude response: {0}")]
    Parse(#[source] serde_json::Error),

    /// The plan contains no slides.
    #[error("Slide plan has no slides")]
    Empty,
}

/// Intended audience of the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Executive stakeholders.
    Executives,
    /// Engineering teams.
    Engineers,
    /// Customers and prospects.
    Customers,
    /// Anyone.
    #[default]
    General,
}

impl Audience {
    /// All audiences.
    pub const ALL: [Audience; 4] = [
        Audience::Executives,
        Audience::Engineers,
        Audience::Customers,
        Audience::General,
    ];

    /// Lowercase identifier used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Executives => "executives",
            Audience::Engineers => "engineers",
            Audience::Customers => "customers",
            Audience::General => "general",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Audience::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown audience: {s}"))
    }
}

/// Slide type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideType {
    /// Opening slide.
    Hero,
    /// Numbered table of contents.
    Agenda,
    /// Heading, body, bullets and an optional visual.
    Content,
    /// Two-column comparison.
    TwoCol,
    /// KPI cards.
    Stats,
    /// Full-bleed quotation.
    Quote,
    /// Section separator.
    Divider,
    /// Final slide.
    Closing,
}

impl SlideType {
    /// Wire tag, e.g. `TWO_COL`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SlideType::Hero => "HERO",
            SlideType::Agenda => "AGENDA",
            SlideType::Content => "CONTENT",
            SlideType::TwoCol => "TWO_COL",
            SlideType::Stats => "STATS",
            SlideType::Quote => "QUOTE",
            SlideType::Divider => "DIVIDER",
            SlideType::Closing => "CLOSING",
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening slide content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Deck title.
    pub title: String,
    /// Line under the title. Empty means omitted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    /// Small caps line above the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Presenter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Presentation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Agenda slide content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaContent {
    /// Slide heading.
    pub heading: String,
    /// Small caps label above the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    /// Agenda entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

/// Image placeholder hint of a content slide.
///
/// The wire format distinguishes a missing field, a string, and an explicit
/// `null`: missing or empty draws the placeholder with a fallback label,
/// `null` suppresses the placeholder entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageHint {
    /// Field not present in the plan.
    #[default]
    Absent,
    /// Field present with a (possibly empty) description.
    Text(String),
    /// Field present as `null`.
    Suppressed,
}

impl ImageHint {
    /// Whether the field was missing.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, ImageHint::Absent)
    }

    /// Label for the placeholder region, or `None` when no placeholder is drawn.
    #[must_use]
    pub fn placeholder_label(&self) -> Option<&str> {
        match self {
            ImageHint::Suppressed => None,
            ImageHint::Absent => Some(IMAGE_FALLBACK_LABEL),
            ImageHint::Text(text) if text.is_empty() => Some(IMAGE_FALLBACK_LABEL),
            ImageHint::Text(text) => Some(text),
        }
    }
}

impl Serialize for ImageHint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ImageHint::Text(text) => serializer.serialize_str(text),
            ImageHint::Absent | ImageHint::Suppressed => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ImageHint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only called when the field is present; a missing field uses Default.
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(text) => ImageHint::Text(text),
            None => ImageHint::Suppressed,
        })
    }
}

/// Content slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSlide {
    /// Small caps label above the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    /// Slide heading.
    pub heading: String,
    /// Paragraph under the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Bullet points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
    /// Image placeholder hint.
    #[serde(default, skip_serializing_if = "ImageHint::is_absent")]
    pub image_hint: ImageHint,
}

/// One column of a two-column slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column heading.
    pub heading: String,
    /// Column paragraph. Carried but not drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Column bullets.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

/// Two-column comparison slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoColContent {
    /// Small caps label above the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    /// Slide heading.
    pub heading: String,
    /// Left column.
    pub left_col: Column,
    /// Right column.
    pub right_col: Column,
}

/// One KPI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    /// Headline figure, e.g. `42%`.
    pub number: String,
    /// What the figure measures.
    pub label: String,
    /// Direction of change, e.g. `+12% YoY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    /// Supporting sentence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stats slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsContent {
    /// Small caps label above the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    /// Slide heading.
    pub heading: String,
    /// KPIs. Only the first four are drawn.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Vec<StatItem>,
}

/// Quote slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteContent {
    /// Quotation without surrounding marks.
    pub quote: String,
    /// Who said it.
    pub attribution: String,
    /// Role of the speaker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Background hint. Carried but not drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Section divider slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerContent {
    /// Section number shown as a watermark. Accepts `2` or `"02"`.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub section_number: u32,
    /// Section title.
    pub section_title: String,
    /// Line under the accent rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Closing slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingContent {
    /// Small caps line above the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Slide heading.
    pub heading: String,
    /// Line under the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    /// Entries of the takeaways panel.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_takeaways: Vec<String>,
    /// Call-to-action button text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    /// Contact line at the bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
}

/// A slide: type tag plus the matching content payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Slide {
    /// Opening slide.
    Hero(HeroContent),
    /// Table of contents.
    Agenda(AgendaContent),
    /// Article section.
    Content(ContentSlide),
    /// Comparison.
    TwoCol(TwoColContent),
    /// KPI dashboard.
    Stats(StatsContent),
    /// Quotation.
    Quote(QuoteContent),
    /// Section separator.
    Divider(DividerContent),
    /// Final slide.
    Closing(ClosingContent),
}

impl Slide {
    /// The type tag of this slide.
    #[must_use]
    pub fn slide_type(&self) -> SlideType {
        match self {
            Slide::Hero(_) => SlideType::Hero,
            Slide::Agenda(_) => SlideType::Agenda,
            Slide::Content(_) => SlideType::Content,
            Slide::TwoCol(_) => SlideType::TwoCol,
            Slide::Stats(_) => SlideType::Stats,
            Slide::Quote(_) => SlideType::Quote,
            Slide::Divider(_) => SlideType::Divider,
            Slide::Closing(_) => SlideType::Closing,
        }
    }
}

/// The whole deck as planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidesPlan {
    /// Deck title; also names the host page.
    pub title: String,
    /// Aesthetic direction.
    pub aesthetic: Tone,
    /// Free-form tone description.
    #[serde(default)]
    pub tone: String,
    /// Intended audience.
    #[serde(default)]
    pub audience: Audience,
    /// Declared slide count. Informational only; `slides.len()` is authoritative.
    #[serde(default)]
    pub slide_count: usize,
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl SlidesPlan {
    /// Parse a plan from a bare JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Parse`] if the JSON does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        serde_json::from_str(json).map_err(PlanError::Parse)
    }

    /// Reject empty plans and report a declared/actual count mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Empty`] if there are no slides.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.slides.is_empty() {
            return Err(PlanError::Empty);
        }
        if self.slide_count != self.slides.len() {
            tracing::warn!(
                declared = self.slide_count,
                actual = self.slides.len(),
                "Plan slideCount does not match slides; using actual count"
            );
        }
        Ok(())
    }
}

/// Extract and parse the first top-level JSON object in `text`.
///
/// Accepts responses that wrap the object in prose or code fences.
///
/// # Errors
///
/// Returns [`PlanError::NoJsonObject`] if no balanced object is present and
/// [`PlanError::Parse`] if it does not match the schema.
pub fn extract_plan(text: &str) -> Result<SlidesPlan, PlanError> {
    let span = find_json_object(text).ok_or(PlanError::NoJsonObject)?;
    SlidesPlan::from_json(span)
}

/// Locate the first balanced `{...}` span, ignoring braces inside strings.
#[must_use]
pub fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid section number: {text:?}"))
        }),
    }
}

/// Non-empty view of an optional field.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{"title":"X","aesthetic":"bold","tone":"bold","audience":"engineers","slideCount":1,"slides":[{"type":"HERO","content":{"title":"X","subtitle":"Y"}}]}"#;

    #[test]
    fn test_fenced_and_bare_plans_match() {
        let fenced = format!("Here is the plan:\n```json\n{BARE}\n```");
        let a = extract_plan(BARE).expect("bare");
        let b = extract_plan(&fenced).expect("fenced");
        assert_eq!(a, b);
        assert_eq!(a.audience, Audience::Engineers);
    }

    #[test]
    fn test_no_object_is_reported() {
        let err = extract_plan("I cannot help with that.").unwrap_err();
        assert!(matches!(err, PlanError::NoJsonObject));
    }

    #[test]
    fn test_unbalanced_object_is_reported() {
        let err = extract_plan("{\"title\": \"X\"").unwrap_err();
        assert!(matches!(err, PlanError::NoJsonObject));
    }

    #[test]
    fn test_schema_mismatch_is_parse_error() {
        let err = extract_plan("{\"hello\": 1}").unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn test_braces_in_strings_are_ignored() {
        let text = r#"note {"a": "}{", "b": {"c": "\"}"}} trailing {"x":1}"#;
        assert_eq!(
            find_json_object(text),
            Some(r#"{"a": "}{", "b": {"c": "\"}"}}"#)
        );
    }

    #[test]
    fn test_unknown_slide_type_is_rejected() {
        let json = r#"{"title":"X","aesthetic":"bold","slides":[{"type":"TIMELINE","content":{}}]}"#;
        let err = SlidesPlan::from_json(json).unwrap_err();
        assert!(err.to_string().contains("TIMELINE"));
    }

    #[test]
    fn test_two_col_tag() {
        let json = r#"{"type":"TWO_COL","content":{"heading":"H","leftCol":{"heading":"L","bullets":["a"]},"rightCol":{"heading":"R"}}}"#;
        let slide: Slide = serde_json::from_str(json).expect("slide");
        assert_eq!(slide.slide_type(), SlideType::TwoCol);
        assert_eq!(slide.slide_type().to_string(), "TWO_COL");
    }

    #[test]
    fn test_image_hint_three_states() {
        let absent: ContentSlide = serde_json::from_str(r#"{"heading":"H"}"#).expect("absent");
        let empty: ContentSlide =
            serde_json::from_str(r#"{"heading":"H","imageHint":""}"#).expect("empty");
        let null: ContentSlide =
            serde_json::from_str(r#"{"heading":"H","imageHint":null}"#).expect("null");
        let text: ContentSlide =
            serde_json::from_str(r#"{"heading":"H","imageHint":"Team photo"}"#).expect("text");

        assert_eq!(absent.image_hint, ImageHint::Absent);
        assert_eq!(empty.image_hint, ImageHint::Text(String::new()));
        assert_eq!(null.image_hint, ImageHint::Suppressed);

        assert_eq!(absent.image_hint.placeholder_label(), Some(IMAGE_FALLBACK_LABEL));
        assert_eq!(empty.image_hint.placeholder_label(), Some(IMAGE_FALLBACK_LABEL));
        assert_eq!(null.image_hint.placeholder_label(), None);
        assert_eq!(text.image_hint.placeholder_label(), Some("Team photo"));
    }

    #[test]
    fn test_image_hint_serialization_keeps_state() {
        let null = ContentSlide {
            heading: "H".into(),
            image_hint: ImageHint::Suppressed,
            ..ContentSlide::default()
        };
        let json = serde_json::to_string(&null).expect("json");
        assert!(json.contains("\"imageHint\":null"));

        let absent = ContentSlide {
            heading: "H".into(),
            ..ContentSlide::default()
        };
        let json = serde_json::to_string(&absent).expect("json");
        assert!(!json.contains("imageHint"));
    }

    #[test]
    fn test_null_lists_and_trend() {
        let json = r#"{"heading":"H","stats":[{"number":"1","label":"L","trend":null}]}"#;
        let stats: StatsContent = serde_json::from_str(json).expect("stats");
        assert_eq!(stats.stats[0].trend, None);

        let json = r#"{"heading":"H","bullets":null}"#;
        let content: ContentSlide = serde_json::from_str(json).expect("content");
        assert!(content.bullets.is_empty());
    }

    #[test]
    fn test_validate_empty_plan() {
        let plan = SlidesPlan {
            title: "X".into(),
            aesthetic: Tone::Minimal,
            tone: String::new(),
            audience: Audience::General,
            slide_count: 0,
            slides: Vec::new(),
        };
        assert!(matches!(plan.validate(), Err(PlanError::Empty)));
    }

    #[test]
    fn test_validate_tolerates_count_mismatch() {
        let mut plan = extract_plan(BARE).expect("plan");
        plan.slide_count = 12;
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_audience_from_str() {
        assert_eq!("Executives".parse::<Audience>(), Ok(Audience::Executives));
        assert!("investors".parse::<Audience>().is_err());
    }

    #[test]
    fn test_present_filters_empty_only() {
        let empty = Some(String::new());
        let blank = Some("  ".to_string());
        let text = Some("x".to_string());
        assert_eq!(present(empty.as_ref()), None);
        assert_eq!(present(blank.as_ref()), Some("  "));
        assert_eq!(present(text.as_ref()), Some("x"));
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_section_number_accepts_numeric_string() {
        let quoted: DividerContent =
            serde_json::from_str(r#"{"sectionNumber": "02", "sectionTitle": "Results"}"#)
                .expect("quoted number");
        assert_eq!(quoted.section_number, 2);

        let plain: DividerContent =
            serde_json::from_str(r#"{"sectionNumber": 7, "sectionTitle": "Results"}"#)
                .expect("number");
        assert_eq!(plain.section_number, 7);

        let bad = serde_json::from_str::<DividerContent>(
            r#"{"sectionNumber": "two", "sectionTitle": "Results"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_plan_with_quoted_section_number_parses() {
        let text = r#"{"title":"X","aesthetic":"bold","slides":[{"type":"DIVIDER","content":{"sectionNumber":"02","sectionTitle":"Results"}}]}"#;
        let plan = extract_plan(text).expect("plan");
        assert!(matches!(
            &plan.slides[0],
            Slide::Divider(DividerContent { section_number: 2, .. })
        ));
    }
}
