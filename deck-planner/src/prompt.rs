//! Prompt text sent to the planning model.

use std::fmt::Write;

use deck_core::StyleGuide;

use crate::request::PlanRequest;

/// Fixed system instruction for every planning request.
pub const SYSTEM_PROMPT: &str = "You are an expert presentation designer who creates visually stunning slide decks.
You think of each slide as a full-screen web section (1920x1080px): a landing page hero, a feature section, a stats dashboard or a testimonial block.

Your slides must have:
- Strong visual hierarchy
- Bold typographic choices
- Purposeful white space
- Data-driven structure when appropriate
- Clear narrative flow

You ALWAYS respond with valid JSON only. No markdown and no explanation, just the JSON object.";

const SLIDE_CATALOGUE: &str = "\
- HERO: Opening slide with title, subtitle, author, tagline, date
- AGENDA: Table of contents with numbered items
- DIVIDER: Section separator with sectionNumber, sectionTitle, description
- CONTENT: Article section with heading, body, bullets (max 5), optional imageHint
- TWO_COL: Two-column comparison with heading, leftCol {heading, bullets}, rightCol {heading, bullets}
- STATS: KPI dashboard with heading, stats array [{number, label, trend, description}] (2-4 stats)
- QUOTE: Full-page quote with quote text, attribution, role
- CLOSING: Final slide with tagline, heading, keyTakeaways (3-5 items), cta, contactInfo";

const RULES: &str = "\
1. Start with HERO, end with CLOSING
2. Use DIVIDER to separate major sections
3. Use STATS when presenting numbers/metrics
4. Use TWO_COL for comparisons
5. Use QUOTE for powerful statements
6. Keep text concise; slides are visual, not documents
7. Every bullet point should be punchy (under 10 words)
8. Return ONLY the JSON object, nothing else";

/// Build the user message for a request and its resolved style guide.
#[must_use]
pub fn user_prompt(request: &PlanRequest, style: &StyleGuide) -> String {
    let tone = request.tone.as_str();
    let audience = request.audience.as_str();

    let mut prompt = String::with_capacity(2048 + request.content.len());
    prompt.push_str("Create a presentation slide plan with the following details:\n\n");
    let _ = writeln!(prompt, "**Title**: {}", request.title);
    let _ = writeln!(prompt, "**Purpose**: {}", request.purpose);
    let _ = writeln!(prompt, "**Target Audience**: {audience}");
    let _ = writeln!(prompt, "**Tone/Mood**: {tone}");
    let _ = writeln!(
        prompt,
        "**Slide Count**: {}\n",
        request.slide_count.directive()
    );

    let _ = writeln!(prompt, "**Content to present**:\n{}\n", request.content);

    prompt.push_str("**Design Style Available**:\n");
    let _ = writeln!(prompt, "- Primary color: {}", style.colors.primary);
    let _ = writeln!(prompt, "- Background: {}", style.colors.background);
    let _ = writeln!(prompt, "- Aesthetic direction: {}", style.aesthetic.direction);
    let _ = writeln!(
        prompt,
        "- Primary font: {}\n",
        style.typography.heading1.font_family
    );

    let _ = writeln!(prompt, "**Available Slide Types**:\n{SLIDE_CATALOGUE}\n");

    prompt.push_str("**Required JSON structure**:\n");
    let _ = writeln!(
        prompt,
        r#"{{
  "title": "string",
  "aesthetic": "{tone}",
  "tone": "{tone}",
  "audience": "{audience}",
  "slideCount": number,
  "slides": [
    {{
      "type": "HERO | AGENDA | DIVIDER | CONTENT | TWO_COL | STATS | QUOTE | CLOSING",
      "content": {{ ... type-specific fields ... }}
    }}
  ]
}}
"#
    );

    let _ = write!(prompt, "Rules:\n{RULES}");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SlideCount;
    use deck_core::{build_style_guide, Audience, Tone};

    fn request() -> PlanRequest {
        PlanRequest {
            title: "Q3 Review".to_string(),
            purpose: "Board update".to_string(),
            audience: Audience::Executives,
            tone: Tone::Luxury,
            content: "Revenue up 40%.\nChurn down.".to_string(),
            slide_count: SlideCount::Exact(7),
        }
    }

    #[test]
    fn test_prompt_embeds_request() {
        let prompt = user_prompt(&request(), &build_style_guide(Tone::Luxury));
        assert!(prompt.contains("**Title**: Q3 Review"));
        assert!(prompt.contains("**Purpose**: Board update"));
        assert!(prompt.contains("**Target Audience**: executives"));
        assert!(prompt.contains("**Tone/Mood**: luxury"));
        assert!(prompt.contains("Create exactly 7 slides."));
        assert!(prompt.contains("Revenue up 40%.\nChurn down."));
    }

    #[test]
    fn test_prompt_summarises_style() {
        let prompt = user_prompt(&request(), &build_style_guide(Tone::Luxury));
        assert!(prompt.contains("- Primary color: #C9A96E"));
        assert!(prompt.contains("- Background: #0D0D0D"));
        assert!(prompt.contains("- Aesthetic direction: luxury"));
        assert!(prompt.contains("- Primary font: Playfair Display"));
    }

    #[test]
    fn test_prompt_lists_every_slide_type() {
        let prompt = user_prompt(&request(), &build_style_guide(Tone::Luxury));
        for kind in [
            "HERO", "AGENDA", "DIVIDER", "CONTENT", "TWO_COL", "STATS", "QUOTE", "CLOSING",
        ] {
            assert!(prompt.contains(&format!("- {kind}:")), "missing {kind}");
        }
        assert!(prompt.contains("\"aesthetic\": \"luxury\""));
        assert!(prompt.ends_with("8. Return ONLY the JSON object, nothing else"));
    }

    #[test]
    fn test_system_prompt_demands_json() {
        assert!(SYSTEM_PROMPT.contains("valid JSON only"));
        assert!(SYSTEM_PROMPT.contains("1920x1080px"));
    }
}
