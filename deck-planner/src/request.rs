//! What the user asks the planner for.

use std::fmt;
use std::str::FromStr;

use deck_core::{Audience, Tone};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Message shown when no API key is configured.
pub const MISSING_API_KEY: &str = "Please set your Claude API key in Settings first.";

/// Message shown when title or content is blank.
pub const MISSING_INPUT: &str = "Please fill in the presentation title and content.";

/// Requested number of slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideCount {
    /// Let the planner choose.
    #[default]
    Auto,
    /// Exactly this many slides.
    Exact(u32),
}

impl SlideCount {
    /// Instruction sentence embedded in the user prompt.
    #[must_use]
    pub fn directive(self) -> String {
        match self {
            SlideCount::Auto => {
                "Choose the optimal number of slides (typically 8-15) based on the content."
                    .to_string()
            }
            SlideCount::Exact(n) => format!("Create exactly {n} slides."),
        }
    }
}

impl fmt::Display for SlideCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideCount::Auto => f.write_str("auto"),
            SlideCount::Exact(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for SlideCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(SlideCount::Auto);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("slide count must be at least 1".to_string()),
            Ok(n) => Ok(SlideCount::Exact(n)),
            Err(_) => Err(format!("expected a number or `auto`, got `{s}`")),
        }
    }
}

/// A deck request as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Presentation title.
    pub title: String,
    /// Why the deck exists.
    pub purpose: String,
    /// Intended audience.
    pub audience: Audience,
    /// Aesthetic direction.
    pub tone: Tone,
    /// Free-form source material.
    pub content: String,
    /// Requested slide count.
    pub slide_count: SlideCount,
}

impl PlanRequest {
    /// Create a request with default purpose, audience and count.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            purpose: String::new(),
            audience: Audience::default(),
            tone,
            content: content.into(),
            slide_count: SlideCount::Auto,
        }
    }

    /// Check the request and the API key before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::MissingConfig`] when the key is empty, or when
    /// the title or content is blank after trimming.
    pub fn validate(&self, api_key: &str) -> PlannerResult<()> {
        if api_key.trim().is_empty() {
            return Err(PlannerError::MissingConfig(MISSING_API_KEY.to_string()));
        }
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(PlannerError::MissingConfig(MISSING_INPUT.to_string()));
        }
        Ok(())
    }
}
