//! Progress events emitted while a deck is assembled.

use serde::{Deserialize, Serialize};

/// One observable step of deck assembly.
///
/// Serialised with a `type` tag, e.g.
/// `{"type":"PROGRESS","message":"Creating slide 1/3: HERO","percent":33}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeckEvent {
    /// A slide was placed.
    Progress {
        /// Human-readable status line.
        message: String,
        /// Completion in percent, `round(100 * (i + 1) / N)`.
        percent: u8,
    },
    /// Every slide was placed.
    Done {
        /// Number of slides placed.
        #[serde(rename = "slideCount")]
        slide_count: usize,
    },
    /// Assembly stopped. Frames placed before the failure stay on the host.
    Error {
        /// Failure description.
        message: String,
    },
}

impl DeckEvent {
    /// Build a progress event.
    #[must_use]
    pub fn progress(message: impl Into<String>, percent: u8) -> Self {
        Self::Progress {
            message: message.into(),
            percent,
        }
    }

    /// Build an error event.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Whether no further events follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(DeckEvent::progress("Creating slide 1/2: HERO", 50))
            .expect("serialize");
        assert_eq!(json["type"], "PROGRESS");
        assert_eq!(json["percent"], 50);

        let done = serde_json::to_string(&DeckEvent::Done { slide_count: 7 }).expect("serialize");
        assert_eq!(done, r#"{"type":"DONE","slideCount":7}"#);

        let error: DeckEvent =
            serde_json::from_str(r#"{"type":"ERROR","message":"boom"}"#).expect("parse");
        assert_eq!(error, DeckEvent::error("boom"));
    }

    #[test]
    fn test_terminal() {
        assert!(!DeckEvent::progress("x", 1).is_terminal());
        assert!(DeckEvent::Done { slide_count: 0 }.is_terminal());
        assert!(DeckEvent::error("x").is_terminal());
    }
}
