//! # Deck Planner
//!
//! Turns a [`PlanRequest`] into a [`deck_core::SlidesPlan`] by asking a
//! language model, and keeps the API key and model choice on disk.
//!
//! ```text
//! PlanRequest ──validate──▶ prompt ──POST /v1/messages──▶ reply text
//!                                                            │
//!                                   SlidesPlan ◀──extract────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod request;
pub mod settings;

pub use client::{PlannerClient, RetryConfig, ANTHROPIC_VERSION, DEFAULT_API_URL, MAX_TOKENS};
pub use error::{PlannerError, PlannerResult};
pub use prompt::{user_prompt, SYSTEM_PROMPT};
pub use request::{PlanRequest, SlideCount, MISSING_API_KEY, MISSING_INPUT};
pub use settings::{
    is_known_model, Settings, SettingsError, SettingsStore, DEFAULT_MODEL, KNOWN_MODELS,
};
