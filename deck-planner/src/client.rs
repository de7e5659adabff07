//! Client for the Anthropic Messages API.
//!
//! One planning call is one `POST /v1/messages` carrying the system prompt
//! and the user prompt. The first text block of the reply is searched for a
//! JSON object, which is parsed as a [`SlidesPlan`].

use std::fmt;
use std::time::Duration;

use deck_core::{extract_plan, SlidesPlan, StyleGuide};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{PlannerError, PlannerResult};
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::request::PlanRequest;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com";

/// Value of the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Token limit for one planning reply.
pub const MAX_TOKENS: u32 = 4096;

const MESSAGES_PATH: &str = "/v1/messages";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Retry with exponential backoff for transient failures.
///
/// Clients start with [`RetryConfig::none`]; the `Default` values apply only
/// when retries are requested.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound on any delay in milliseconds.
    pub max_delay_ms: u64,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 8_000,
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration.
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay_ms: u64, max_delay_ms: u64, multiplier: f64) -> Self {
        Self {
            max_attempts,
            initial_delay_ms,
            max_delay_ms,
            multiplier,
        }
    }

    /// A single attempt, no retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(1, 0, 0, 1.0)
    }

    /// Delay before retry number `attempt` (0-indexed).
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let base = self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32);
        base.min(self.max_delay_ms as f64) as u64
    }
}

/// Asynchronous slide planning client.
#[derive(Clone)]
pub struct PlannerClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    retry: RetryConfig,
}

impl fmt::Debug for PlannerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl PlannerClient {
    /// Create a client.
    ///
    /// `base_url` may be the API host (`https://api.anthropic.com`) or the
    /// full messages endpoint; `/v1/messages` is appended when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidUrl`] if the URL is malformed and
    /// [`PlannerError::Http`] if the HTTP client fails to build.
    pub fn new(
        base_url: impl AsRef<str>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> PlannerResult<Self> {
        let mut endpoint =
            Url::parse(base_url.as_ref()).map_err(|e| PlannerError::InvalidUrl(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(PlannerError::InvalidUrl(base_url.as_ref().to_string()));
        }
        if !endpoint.path().ends_with(MESSAGES_PATH) {
            let path = format!("{}{MESSAGES_PATH}", endpoint.path().trim_end_matches('/'));
            endpoint.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(concat!("deckgen/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
            retry: RetryConfig::none(),
        })
    }

    /// Replace the retry configuration.
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Messages endpoint the client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Model identifier sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a slide plan.
    ///
    /// The request is validated before any network traffic.
    ///
    /// # Errors
    ///
    /// - [`PlannerError::MissingConfig`] for a missing key, title or content
    /// - [`PlannerError::Upstream`] / [`PlannerError::Http`] for transport failures
    /// - [`PlannerError::MalformedPlan`] if the reply holds no valid plan
    pub async fn plan(&self, request: &PlanRequest, style: &StyleGuide) -> PlannerResult<SlidesPlan> {
        request.validate(&self.api_key)?;

        info!(
            title = %request.title,
            tone = %request.tone,
            slides = %request.slide_count,
            model = %self.model,
            "Requesting slide plan"
        );
        let text = self
            .complete(SYSTEM_PROMPT, &user_prompt(request, style))
            .await?;

        let plan = extract_plan(&text)?;
        plan.validate()?;
        info!(slides = plan.slides.len(), title = %plan.title, "Received slide plan");
        Ok(plan)
    }

    /// Send one system + user exchange and return the first text block.
    ///
    /// A client makes a single attempt unless a [`RetryConfig`] was set;
    /// then retryable failures (see [`PlannerError::is_retryable`]) are
    /// retried with backoff up to the configured attempt count.
    ///
    /// # Errors
    ///
    /// Returns the last error once attempts are exhausted, or the first
    /// non-retryable error.
    pub async fn complete(&self, system: &str, user: &str) -> PlannerResult<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: user,
            }],
        };

        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(error) if error.is_retryable() && attempt + 1 < attempts => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        "Planner request failed (attempt {}/{}), retrying in {}ms: {}",
                        attempt + 1,
                        attempts,
                        delay,
                        error
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn send_once(&self, body: &MessagesRequest<'_>) -> PlannerResult<String> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "Planner response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|detail| detail.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(PlannerError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesResponse = serde_json::from_str(&text)
            .map_err(|e| PlannerError::UnexpectedResponse(e.to_string()))?;
        Ok(reply
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}
