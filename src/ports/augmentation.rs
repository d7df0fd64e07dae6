//! Augmentation Gateway Port - interface to the external language-model service.
//!
//! Every operation is advisory: the orchestrator treats any error, timeout,
//! or malformed payload as the operation's documented fallback value and
//! proceeds on the scripted path. No operation mutates session state; the
//! orchestrator alone commits results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for best-effort conversational enrichment.
#[async_trait]
pub trait AugmentationGateway: Send + Sync {
    /// Produces a personalized greeting after the first answer.
    ///
    /// Fallback on failure: a fixed templated greeting using the name.
    async fn personalize_welcome(&self, request: WelcomeRequest) -> Result<String, GatewayError>;

    /// Produces a short contextual acknowledgment of an answer.
    ///
    /// An empty string means "say nothing". Fallback on failure: empty string.
    async fn contextual_acknowledgment(
        &self,
        request: AcknowledgmentRequest,
    ) -> Result<String, GatewayError>;

    /// Decides whether to inject one dynamic follow-up question before the
    /// next scripted question.
    ///
    /// Fallback on failure: [`FollowUpDecision::decline`].
    async fn propose_follow_up(
        &self,
        request: FollowUpRequest,
    ) -> Result<FollowUpDecision, GatewayError>;

    /// Synthesizes end-of-session insights from the full response history.
    ///
    /// Fallback on failure: the completion summary omits the insights block.
    async fn summarize_insights(&self, request: InsightsRequest) -> Result<String, GatewayError>;
}

/// One prompt/answer pair of the running history, as sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The prompt the user answered.
    pub prompt: String,
    /// What they said.
    pub answer: String,
}

impl HistoryEntry {
    /// Creates a history entry.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// Request for a personalized greeting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeRequest {
    /// The subject's extracted first name.
    pub name: String,
}

/// Request for a contextual acknowledgment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgmentRequest {
    /// The answer just given.
    pub answer: String,
    /// Catalog id of the question that was answered.
    pub question_id: String,
    /// The subject's name, if known.
    pub name: Option<String>,
    /// Running response history, oldest first.
    pub history: Vec<HistoryEntry>,
}

/// Request for a follow-up proposal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    /// The answer just given.
    pub answer: String,
    /// Pointer value of the question that was answered.
    pub question_index: f64,
    /// Running response history, oldest first.
    pub history: Vec<HistoryEntry>,
    /// The subject's name, if known.
    pub name: Option<String>,
    /// The scripted prompt that would otherwise come next.
    pub next_scripted_prompt: String,
}

/// Request for end-of-session insights.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    /// The full response history, oldest first.
    pub history: Vec<HistoryEntry>,
    /// The subject's name, if known.
    pub name: Option<String>,
}

/// Whether to inject a follow-up question, and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpDecision {
    /// True to inject a follow-up before the next scripted question.
    pub should_ask: bool,
    /// The follow-up prompt; required when `should_ask` is true.
    pub follow_up_text: Option<String>,
}

impl FollowUpDecision {
    /// The safe default: no follow-up.
    pub fn decline() -> Self {
        Self {
            should_ask: false,
            follow_up_text: None,
        }
    }

    /// Injects a follow-up with the given prompt.
    pub fn ask(text: impl Into<String>) -> Self {
        Self {
            should_ask: true,
            follow_up_text: Some(text.into()),
        }
    }

    /// Returns the follow-up prompt iff the decision is to ask and the text
    /// is non-empty. A `should_ask` with no usable text counts as a decline.
    pub fn prompt(&self) -> Option<&str> {
        if !self.should_ask {
            return None;
        }
        self.follow_up_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request exceeded the bounded timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Service is unavailable (5xx, rate limited, overloaded).
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response was valid JSON but missing the expected keys.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
