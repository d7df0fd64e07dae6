//! Terminal output of a finished session.

use serde::{Deserialize, Serialize};

use super::response::Response;

/// Backend-computed statistics for a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalytics {
    /// Prompts plus replies over the whole conversation.
    pub total_messages: u32,
    /// `completed_at - started_at`, in milliseconds.
    pub session_duration_ms: i64,
    /// Session duration divided by the number of replies, in milliseconds.
    pub average_response_ms: i64,
}

/// Read-only summary surfaced when a session completes.
///
/// Always renders from locally known responses; `insights` and `analytics`
/// are present only when the remote collaborators actually supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    /// All accepted answers, verbatim, in conversation order.
    pub responses: Vec<Response>,
    /// The subject's extracted first name, if known.
    pub subject_name: Option<String>,
    /// AI-synthesized insights, when the gateway or backend produced them.
    pub insights: Option<String>,
    /// Backend-computed analytics, when the sync backend was reachable.
    pub analytics: Option<SessionAnalytics>,
}
