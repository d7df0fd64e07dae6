//! Session Sync Port - interface to the persistence/analytics backend.
//!
//! All operations are fire-and-forget relative to conversation progress.
//! The orchestrator records responses locally before calling any of them,
//! logs failures, and continues on in-memory state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, Response, SessionAnalytics};

/// Port for durable session storage and analytics.
#[async_trait]
pub trait SessionSync: Send + Sync {
    /// Registers a new session with the backend.
    async fn create_session(
        &self,
        session_id: SessionId,
        subject_name: Option<&str>,
    ) -> Result<(), SyncError>;

    /// Appends one accepted answer to the backend's turn log.
    async fn append_turn(
        &self,
        session_id: SessionId,
        response: &Response,
    ) -> Result<(), SyncError>;

    /// Marks the session complete and retrieves whatever the backend computed.
    ///
    /// `message_count` is the total prompts-plus-replies count, which only the
    /// caller's message log knows.
    async fn complete_session(
        &self,
        session: &IntakeSession,
        message_count: u32,
    ) -> Result<CompletionRecord, SyncError>;
}

/// What the backend returns on completion. Every field is optional; absent
/// means the backend had nothing, never a locally fabricated default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Backend-stored insight text, if any.
    pub insights: Option<String>,
    /// Backend-computed analytics, if any.
    pub analytics: Option<SessionAnalytics>,
}

/// Sync backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Request exceeded the bounded timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Backend is unavailable.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Failed to parse the backend response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SyncError {
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
