//! In-memory session sync for testing and offline demos.
//!
//! Records every call and computes completion analytics the same way the
//! real backend does, so tests can assert on the full sync contract without
//! a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, Response, SessionAnalytics};
use crate::ports::{CompletionRecord, SessionSync, SyncError};

#[derive(Debug, Default)]
struct SyncState {
    sessions: HashMap<SessionId, Option<String>>,
    turns: HashMap<SessionId, Vec<Response>>,
    completed: Vec<SessionId>,
}

/// In-memory sync backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingSessionSync {
    state: Arc<Mutex<SyncState>>,
    fail_all: bool,
    insights: Option<String>,
}

impl RecordingSessionSync {
    /// Creates an empty recording backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose every operation fails, simulating an outage.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Sets insight text for the backend to return on completion.
    pub fn with_insights(mut self, text: impl Into<String>) -> Self {
        self.insights = Some(text.into());
        self
    }

    /// Returns true if the given session was registered.
    pub fn has_session(&self, session_id: &SessionId) -> bool {
        self.state.lock().unwrap().sessions.contains_key(session_id)
    }

    /// Returns the registered name for a session, if any.
    pub fn registered_name(&self, session_id: &SessionId) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .get(session_id)
            .cloned()
            .flatten()
    }

    /// Returns the mirrored turns for a session.
    pub fn turns(&self, session_id: &SessionId) -> Vec<Response> {
        self.state
            .lock()
            .unwrap()
            .turns
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns true if the given session was marked complete.
    pub fn is_completed(&self, session_id: &SessionId) -> bool {
        self.state.lock().unwrap().completed.contains(session_id)
    }

    fn check_available(&self) -> Result<(), SyncError> {
        if self.fail_all {
            Err(SyncError::unavailable("mock outage"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionSync for RecordingSessionSync {
    async fn create_session(
        &self,
        session_id: SessionId,
        subject_name: Option<&str>,
    ) -> Result<(), SyncError> {
        self.check_available()?;
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(session_id, subject_name.map(str::to_string));
        Ok(())
    }

    async fn append_turn(
        &self,
        session_id: SessionId,
        response: &Response,
    ) -> Result<(), SyncError> {
        self.check_available()?;
        self.state
            .lock()
            .unwrap()
            .turns
            .entry(session_id)
            .or_default()
            .push(response.clone());
        Ok(())
    }

    async fn complete_session(
        &self,
        session: &IntakeSession,
        message_count: u32,
    ) -> Result<CompletionRecord, SyncError> {
        self.check_available()?;
        self.state.lock().unwrap().completed.push(*session.id());

        let analytics = session.completed_at().map(|completed_at| {
            let duration_ms = completed_at
                .duration_since(session.started_at())
                .num_milliseconds();
            let replies = session.responses().len().max(1) as i64;
            SessionAnalytics {
                total_messages: message_count,
                session_duration_ms: duration_ms,
                average_response_ms: duration_ms / replies,
            }
        });

        Ok(CompletionRecord {
            insights: self.insights.clone(),
            analytics,
        })
    }
}
