//! Intake session aggregate.
//!
//! The session is the single source of truth for one conversation: the
//! ordered responses, the question pointer, the subject's name, and the
//! completion flag. It is owned exclusively by the orchestrator for the
//! lifetime of one conversation and never shared across sessions.

use serde::{Deserialize, Serialize};

use super::pointer::QuestionPointer;
use super::response::Response;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};

/// Session aggregate - the authoritative record of one intake conversation.
///
/// # Invariants
///
/// - `pointer` is non-decreasing, advancing by 0.5 or 1.0 per accepted answer
/// - `is_complete` transitions false -> true exactly once
/// - `completed_at` is set iff `is_complete`
/// - `subject_name` is set at most once
/// - `responses` is append-only, insertion order = conversation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// Accepted answers in conversation order.
    responses: Vec<Response>,

    /// Current position in the conversation.
    pointer: QuestionPointer,

    /// Whether the conversation has finished.
    is_complete: bool,

    /// First name extracted from the first answer, if any.
    subject_name: Option<String>,

    /// When the session was created.
    started_at: Timestamp,

    /// When the session completed, if it has.
    completed_at: Option<Timestamp>,
}

impl IntakeSession {
    /// Creates a new session positioned at the first scripted question.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            responses: Vec::new(),
            pointer: QuestionPointer::start(),
            is_complete: false,
            subject_name: None,
            started_at: Timestamp::now(),
            completed_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the accepted responses in conversation order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Returns the current question pointer.
    pub fn pointer(&self) -> QuestionPointer {
        self.pointer
    }

    /// Returns whether the conversation has finished.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Returns the subject's extracted first name, if known.
    pub fn subject_name(&self) -> Option<&str> {
        self.subject_name.as_deref()
    }

    /// Returns when the session started.
    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// Returns when the session completed, if it has.
    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends an accepted answer at the current pointer position.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the conversation already finished
    pub fn record_response(&mut self, response: Response) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.responses.push(response);
        Ok(())
    }

    /// Sets the subject's name. Idempotent: only the first call takes effect.
    ///
    /// Returns true if the name was stored by this call.
    pub fn set_subject_name(&mut self, name: impl Into<String>) -> bool {
        if self.subject_name.is_some() {
            return false;
        }
        let name = name.into();
        if name.trim().is_empty() {
            return false;
        }
        self.subject_name = Some(name);
        true
    }

    /// Half-steps the pointer into an injected follow-up.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the conversation already finished
    /// - `FollowUpAlreadyPending` if already mid-follow-up
    pub fn enter_follow_up(&mut self) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.pointer = self.pointer.enter_follow_up()?;
        Ok(())
    }

    /// Advances the pointer to the next scripted question.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the conversation already finished
    pub fn advance(&mut self) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.pointer = self.pointer.advance();
        Ok(())
    }

    /// Marks the conversation finished and stamps `completed_at`.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if already complete
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.is_complete = true;
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_complete {
            Err(DomainError::new(
                ErrorCode::SessionComplete,
                "Session is complete and can no longer change",
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_question_zero() {
        let session = IntakeSession::new();
        assert_eq!(session.pointer(), QuestionPointer::Scripted(0));
        assert!(session.responses().is_empty());
        assert!(!session.is_complete());
        assert!(session.subject_name().is_none());
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn record_response_appends_in_order() {
        let mut session = IntakeSession::new();
        session.record_response(Response::new("Q0", "A0", 0.0)).unwrap();
        session.advance().unwrap();
        session.record_response(Response::new("Q1", "A1", 1.0)).unwrap();

        assert_eq!(session.responses().len(), 2);
        assert_eq!(session.responses()[0].answer_text(), "A0");
        assert_eq!(session.responses()[1].answer_text(), "A1");
    }

    #[test]
    fn set_subject_name_is_set_once() {
        let mut session = IntakeSession::new();
        assert!(session.set_subject_name("Sam"));
        assert!(!session.set_subject_name("Alex"));
        assert_eq!(session.subject_name(), Some("Sam"));
    }

    #[test]
    fn set_subject_name_ignores_blank() {
        let mut session = IntakeSession::new();
        assert!(!session.set_subject_name("   "));
        assert!(session.subject_name().is_none());
        // A later real name still lands.
        assert!(session.set_subject_name("Sam"));
    }

    #[test]
    fn enter_follow_up_half_steps_pointer() {
        let mut session = IntakeSession::new();
        session.enter_follow_up().unwrap();
        assert_eq!(session.pointer(), QuestionPointer::FollowUp(0));
        assert_eq!(session.pointer().value(), 0.5);
    }

    #[test]
    fn enter_follow_up_twice_fails() {
        let mut session = IntakeSession::new();
        session.enter_follow_up().unwrap();
        let err = session.enter_follow_up().unwrap_err();
        assert_eq!(err.code, ErrorCode::FollowUpAlreadyPending);
    }

    #[test]
    fn advance_from_follow_up_reaches_next_question() {
        let mut session = IntakeSession::new();
        session.enter_follow_up().unwrap();
        session.advance().unwrap();
        assert_eq!(session.pointer(), QuestionPointer::Scripted(1));
    }

    #[test]
    fn complete_is_one_way() {
        let mut session = IntakeSession::new();
        session.complete().unwrap();
        assert!(session.is_complete());
        assert!(session.completed_at().is_some());

        let err = session.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionComplete);
    }

    #[test]
    fn completed_session_rejects_mutation() {
        let mut session = IntakeSession::new();
        session.complete().unwrap();

        assert!(session.record_response(Response::new("Q", "A", 0.0)).is_err());
        assert!(session.advance().is_err());
        assert!(session.enter_follow_up().is_err());
    }

    #[test]
    fn completed_at_is_not_before_started_at() {
        let mut session = IntakeSession::new();
        session.complete().unwrap();
        let completed = session.completed_at().unwrap();
        assert!(!completed.is_before(session.started_at()));
    }
}
