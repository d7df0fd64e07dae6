//! Chat message projection.
//!
//! Messages are a one-directional view derived from the session plus
//! transient gateway text. They are never a source of truth; conversation
//! state is always reconstructed from the session, not from this log.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};

/// Who a message is from, presentation-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Shown as coming from the intake assistant.
    Prompt,
    /// The user's submitted answer.
    Reply,
}

/// One entry in the rendered conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique ID of this message.
    pub id: MessageId,
    /// Who the message is from.
    pub role: MessageRole,
    /// Message text.
    pub text: String,
    /// When the message was emitted.
    pub timestamp: Timestamp,
    /// Pointer value this message belongs to, when it maps to a question.
    pub question_index: Option<f64>,
}

impl ChatMessage {
    /// Creates a prompt message tied to a question position.
    pub fn prompt(text: impl Into<String>, question_index: f64) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::Prompt,
            text: text.into(),
            timestamp: Timestamp::now(),
            question_index: Some(question_index),
        }
    }

    /// Creates a transient prompt message not tied to any question
    /// (acknowledgments, greetings, closing lines).
    pub fn transient_prompt(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::Prompt,
            text: text.into(),
            timestamp: Timestamp::now(),
            question_index: None,
        }
    }

    /// Creates a reply message for a submitted answer.
    pub fn reply(text: impl Into<String>, question_index: f64) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::Reply,
            text: text.into(),
            timestamp: Timestamp::now(),
            question_index: Some(question_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_question_index() {
        let m = ChatMessage::prompt("What's your name?", 0.0);
        assert_eq!(m.role, MessageRole::Prompt);
        assert_eq!(m.question_index, Some(0.0));
    }

    #[test]
    fn transient_prompt_has_no_question_index() {
        let m = ChatMessage::transient_prompt("Nice to meet you!");
        assert_eq!(m.role, MessageRole::Prompt);
        assert_eq!(m.question_index, None);
    }

    #[test]
    fn reply_has_unique_id() {
        let m1 = ChatMessage::reply("Sam", 0.0);
        let m2 = ChatMessage::reply("Sam", 0.0);
        assert_ne!(m1.id, m2.id);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::Prompt).unwrap(), "\"prompt\"");
        assert_eq!(serde_json::to_string(&MessageRole::Reply).unwrap(), "\"reply\"");
    }
}
