//! Recorded answer to one question.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// One accepted answer. Created once per submission, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Prompt text the user was answering.
    question_prompt: String,

    /// The answer as submitted (untrimmed).
    answer_text: String,

    /// Pointer value at the time of asking (`i`, or `i + 0.5` for a follow-up).
    question_index: f64,

    /// When the answer was accepted.
    answered_at: Timestamp,
}

impl Response {
    /// Records an accepted answer.
    pub fn new(
        question_prompt: impl Into<String>,
        answer_text: impl Into<String>,
        question_index: f64,
    ) -> Self {
        Self {
            question_prompt: question_prompt.into(),
            answer_text: answer_text.into(),
            question_index,
            answered_at: Timestamp::now(),
        }
    }

    /// Returns the prompt the user was answering.
    pub fn question_prompt(&self) -> &str {
        &self.question_prompt
    }

    /// Returns the answer text verbatim.
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    /// Returns the pointer value at the time of asking.
    pub fn question_index(&self) -> f64 {
        self.question_index
    }

    /// Returns when the answer was accepted.
    pub fn answered_at(&self) -> &Timestamp {
        &self.answered_at
    }

    /// Returns true if this answered an injected follow-up.
    pub fn is_follow_up(&self) -> bool {
        self.question_index.fract() != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_preserves_answer_verbatim() {
        let r = Response::new("Name?", "  Sam  ", 0.0);
        assert_eq!(r.question_prompt(), "Name?");
        assert_eq!(r.answer_text(), "  Sam  ");
        assert_eq!(r.question_index(), 0.0);
    }

    #[test]
    fn half_step_index_marks_follow_up() {
        assert!(!Response::new("Q", "A", 1.0).is_follow_up());
        assert!(Response::new("Q", "A", 1.5).is_follow_up());
    }

    #[test]
    fn response_serializes_camel_case() {
        let r = Response::new("Name?", "Sam", 0.0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["questionPrompt"], "Name?");
        assert_eq!(json["answerText"], "Sam");
        assert_eq!(json["questionIndex"], 0.0);
        assert!(json["answeredAt"].is_string());
    }
}
