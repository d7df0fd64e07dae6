//! The ordered catalog of scripted intake questions.
//!
//! The catalog is the sole source of scripted question order and text.
//! The orchestrator reads it and never mutates it.

use once_cell::sync::Lazy;

use super::question::{InputMode, QuestionDefinition};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Immutable, ordered list of scripted questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<QuestionDefinition>,
}

static STRATEGY_INTAKE: Lazy<Vec<QuestionDefinition>> = Lazy::new(|| {
    vec![
        QuestionDefinition::new(
            "name",
            "Hi! I'm here to learn about your project. First things first, what's your name?",
            InputMode::ShortText,
        )
        .expect("static catalog entry")
        .with_placeholder("Your name")
        .with_acknowledgment("Great to meet you, {name}!"),
        QuestionDefinition::new(
            "business",
            "Tell me a bit about your business. What do you do, and who do you serve?",
            InputMode::LongText,
        )
        .expect("static catalog entry")
        .with_placeholder("A few sentences is plenty"),
        QuestionDefinition::new(
            "vision",
            "What are you hoping to build or change? Paint the picture of where you want to be.",
            InputMode::LongText,
        )
        .expect("static catalog entry")
        .with_placeholder("The outcome you're after"),
        QuestionDefinition::new(
            "obstacles",
            "What's standing in the way right now? What have you already tried?",
            InputMode::LongText,
        )
        .expect("static catalog entry")
        .with_placeholder("Blockers, constraints, past attempts"),
        QuestionDefinition::with_choices(
            "timeline",
            "When do you need this in place?",
            vec![
                "As soon as possible".to_string(),
                "Within 3 months".to_string(),
                "Within 6 months".to_string(),
                "Just exploring".to_string(),
            ],
        )
        .expect("static catalog entry"),
        QuestionDefinition::new(
            "budget",
            "Last one: do you have a budget range in mind? Feel free to skip this.",
            InputMode::ShortText,
        )
        .expect("static catalog entry")
        .with_placeholder("e.g. $25k-$50k (optional)")
        .optional(),
    ]
});

impl QuestionCatalog {
    /// Creates a catalog from an ordered list of questions.
    pub fn new(questions: Vec<QuestionDefinition>) -> Self {
        Self { questions }
    }

    /// Returns the studio's default strategy-intake script.
    pub fn strategy_intake() -> Self {
        Self {
            questions: STRATEGY_INTAKE.clone(),
        }
    }

    /// Returns the question at the given index.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the index is out of range
    pub fn get(&self, index: usize) -> Result<&QuestionDefinition, DomainError> {
        self.questions.get(index).ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("No question at index {}", index),
            )
            .with_detail("index", index.to_string())
        })
    }

    /// Returns the number of questions.
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Returns the index of the final question.
    ///
    /// Panics on an empty catalog; catalogs always carry at least one question
    /// in practice, and `is_last` is the safe check for flow control.
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    /// Returns true if the given index is the final question.
    pub fn is_last(&self, index: usize) -> bool {
        !self.questions.is_empty() && index == self.questions.len() - 1
    }

    /// Iterates the questions in conversation order.
    pub fn iter(&self) -> impl Iterator<Item = &QuestionDefinition> {
        self.questions.iter()
    }
}
