//! Question pointer - position within the scripted intake plus follow-ups.
//!
//! The conversation walks a fixed catalog, but the gateway may inject at most
//! one extra follow-up question after any scripted answer. Rather than a
//! resizable question list, the position is a tagged variant: `Scripted(i)`
//! means "awaiting the answer to catalog question i", `FollowUp(i)` means
//! "answered catalog question i, awaiting its injected follow-up". The
//! numeric projection of `FollowUp(i)` is `i + 0.5`, which keeps
//! "question K of N" labels and progress math trivial.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Position in the conversation.
///
/// # Invariants
///
/// - `value()` is non-decreasing across transitions
/// - a `FollowUp` can only be entered from `Scripted` (at most one injected
///   follow-up per scripted question)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum QuestionPointer {
    /// Awaiting the answer to catalog question `i`.
    Scripted(usize),
    /// Catalog question `i` answered; awaiting its injected follow-up.
    FollowUp(usize),
}

impl QuestionPointer {
    /// Returns the pointer at the start of a conversation.
    pub fn start() -> Self {
        QuestionPointer::Scripted(0)
    }

    /// Returns the numeric projection: `i` for scripted, `i + 0.5` mid-follow-up.
    pub fn value(&self) -> f64 {
        match self {
            QuestionPointer::Scripted(i) => *i as f64,
            QuestionPointer::FollowUp(i) => *i as f64 + 0.5,
        }
    }

    /// Returns the index of the scripted question this position belongs to.
    pub fn scripted_index(&self) -> usize {
        match self {
            QuestionPointer::Scripted(i) | QuestionPointer::FollowUp(i) => *i,
        }
    }

    /// Returns true while awaiting an injected follow-up's answer.
    pub fn is_follow_up(&self) -> bool {
        matches!(self, QuestionPointer::FollowUp(_))
    }

    /// Half-steps into the injected follow-up for the current question.
    ///
    /// # Errors
    ///
    /// - `FollowUpAlreadyPending` if already mid-follow-up
    pub fn enter_follow_up(&self) -> Result<Self, DomainError> {
        match self {
            QuestionPointer::Scripted(i) => Ok(QuestionPointer::FollowUp(*i)),
            QuestionPointer::FollowUp(_) => Err(DomainError::new(
                ErrorCode::FollowUpAlreadyPending,
                "At most one injected follow-up per scripted question",
            )),
        }
    }

    /// Advances to the next scripted question.
    pub fn advance(&self) -> Self {
        QuestionPointer::Scripted(self.scripted_index() + 1)
    }

    /// Returns the 1-based "question K of N" label value, clamped to N.
    pub fn display_number(&self, catalog_count: usize) -> usize {
        (self.scripted_index() + 1).min(catalog_count)
    }
}

impl Default for QuestionPointer {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn start_is_first_scripted_question() {
        let p = QuestionPointer::start();
        assert_eq!(p, QuestionPointer::Scripted(0));
        assert_eq!(p.value(), 0.0);
        assert!(!p.is_follow_up());
    }

    #[test]
    fn follow_up_value_is_half_step() {
        let p = QuestionPointer::Scripted(2).enter_follow_up().unwrap();
        assert_eq!(p, QuestionPointer::FollowUp(2));
        assert_eq!(p.value(), 2.5);
        assert_eq!(p.scripted_index(), 2);
    }

    #[test]
    fn enter_follow_up_twice_is_rejected() {
        let p = QuestionPointer::Scripted(1).enter_follow_up().unwrap();
        let err = p.enter_follow_up().unwrap_err();
        assert_eq!(err.code, ErrorCode::FollowUpAlreadyPending);
    }

    #[test]
    fn advance_from_follow_up_reaches_next_scripted() {
        let p = QuestionPointer::FollowUp(0).advance();
        assert_eq!(p, QuestionPointer::Scripted(1));
        assert_eq!(p.value(), 1.0);
    }

    #[test]
    fn display_number_clamps_to_catalog_size() {
        assert_eq!(QuestionPointer::Scripted(0).display_number(3), 1);
        assert_eq!(QuestionPointer::FollowUp(1).display_number(3), 2);
        assert_eq!(QuestionPointer::Scripted(2).display_number(3), 3);
        assert_eq!(QuestionPointer::Scripted(5).display_number(3), 3);
    }

    proptest! {
        // Any interleaving of advances and follow-up entries yields strictly
        // increasing values, in increments of exactly 0.5 or 1.0.
        #[test]
        fn pointer_values_increase_by_half_or_whole_steps(steps in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut pointer = QuestionPointer::start();
            for take_follow_up in steps {
                let before = pointer.value();
                pointer = if take_follow_up {
                    match pointer.enter_follow_up() {
                        Ok(next) => next,
                        Err(_) => pointer.advance(),
                    }
                } else {
                    pointer.advance()
                };
                let delta = pointer.value() - before;
                prop_assert!(delta == 0.5 || delta == 1.0, "delta was {}", delta);
            }
        }

        #[test]
        fn follow_up_is_never_entered_twice_in_a_row(i in 0usize..1000) {
            let p = QuestionPointer::Scripted(i).enter_follow_up().unwrap();
            prop_assert!(p.enter_follow_up().is_err());
        }
    }
}
