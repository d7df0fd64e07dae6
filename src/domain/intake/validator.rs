//! Answer acceptance predicate.

/// Returns true if the answer is acceptable for a question.
///
/// An answer is acceptable iff the question is optional or the trimmed text
/// is non-empty. No other normalization happens here; any further policy is
/// the orchestrator's job.
pub fn answer_accepted(answer_text: &str, optional: bool) -> bool {
    optional || !answer_text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_answer_is_accepted() {
        assert!(answer_accepted("Sam", false));
        assert!(answer_accepted("Sam", true));
    }

    #[test]
    fn empty_answer_is_rejected_for_required_question() {
        assert!(!answer_accepted("", false));
        assert!(!answer_accepted("   ", false));
        assert!(!answer_accepted("\n\t", false));
    }

    #[test]
    fn empty_answer_is_accepted_for_optional_question() {
        assert!(answer_accepted("", true));
        assert!(answer_accepted("   ", true));
    }

    #[test]
    fn whitespace_padded_answer_is_accepted() {
        assert!(answer_accepted("  a  ", false));
    }
}
