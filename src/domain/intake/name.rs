//! Best-effort first-name extraction from free text.

/// Lead-in phrases people use before stating their name, longest first so the
/// longer variants win ("i am" before "i'm" is irrelevant, but "my name is"
/// must strip before "name").
const LEAD_INS: &[&str] = &[
    "my name is",
    "my name's",
    "people call me",
    "you can call me",
    "call me",
    "this is",
    "i am",
    "i'm",
    "im",
    "it's",
    "its",
    "hi,",
    "hi",
    "hello,",
    "hello",
    "hey,",
    "hey",
];

/// Extracts a likely first name from a free-text answer.
///
/// Strips common lead-ins, takes the first remaining word, drops trailing
/// punctuation, and capitalizes the first letter. Returns `None` when nothing
/// name-like remains.
pub fn extract_first_name(text: &str) -> Option<String> {
    let mut remainder = text.trim();

    // Strip lead-ins repeatedly: "hi, my name is Sam" has two.
    loop {
        let lower = remainder.to_lowercase();
        let mut stripped = false;
        for lead_in in LEAD_INS {
            if lower.starts_with(lead_in) {
                let boundary_ok = lower[lead_in.len()..]
                    .chars()
                    .next()
                    .map(|c| !c.is_alphanumeric())
                    .unwrap_or(true);
                if boundary_ok {
                    remainder = remainder[lead_in.len()..].trim_start();
                    stripped = true;
                    break;
                }
            }
        }
        if !stripped {
            break;
        }
    }

    let first_word = remainder.split_whitespace().next()?;
    let cleaned: String = first_word
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '\'')
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '-' || c == '\'');

    if cleaned.is_empty() {
        return None;
    }

    let mut chars = cleaned.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_is_extracted() {
        assert_eq!(extract_first_name("Sam"), Some("Sam".to_string()));
    }

    #[test]
    fn lowercase_name_is_capitalized() {
        assert_eq!(extract_first_name("sam"), Some("Sam".to_string()));
    }

    #[test]
    fn lead_in_phrases_are_stripped() {
        assert_eq!(extract_first_name("My name is Sam"), Some("Sam".to_string()));
        assert_eq!(extract_first_name("i'm sam"), Some("Sam".to_string()));
        assert_eq!(extract_first_name("I am Priya"), Some("Priya".to_string()));
        assert_eq!(extract_first_name("call me Ishmael"), Some("Ishmael".to_string()));
        assert_eq!(extract_first_name("this is Jordan"), Some("Jordan".to_string()));
    }

    #[test]
    fn stacked_lead_ins_are_stripped() {
        assert_eq!(
            extract_first_name("Hi, my name is Sam Porter"),
            Some("Sam".to_string())
        );
    }

    #[test]
    fn only_first_name_is_kept() {
        assert_eq!(extract_first_name("Sam Porter Bridges"), Some("Sam".to_string()));
    }

    #[test]
    fn trailing_punctuation_is_dropped() {
        assert_eq!(extract_first_name("Sam."), Some("Sam".to_string()));
        assert_eq!(extract_first_name("Sam!"), Some("Sam".to_string()));
    }

    #[test]
    fn hyphenated_and_apostrophe_names_survive() {
        assert_eq!(extract_first_name("Mary-Jane"), Some("Mary-Jane".to_string()));
        assert_eq!(extract_first_name("D'Angelo"), Some("D'Angelo".to_string()));
    }

    #[test]
    fn lead_in_prefix_of_a_name_is_not_stripped() {
        // "Imogen" starts with "im" but is a name, not a lead-in.
        assert_eq!(extract_first_name("Imogen"), Some("Imogen".to_string()));
    }

    #[test]
    fn empty_and_punctuation_only_yield_none() {
        assert_eq!(extract_first_name(""), None);
        assert_eq!(extract_first_name("   "), None);
        assert_eq!(extract_first_name("!!!"), None);
    }

    #[test]
    fn lead_in_with_nothing_after_yields_none() {
        assert_eq!(extract_first_name("my name is"), None);
    }
}
