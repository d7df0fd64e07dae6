//! Question definition value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How the UI should collect the answer to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// Single-line free text.
    ShortText,
    /// Multi-line free text.
    LongText,
    /// One of a fixed set of choices.
    ChoiceSet,
}

/// Immutable definition of one scripted intake question.
///
/// # Invariants
///
/// - `id` and `prompt` are non-empty
/// - `choices` is non-empty iff `input_mode` is `ChoiceSet`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    /// Unique identifier within the catalog.
    id: String,

    /// Text shown to the user.
    prompt: String,

    /// How the answer is collected.
    input_mode: InputMode,

    /// Ordered choices, present only for `ChoiceSet` questions.
    #[serde(default)]
    choices: Vec<String>,

    /// Hint text for the input surface.
    placeholder: Option<String>,

    /// Whether an empty answer is acceptable.
    #[serde(default)]
    optional: bool,

    /// Acknowledgment template; `{name}` is replaced with the subject's name.
    acknowledgment: Option<String>,
}

impl QuestionDefinition {
    /// Creates a free-text question with the given id and prompt.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if id or prompt is empty
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        input_mode: InputMode,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let prompt = prompt.into();

        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        if prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }

        Ok(Self {
            id,
            prompt,
            input_mode,
            choices: Vec::new(),
            placeholder: None,
            optional: false,
            acknowledgment: None,
        })
    }

    /// Creates a choice-set question with the given choices.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if id or prompt is empty
    /// - `InvalidFormat` if the choice set is empty
    pub fn with_choices(
        id: impl Into<String>,
        prompt: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if choices.is_empty() {
            return Err(ValidationError::invalid_format(
                "choices",
                "choice-set questions require at least one choice",
            ));
        }

        let mut question = Self::new(id, prompt, InputMode::ChoiceSet)?;
        question.choices = choices;
        Ok(question)
    }

    /// Sets the placeholder hint text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Marks the question as optional (empty answers accepted).
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the acknowledgment template.
    pub fn with_acknowledgment(mut self, template: impl Into<String>) -> Self {
        self.acknowledgment = Some(template.into());
        self
    }

    /// Returns the question id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the input mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Returns the ordered choices (empty unless `ChoiceSet`).
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Returns the placeholder hint, if any.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns whether an empty answer is acceptable.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the raw acknowledgment template, if any.
    pub fn acknowledgment(&self) -> Option<&str> {
        self.acknowledgment.as_deref()
    }

    /// Renders the acknowledgment template with the subject's name.
    ///
    /// Falls back to "there" when no name is known.
    pub fn render_acknowledgment(&self, name: Option<&str>) -> Option<String> {
        self.acknowledgment
            .as_ref()
            .map(|template| template.replace("{name}", name.unwrap_or("there")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_question_has_defaults() {
        let q = QuestionDefinition::new("vision", "What is your vision?", InputMode::LongText)
            .unwrap();
        assert_eq!(q.id(), "vision");
        assert_eq!(q.prompt(), "What is your vision?");
        assert_eq!(q.input_mode(), InputMode::LongText);
        assert!(q.choices().is_empty());
        assert!(!q.is_optional());
        assert!(q.placeholder().is_none());
        assert!(q.acknowledgment().is_none());
    }

    #[test]
    fn new_question_rejects_empty_id() {
        let result = QuestionDefinition::new("", "Prompt?", InputMode::ShortText);
        assert!(result.is_err());
    }

    #[test]
    fn new_question_rejects_empty_prompt() {
        let result = QuestionDefinition::new("q1", "   ", InputMode::ShortText);
        assert!(result.is_err());
    }

    #[test]
    fn choice_question_requires_choices() {
        let result = QuestionDefinition::with_choices("timeline", "When?", Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn choice_question_keeps_choice_order() {
        let q = QuestionDefinition::with_choices(
            "timeline",
            "When?",
            vec!["ASAP".to_string(), "This quarter".to_string()],
        )
        .unwrap();
        assert_eq!(q.input_mode(), InputMode::ChoiceSet);
        assert_eq!(q.choices(), &["ASAP", "This quarter"]);
    }

    #[test]
    fn builder_methods_set_fields() {
        let q = QuestionDefinition::new("budget", "Budget?", InputMode::ShortText)
            .unwrap()
            .with_placeholder("e.g. $50k")
            .optional()
            .with_acknowledgment("Noted, {name}.");

        assert_eq!(q.placeholder(), Some("e.g. $50k"));
        assert!(q.is_optional());
        assert_eq!(q.acknowledgment(), Some("Noted, {name}."));
    }

    #[test]
    fn render_acknowledgment_substitutes_name() {
        let q = QuestionDefinition::new("name", "Name?", InputMode::ShortText)
            .unwrap()
            .with_acknowledgment("Great to meet you, {name}!");

        assert_eq!(
            q.render_acknowledgment(Some("Sam")),
            Some("Great to meet you, Sam!".to_string())
        );
        assert_eq!(
            q.render_acknowledgment(None),
            Some("Great to meet you, there!".to_string())
        );
    }

    #[test]
    fn input_mode_serializes_kebab_case() {
        let json = serde_json::to_string(&InputMode::ShortText).unwrap();
        assert_eq!(json, "\"short-text\"");
        let json = serde_json::to_string(&InputMode::ChoiceSet).unwrap();
        assert_eq!(json, "\"choice-set\"");
    }
}
