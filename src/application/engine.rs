//! Intake engine - the turn-taking conversation orchestrator.
//!
//! Composes the catalog, validators, session state, augmentation gateway,
//! and session sync into a live dialogue: show a question, accept an answer,
//! validate, record, optionally enrich, advance, decide completion.
//!
//! # Ordering
//!
//! One in-flight submission at a time (the engine takes `&mut self`), and an
//! accepted answer is always recorded in the session before any network call
//! fires. The gateway and sync are advisory: every remote call runs under a
//! bounded timeout and resolves to a documented fallback on any failure, so
//! conversation state is never lost to a collaborator outage.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::catalog::QuestionCatalog;
use crate::domain::intake::{
    answer_accepted, extract_first_name, ChatMessage, CompletionSummary, IntakeSession,
    QuestionPointer, Response,
};
use crate::ports::{
    AcknowledgmentRequest, AugmentationGateway, FollowUpDecision, FollowUpRequest, HistoryEntry,
    InsightsRequest, SessionSync, WelcomeRequest,
};

/// Greeting used when the gateway cannot personalize one and the catalog
/// carries no template for the first question.
const FALLBACK_WELCOME: &str = "Great to meet you, {name}!";

/// Tuning knobs for the engine's best-effort collaborator calls.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Upper bound on each augmentation gateway call.
    pub enrichment_timeout: Duration,
    /// Upper bound on each session sync call.
    pub sync_timeout: Duration,
    /// Consult the gateway at all (welcome, acknowledgments, insights).
    pub enable_enrichment: bool,
    /// Allow injected follow-up questions.
    pub enable_follow_ups: bool,
    /// Mirror the session to the persistence backend.
    pub enable_sync: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            enrichment_timeout: Duration::from_millis(4000),
            sync_timeout: Duration::from_millis(4000),
            enable_enrichment: true,
            enable_follow_ups: true,
            enable_sync: true,
        }
    }
}

impl EngineOptions {
    /// Derives engine options from the loaded application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            enrichment_timeout: config.gateway.timeout(),
            sync_timeout: config.sync.timeout(),
            enable_enrichment: config.features.enable_enrichment,
            enable_follow_ups: config.features.enable_follow_ups,
            enable_sync: config.features.enable_sync,
        }
    }
}

/// What happened to one submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Validation failed; nothing was recorded and the input stays editable.
    Rejected,
    /// The session already finished; the submission was ignored.
    AlreadyComplete,
    /// The answer was recorded and the conversation moved on.
    Advanced,
    /// The answer was recorded and the conversation finished.
    Completed(CompletionSummary),
}

/// The conversation orchestrator for one intake session.
///
/// Owns the session exclusively for the lifetime of the conversation; the
/// message log it maintains is a derived view, never a source of truth.
pub struct IntakeEngine {
    catalog: QuestionCatalog,
    gateway: Arc<dyn AugmentationGateway>,
    sync: Arc<dyn SessionSync>,
    options: EngineOptions,
    session: IntakeSession,
    messages: Vec<ChatMessage>,
    /// Prompt text of the injected follow-up currently awaiting its answer.
    pending_follow_up: Option<String>,
    started: bool,
    summary: Option<CompletionSummary>,
}

impl IntakeEngine {
    /// Creates an engine over the given catalog and collaborators.
    pub fn new(
        catalog: QuestionCatalog,
        gateway: Arc<dyn AugmentationGateway>,
        sync: Arc<dyn SessionSync>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            sync,
            options: EngineOptions::default(),
            session: IntakeSession::new(),
            messages: Vec::new(),
            pending_follow_up: None,
            started: false,
            summary: None,
        }
    }

    /// Replaces the default engine options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read surface
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the rendered conversation so far.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the authoritative session state.
    pub fn session(&self) -> &IntakeSession {
        &self.session
    }

    /// Returns true once the conversation has finished.
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Returns the completion summary, once the conversation has finished.
    pub fn summary(&self) -> Option<&CompletionSummary> {
        self.summary.as_ref()
    }

    /// Progress percentage: `round(100 * (pointer + 1) / count)`, clamped to 100.
    pub fn progress(&self) -> u8 {
        if self.session.is_complete() {
            return 100;
        }
        let count = self.catalog.count().max(1) as f64;
        let pct = 100.0 * (self.session.pointer().value() + 1.0) / count;
        pct.round().min(100.0) as u8
    }

    /// Returns the "Question K of N" label for the current position.
    pub fn question_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.pointer().display_number(self.catalog.count()),
            self.catalog.count()
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turn-taking
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens the conversation by emitting the first scripted question.
    ///
    /// Idempotent; an empty catalog completes the session immediately.
    pub fn start(&mut self) {
        if self.started || self.session.is_complete() {
            return;
        }
        self.started = true;

        match self.catalog.get(0) {
            Ok(question) => {
                self.messages.push(ChatMessage::prompt(question.prompt(), 0.0));
            }
            Err(err) => {
                warn!("cannot open conversation, completing: {}", err);
                let _ = self.session.complete();
            }
        }
    }

    /// Handles one user submission.
    pub async fn submit_answer(&mut self, text: &str) -> TurnOutcome {
        if self.session.is_complete() {
            return TurnOutcome::AlreadyComplete;
        }
        if !self.started {
            self.start();
        }

        let pointer = self.session.pointer();
        let (question_prompt, optional) = match self.current_question(pointer) {
            Some(current) => current,
            // Pointer past the catalog should not occur; completing is the
            // safe behavior rather than crashing the conversation.
            None => return self.finish().await,
        };

        if !answer_accepted(text, optional) {
            debug!("rejected empty answer at pointer {}", pointer.value());
            return TurnOutcome::Rejected;
        }

        // Record before any network call so state survives collaborator failures.
        self.messages.push(ChatMessage::reply(text, pointer.value()));
        let response = Response::new(question_prompt, text, pointer.value());
        if let Err(err) = self.session.record_response(response.clone()) {
            warn!("failed to record response: {}", err);
            return TurnOutcome::AlreadyComplete;
        }

        if self.session.responses().len() == 1 {
            if let Some(name) = extract_first_name(text) {
                self.session.set_subject_name(name);
            }
            self.register_session().await;
            self.emit_welcome().await;
        }
        self.mirror_turn(&response).await;

        match pointer {
            QuestionPointer::Scripted(i) if self.catalog.is_last(i) => self.finish().await,
            QuestionPointer::FollowUp(_) => {
                // A follow-up's answer never triggers another follow-up.
                self.pending_follow_up = None;
                self.advance_scripted()
            }
            QuestionPointer::Scripted(i) => self.enrich_and_advance(text, i).await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Flow steps
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolves the prompt and optionality of the question awaiting an answer.
    fn current_question(&self, pointer: QuestionPointer) -> Option<(String, bool)> {
        match pointer {
            QuestionPointer::FollowUp(_) => self
                .pending_follow_up
                .as_ref()
                .map(|prompt| (prompt.clone(), false)),
            QuestionPointer::Scripted(i) => self
                .catalog
                .get(i)
                .ok()
                .map(|q| (q.prompt().to_string(), q.is_optional())),
        }
    }

    /// Emits the greeting after the first answer: gateway-personalized when
    /// possible, otherwise the catalog's template for question 0, otherwise
    /// a fixed line.
    async fn emit_welcome(&mut self) {
        let name = self.session.subject_name().map(str::to_string);
        let fallback = self
            .catalog
            .get(0)
            .ok()
            .and_then(|q| q.render_acknowledgment(name.as_deref()))
            .unwrap_or_else(|| {
                FALLBACK_WELCOME.replace("{name}", name.as_deref().unwrap_or("there"))
            });

        let text = match (&name, self.options.enable_enrichment) {
            (Some(name), true) => {
                let request = WelcomeRequest { name: name.clone() };
                best_effort(
                    "welcome personalization",
                    self.options.enrichment_timeout,
                    self.gateway.personalize_welcome(request),
                )
                .await
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or(fallback)
            }
            _ => fallback,
        };

        self.messages.push(ChatMessage::transient_prompt(text));
    }

    /// Consults the gateway after a non-final scripted answer, then either
    /// injects a follow-up or advances to the next scripted question.
    async fn enrich_and_advance(&mut self, answer: &str, index: usize) -> TurnOutcome {
        if !self.options.enable_enrichment {
            return self.advance_scripted();
        }

        let next_scripted_prompt = match self.catalog.get(index + 1) {
            Ok(q) => q.prompt().to_string(),
            Err(err) => {
                warn!("catalog gap after index {}: {}", index, err);
                return self.finish().await;
            }
        };
        let name = self.session.subject_name().map(str::to_string);
        let history = self.history_entries();

        // The welcome greeting already acknowledges the first answer.
        if index > 0 {
            let question_id = self
                .catalog
                .get(index)
                .map(|q| q.id().to_string())
                .unwrap_or_default();
            let request = AcknowledgmentRequest {
                answer: answer.to_string(),
                question_id,
                name: name.clone(),
                history: history.clone(),
            };
            let ack = best_effort(
                "contextual acknowledgment",
                self.options.enrichment_timeout,
                self.gateway.contextual_acknowledgment(request),
            )
            .await
            .unwrap_or_default();
            if !ack.trim().is_empty() {
                self.messages.push(ChatMessage::transient_prompt(ack));
            }
        }

        if self.options.enable_follow_ups {
            let request = FollowUpRequest {
                answer: answer.to_string(),
                question_index: index as f64,
                history,
                name,
                next_scripted_prompt,
            };
            let decision = best_effort(
                "follow-up proposal",
                self.options.enrichment_timeout,
                self.gateway.propose_follow_up(request),
            )
            .await
            .unwrap_or_else(FollowUpDecision::decline);

            if let Some(prompt) = decision.prompt().map(str::to_string) {
                if self.session.enter_follow_up().is_ok() {
                    self.messages
                        .push(ChatMessage::prompt(&prompt, self.session.pointer().value()));
                    self.pending_follow_up = Some(prompt);
                    return TurnOutcome::Advanced;
                }
            }
        }

        self.advance_scripted()
    }

    /// Advances to the next scripted question and emits its prompt.
    fn advance_scripted(&mut self) -> TurnOutcome {
        if let Err(err) = self.session.advance() {
            warn!("failed to advance pointer: {}", err);
            return TurnOutcome::AlreadyComplete;
        }
        let index = self.session.pointer().scripted_index();
        match self.catalog.get(index) {
            Ok(question) => {
                self.messages
                    .push(ChatMessage::prompt(question.prompt(), index as f64));
                TurnOutcome::Advanced
            }
            Err(err) => {
                // Should not occur: completion is decided before advancing.
                warn!("advanced past catalog end: {}", err);
                let _ = self.session.complete();
                TurnOutcome::AlreadyComplete
            }
        }
    }

    /// Completes the session: stamps completion, gathers best-effort insights
    /// and analytics, and assembles the summary from local state.
    async fn finish(&mut self) -> TurnOutcome {
        if self.session.complete().is_err() {
            return TurnOutcome::AlreadyComplete;
        }

        let mut insights = None;
        if self.options.enable_enrichment {
            let request = InsightsRequest {
                history: self.history_entries(),
                name: self.session.subject_name().map(str::to_string),
            };
            insights = best_effort(
                "insight synthesis",
                self.options.enrichment_timeout,
                self.gateway.summarize_insights(request),
            )
            .await
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        }

        let closing = match self.session.subject_name() {
            Some(name) => format!(
                "That's everything I need, {}. The team will be in touch shortly!",
                name
            ),
            None => "That's everything I need. The team will be in touch shortly!".to_string(),
        };
        self.messages.push(ChatMessage::transient_prompt(closing));

        let mut analytics = None;
        if self.options.enable_sync {
            let message_count = self.messages.len() as u32;
            if let Some(record) = best_effort(
                "session completion sync",
                self.options.sync_timeout,
                self.sync.complete_session(&self.session, message_count),
            )
            .await
            {
                if insights.is_none() {
                    insights = record.insights;
                }
                analytics = record.analytics;
            }
        }

        let summary = CompletionSummary {
            responses: self.session.responses().to_vec(),
            subject_name: self.session.subject_name().map(str::to_string),
            insights,
            analytics,
        };
        self.summary = Some(summary.clone());
        TurnOutcome::Completed(summary)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Best-effort collaborator calls
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers the session with the backend once the name is known.
    async fn register_session(&self) {
        if !self.options.enable_sync {
            return;
        }
        let id = *self.session.id();
        let name = self.session.subject_name().map(str::to_string);
        best_effort(
            "session registration",
            self.options.sync_timeout,
            self.sync.create_session(id, name.as_deref()),
        )
        .await;
    }

    /// Mirrors one accepted answer to the backend's turn log.
    async fn mirror_turn(&self, response: &Response) {
        if !self.options.enable_sync {
            return;
        }
        let id = *self.session.id();
        best_effort(
            "turn mirror",
            self.options.sync_timeout,
            self.sync.append_turn(id, response),
        )
        .await;
    }

    fn history_entries(&self) -> Vec<HistoryEntry> {
        self.session
            .responses()
            .iter()
            .map(|r| HistoryEntry::new(r.question_prompt(), r.answer_text()))
            .collect()
    }
}

/// Runs an advisory call under a bounded timeout, resolving to `None` on any
/// failure. The failure path and the slow path are identical: log and move on.
async fn best_effort<T, E>(
    what: &str,
    timeout: Duration,
    fut: impl Future<Output = Result<T, E>>,
) -> Option<T>
where
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            warn!("{} dropped: {}", what, err);
            None
        }
        Err(_) => {
            warn!("{} dropped: timed out after {}ms", what, timeout.as_millis());
            None
        }
    }
}
