//! Mock augmentation gateway for testing and offline demos.
//!
//! Configurable per-operation behavior, simulated delays for timeout testing,
//! error injection for resilience testing, and call tracking for verification.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockAugmentationGateway::new()
//!     .with_acknowledgment("Sounds exciting!")
//!     .with_follow_up("What's blocking you today?")
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AcknowledgmentRequest, AugmentationGateway, FollowUpDecision, FollowUpRequest, GatewayError,
    InsightsRequest, WelcomeRequest,
};

/// Which gateway operation a recorded call hit.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Welcome { name: String },
    Acknowledgment { question_id: String },
    FollowUp { question_index: f64 },
    Insights { history_len: usize },
}

/// Mock gateway with settable behavior per operation.
#[derive(Debug, Clone, Default)]
pub struct MockAugmentationGateway {
    welcome: Option<String>,
    acknowledgment: Option<String>,
    follow_up: Option<String>,
    insights: Option<String>,
    fail_all: bool,
    delay: Duration,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl MockAugmentationGateway {
    /// Creates a quiet mock: no welcome, empty acknowledgments, no
    /// follow-ups, no insights. Every call still succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose every operation fails, simulating an outage.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Sets the personalized welcome text.
    pub fn with_welcome(mut self, text: impl Into<String>) -> Self {
        self.welcome = Some(text.into());
        self
    }

    /// Sets the contextual acknowledgment text.
    pub fn with_acknowledgment(mut self, text: impl Into<String>) -> Self {
        self.acknowledgment = Some(text.into());
        self
    }

    /// Makes every follow-up proposal inject the given question.
    pub fn with_follow_up(mut self, text: impl Into<String>) -> Self {
        self.follow_up = Some(text.into());
        self
    }

    /// Sets the end-of-session insights text.
    pub fn with_insights(mut self, text: impl Into<String>) -> Self {
        self.insights = Some(text.into());
        self
    }

    /// Adds simulated latency to every operation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the recorded calls in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many calls the gateway has seen.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn simulate(&self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        if self.delay > Duration::ZERO {
            sleep(self.delay).await;
        }
        if self.fail_all {
            return Err(GatewayError::unavailable("mock outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl AugmentationGateway for MockAugmentationGateway {
    async fn personalize_welcome(&self, request: WelcomeRequest) -> Result<String, GatewayError> {
        self.simulate(GatewayCall::Welcome {
            name: request.name.clone(),
        })
        .await?;
        Ok(self
            .welcome
            .clone()
            .unwrap_or_else(|| format!("Welcome, {}!", request.name)))
    }

    async fn contextual_acknowledgment(
        &self,
        request: AcknowledgmentRequest,
    ) -> Result<String, GatewayError> {
        self.simulate(GatewayCall::Acknowledgment {
            question_id: request.question_id,
        })
        .await?;
        Ok(self.acknowledgment.clone().unwrap_or_default())
    }

    async fn propose_follow_up(
        &self,
        request: FollowUpRequest,
    ) -> Result<FollowUpDecision, GatewayError> {
        self.simulate(GatewayCall::FollowUp {
            question_index: request.question_index,
        })
        .await?;
        Ok(match &self.follow_up {
            Some(text) => FollowUpDecision::ask(text.clone()),
            None => FollowUpDecision::decline(),
        })
    }

    async fn summarize_insights(&self, request: InsightsRequest) -> Result<String, GatewayError> {
        self.simulate(GatewayCall::Insights {
            history_len: request.history.len(),
        })
        .await?;
        Ok(self.insights.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HistoryEntry;

    #[tokio::test]
    async fn quiet_mock_declines_everything() {
        let gateway = MockAugmentationGateway::new();

        let ack = gateway
            .contextual_acknowledgment(AcknowledgmentRequest {
                answer: "an app".to_string(),
                question_id: "vision".to_string(),
                name: None,
                history: Vec::new(),
            })
            .await
            .unwrap();
        assert!(ack.is_empty());

        let decision = gateway
            .propose_follow_up(FollowUpRequest {
                answer: "an app".to_string(),
                question_index: 1.0,
                history: Vec::new(),
                name: None,
                next_scripted_prompt: "budget?".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(decision, FollowUpDecision::decline());
    }

    #[tokio::test]
    async fn configured_responses_are_returned() {
        let gateway = MockAugmentationGateway::new()
            .with_welcome("Hey Sam, great to have you.")
            .with_follow_up("Why now?");

        let welcome = gateway
            .personalize_welcome(WelcomeRequest {
                name: "Sam".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(welcome, "Hey Sam, great to have you.");

        let decision = gateway
            .propose_follow_up(FollowUpRequest {
                answer: "an app".to_string(),
                question_index: 0.0,
                history: Vec::new(),
                name: Some("Sam".to_string()),
                next_scripted_prompt: "vision?".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(decision.prompt(), Some("Why now?"));
    }

    #[tokio::test]
    async fn failing_mock_errors_on_every_operation() {
        let gateway = MockAugmentationGateway::failing();
        let result = gateway
            .summarize_insights(InsightsRequest {
                history: vec![HistoryEntry::new("Name?", "Sam")],
                name: Some("Sam".to_string()),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let gateway = MockAugmentationGateway::new();
        gateway
            .personalize_welcome(WelcomeRequest {
                name: "Sam".to_string(),
            })
            .await
            .unwrap();
        gateway
            .summarize_insights(InsightsRequest {
                history: Vec::new(),
                name: None,
            })
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            GatewayCall::Welcome {
                name: "Sam".to_string()
            }
        );
        assert_eq!(calls[1], GatewayCall::Insights { history_len: 0 });
    }
}
