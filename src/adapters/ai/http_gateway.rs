//! HTTP augmentation gateway.
//!
//! Talks to the studio's model-serving endpoint: a single URL accepting
//! `{"action": ..., ...}` JSON and answering with action-specific fields
//! (`{"text": ...}` or `{"shouldAsk": ..., "followUpText": ...}`). Anything
//! that is not valid JSON with the expected keys is a failure; the caller
//! treats every failure as "no enrichment".
//!
//! # Configuration
//!
//! ```ignore
//! let config = GatewayClientConfig::new(api_key)
//!     .with_base_url("https://augment.studio.example")
//!     .with_timeout(Duration::from_millis(4000));
//!
//! let gateway = HttpAugmentationGateway::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response as HttpResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{
    AcknowledgmentRequest, AugmentationGateway, FollowUpDecision, FollowUpRequest, GatewayError,
    InsightsRequest, WelcomeRequest,
};

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL of the augmentation service.
    pub base_url: String,
    /// Model identifier forwarded with every request.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GatewayClientConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://augment.studio.example".to_string(),
            model: "intake-assistant-1".to_string(),
            timeout: Duration::from_millis(4000),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Envelope wrapping every gateway request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AugmentEnvelope<T: Serialize> {
    action: &'static str,
    model: String,
    #[serde(flatten)]
    payload: T,
}

/// Response carrying a single text field.
#[derive(Debug, Deserialize)]
struct TextResponse {
    text: Option<String>,
}

/// HTTP implementation of the augmentation gateway.
pub struct HttpAugmentationGateway {
    config: GatewayClientConfig,
    client: Client,
}

impl HttpAugmentationGateway {
    /// Creates a gateway with the given configuration.
    ///
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be constructed
    pub fn new(config: GatewayClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn augment_url(&self) -> String {
        format!("{}/v1/augment", self.config.base_url)
    }

    async fn post<T: Serialize>(
        &self,
        action: &'static str,
        payload: T,
    ) -> Result<HttpResponse, GatewayError> {
        let envelope = AugmentEnvelope {
            action,
            model: self.config.model.clone(),
            payload,
        };
        debug!("gateway request: {}", action);

        let response = self
            .client
            .post(self.augment_url())
            .bearer_auth(self.config.api_key())
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    }
                } else if e.is_connect() {
                    GatewayError::network(format!("connection failed: {}", e))
                } else {
                    GatewayError::network(e.to_string())
                }
            })?;

        self.check_status(response).await
    }

    async fn check_status(&self, response: HttpResponse) -> Result<HttpResponse, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(GatewayError::AuthenticationFailed),
            429 => Err(GatewayError::unavailable("rate limited")),
            500..=599 => Err(GatewayError::unavailable(format!(
                "server error {}: {}",
                status, body
            ))),
            _ => Err(GatewayError::network(format!(
                "unexpected status {}: {}",
                status, body
            ))),
        }
    }

    async fn parse_text(&self, response: HttpResponse) -> Result<String, GatewayError> {
        let parsed: TextResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::parse(format!("failed to parse response: {}", e)))?;
        parsed
            .text
            .ok_or_else(|| GatewayError::InvalidResponse("missing 'text' field".to_string()))
    }
}

#[async_trait]
impl AugmentationGateway for HttpAugmentationGateway {
    async fn personalize_welcome(&self, request: WelcomeRequest) -> Result<String, GatewayError> {
        let response = self.post("personalizeWelcome", request).await?;
        self.parse_text(response).await
    }

    async fn contextual_acknowledgment(
        &self,
        request: AcknowledgmentRequest,
    ) -> Result<String, GatewayError> {
        let response = self.post("contextualAcknowledgment", request).await?;
        self.parse_text(response).await
    }

    async fn propose_follow_up(
        &self,
        request: FollowUpRequest,
    ) -> Result<FollowUpDecision, GatewayError> {
        let response = self.post("proposeFollowUp", request).await?;
        let decision: FollowUpDecision = response
            .json()
            .await
            .map_err(|e| GatewayError::parse(format!("failed to parse response: {}", e)))?;

        if decision.should_ask && decision.prompt().is_none() {
            return Err(GatewayError::InvalidResponse(
                "shouldAsk without usable followUpText".to_string(),
            ));
        }
        Ok(decision)
    }

    async fn summarize_insights(&self, request: InsightsRequest) -> Result<String, GatewayError> {
        let response = self.post("summarizeInsights", request).await?;
        self.parse_text(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_fields() {
        let config = GatewayClientConfig::new("sk-test")
            .with_base_url("https://example.test")
            .with_model("intake-assistant-2")
            .with_timeout(Duration::from_millis(1500));

        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.model, "intake-assistant-2");
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.api_key(), "sk-test");
    }

    #[test]
    fn envelope_flattens_payload_with_action() {
        let envelope = AugmentEnvelope {
            action: "personalizeWelcome",
            model: "intake-assistant-1".to_string(),
            payload: WelcomeRequest {
                name: "Sam".to_string(),
            },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["action"], "personalizeWelcome");
        assert_eq!(json["model"], "intake-assistant-1");
        assert_eq!(json["name"], "Sam");
    }

    #[test]
    fn gateway_builds_from_config() {
        let gateway =
            HttpAugmentationGateway::new(GatewayClientConfig::new("sk-test")).unwrap();
        assert_eq!(gateway.augment_url(), "https://augment.studio.example/v1/augment");
    }
}
