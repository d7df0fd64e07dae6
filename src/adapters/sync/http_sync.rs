//! HTTP session sync.
//!
//! Mirrors the conversation to the persistence/analytics backend:
//! `POST /v1/sessions`, `POST /v1/sessions/{id}/turns`, and
//! `POST /v1/sessions/{id}/complete`. The backend owns its storage schema;
//! this adapter only speaks the request/response contract.

use async_trait::async_trait;
use reqwest::{Client, Response as HttpResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, Response};
use crate::ports::{CompletionRecord, SessionSync, SyncError};

/// Configuration for the HTTP sync backend.
#[derive(Debug, Clone)]
pub struct SyncClientConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL of the backend.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl SyncClientConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://intake-api.studio.example".to_string(),
            timeout: Duration::from_millis(4000),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionBody<'a> {
    session_id: SessionId,
    subject_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteSessionBody<'a> {
    session: &'a IntakeSession,
    message_count: u32,
}

/// HTTP implementation of the session sync port.
pub struct HttpSessionSync {
    config: SyncClientConfig,
    client: Client,
}

impl HttpSessionSync {
    /// Creates a sync client with the given configuration.
    ///
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be constructed
    pub fn new(config: SyncClientConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SyncError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.config.base_url, path)
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpResponse, SyncError> {
        debug!("sync request: {}", path);

        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SyncError::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    }
                } else if e.is_connect() {
                    SyncError::network(format!("connection failed: {}", e))
                } else {
                    SyncError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(SyncError::AuthenticationFailed),
            500..=599 => Err(SyncError::unavailable(format!(
                "server error {}: {}",
                status, body
            ))),
            _ => Err(SyncError::network(format!(
                "unexpected status {}: {}",
                status, body
            ))),
        }
    }
}

#[async_trait]
impl SessionSync for HttpSessionSync {
    async fn create_session(
        &self,
        session_id: SessionId,
        subject_name: Option<&str>,
    ) -> Result<(), SyncError> {
        let body = CreateSessionBody {
            session_id,
            subject_name,
        };
        self.post("/sessions", &body).await?;
        Ok(())
    }

    async fn append_turn(
        &self,
        session_id: SessionId,
        response: &Response,
    ) -> Result<(), SyncError> {
        self.post(&format!("/sessions/{}/turns", session_id), response)
            .await?;
        Ok(())
    }

    async fn complete_session(
        &self,
        session: &IntakeSession,
        message_count: u32,
    ) -> Result<CompletionRecord, SyncError> {
        let body = CompleteSessionBody {
            session,
            message_count,
        };
        let response = self
            .post(&format!("/sessions/{}/complete", session.id()), &body)
            .await?;

        response
            .json()
            .await
            .map_err(|e| SyncError::parse(format!("failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_fields() {
        let config = SyncClientConfig::new("sk-test")
            .with_base_url("https://api.example.test")
            .with_timeout(Duration::from_millis(2000));

        assert_eq!(config.base_url, "https://api.example.test");
        assert_eq!(config.timeout, Duration::from_millis(2000));
        assert_eq!(config.api_key(), "sk-test");
    }

    #[test]
    fn urls_include_version_prefix() {
        let sync = HttpSessionSync::new(SyncClientConfig::new("sk-test")).unwrap();
        assert_eq!(
            sync.url("/sessions"),
            "https://intake-api.studio.example/v1/sessions"
        );
    }

    #[test]
    fn create_body_serializes_camel_case() {
        let session = IntakeSession::new();
        let body = CreateSessionBody {
            session_id: *session.id(),
            subject_name: Some("Sam"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["sessionId"].is_string());
        assert_eq!(json["subjectName"], "Sam");
    }
}
