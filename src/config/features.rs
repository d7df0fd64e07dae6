//! Feature flags for toggling engine behavior

use serde::Deserialize;

/// Feature flags controlling optional engine behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// AI personalization of welcomes, acknowledgments, and insights
    #[serde(default = "default_true")]
    pub enable_enrichment: bool,

    /// AI-proposed follow-up questions between scripted questions
    #[serde(default = "default_true")]
    pub enable_follow_ups: bool,

    /// Best-effort persistence and analytics sync
    #[serde(default = "default_true")]
    pub enable_sync: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_enrichment: true,
            enable_follow_ups: true,
            enable_sync: true,
        }
    }
}

fn default_true() -> bool {
    true
}
