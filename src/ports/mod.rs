//! Ports - interfaces to external collaborators.
//!
//! The intake core consumes two remote services: the AI augmentation gateway
//! and the persistence/analytics backend. Both are abstracted behind async
//! traits here; adapters provide the HTTP and in-memory implementations.

mod augmentation;
mod session_sync;

pub use augmentation::{
    AcknowledgmentRequest, AugmentationGateway, FollowUpDecision, FollowUpRequest, GatewayError,
    HistoryEntry, InsightsRequest, WelcomeRequest,
};
pub use session_sync::{CompletionRecord, SessionSync, SyncError};
