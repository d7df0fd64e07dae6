//! Session sync adapters.

mod http_sync;
mod mock_sync;

pub use http_sync::{HttpSessionSync, SyncClientConfig};
pub use mock_sync::RecordingSessionSync;
