//! Adapters - concrete implementations of the ports.
//!
//! # Module Organization
//!
//! - `ai` - Augmentation gateway implementations (HTTP + mock)
//! - `sync` - Persistence/analytics sync implementations (HTTP + mock)

pub mod ai;
pub mod sync;
