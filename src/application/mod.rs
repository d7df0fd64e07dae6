//! Application layer - the conversation orchestrator.

mod engine;

pub use engine::{EngineOptions, IntakeEngine, TurnOutcome};
