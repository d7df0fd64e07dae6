//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - The ordered question script and its definitions
//! - `intake` - Intake session lifecycle, pointer arithmetic, and validation

pub mod catalog;
pub mod foundation;
pub mod intake;
