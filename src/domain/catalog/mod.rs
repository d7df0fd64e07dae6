//! Question catalog - the fixed, ordered intake script.

#[allow(clippy::module_inception)]
mod catalog;
mod question;

pub use catalog::QuestionCatalog;
pub use question::{InputMode, QuestionDefinition};
