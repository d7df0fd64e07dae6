//! Intake conversation domain: session state and the pure helpers around it.

mod message;
mod name;
mod pointer;
mod response;
mod session;
mod summary;
mod validator;

pub use message::{ChatMessage, MessageRole};
pub use name::extract_first_name;
pub use pointer::QuestionPointer;
pub use response::Response;
pub use session::IntakeSession;
pub use summary::{CompletionSummary, SessionAnalytics};
pub use validator::answer_accepted;
