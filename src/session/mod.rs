//! Session state for docchat
//!
//! A session holds the active conversation, the named chat history and the
//! current document. State changes go through a pure reducer
//! ([`SessionState::apply`]); [`ChatSession`] performs the effects (file
//! reads, model calls) and feeds their results to the reducer.

pub mod chat;
pub mod conversation;
pub mod history;
pub mod state;

pub use chat::{ChatSession, UploadOutcome};
pub use conversation::Conversation;
pub use history::ChatHistory;
pub use state::{Action, DocumentContext, SessionState, DEFAULT_CHAT_TITLE};
