//! docchat - chat with a local model about your documents
//!
//! This library provides the core of docchat: text extraction from uploaded
//! files, context assembly for model calls, a model gateway for Ollama and
//! the session state that ties them together.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `extract`: Text extraction from `.txt`, `.csv` and `.pdf` uploads
//! - `prompts`: Message lists for chat turns and document summaries
//! - `providers`: Model provider abstraction, Ollama client and gateway
//! - `session`: Session state reducer and the effectful chat session
//! - `commands`: CLI command handlers and the interactive loop
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use docchat::{ChatSession, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut session = ChatSession::from_config(config)?;
//!     session.upload_path("report.pdf")?;
//!     if let Some(summary) = session.summarize().await {
//!         println!("{}", summary);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod prompts;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{DocchatError, Result};
pub use session::{ChatSession, SessionState};

#[cfg(test)]
pub mod test_utils;
