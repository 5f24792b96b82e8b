//! Effectful session driver

use super::{Action, SessionState};
use crate::config::Config;
use crate::error::{DocchatError, Result};
use crate::extract::{self, DocumentKind, ExtractionError, TextSource};
use crate::prompts::{build_chat_messages, build_summary_messages, ContextOptions};
use crate::providers::{create_provider, ModelGateway};
use std::path::{Path, PathBuf};

/// Result of uploading a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Characters of text now held by the document
    pub chars: usize,
    /// How the text was produced; `None` when extraction failed
    pub source: Option<TextSource>,
    /// Extraction failure shown to the user; the document text is empty
    pub error: Option<String>,
}

impl UploadOutcome {
    /// True when the text came from the lossy fallback decode
    pub fn is_best_effort(&self) -> bool {
        matches!(self.source, Some(TextSource::Lossy))
    }
}

/// A chat session bound to a model gateway
///
/// Every operation runs to completion before the next one starts; the
/// session is not shared between tasks.
///
/// # Examples
///
/// ```no_run
/// use docchat::config::Config;
/// use docchat::session::ChatSession;
///
/// # async fn example() -> docchat::error::Result<()> {
/// let mut session = ChatSession::from_config(Config::default())?;
/// session.upload_path("report.pdf")?;
/// let reply = session.send("What is this report about?").await;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
pub struct ChatSession {
    state: SessionState,
    gateway: ModelGateway,
    config: Config,
}

impl ChatSession {
    /// Create a session that talks to `gateway`
    pub fn new(config: Config, gateway: ModelGateway) -> Self {
        Self {
            state: SessionState::new(),
            gateway,
            config,
        }
    }

    /// Create a session with the provider named by `config`
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be initialized
    pub fn from_config(config: Config) -> Result<Self> {
        let provider = create_provider(&config.ollama)?;
        Ok(Self::new(config, ModelGateway::new(provider)))
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Configuration the session was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the provider behind the gateway
    pub fn provider_name(&self) -> &str {
        self.gateway.provider_name()
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }

    /// Start a fresh chat, dropping the current document
    pub fn new_chat(&mut self) {
        tracing::debug!("Starting new chat");
        self.dispatch(Action::NewChat);
    }

    /// Reopen the chat stored under `title`
    ///
    /// # Errors
    ///
    /// Returns `DocchatError::Session` when no chat has that title
    pub fn select_chat(&mut self, title: &str) -> Result<()> {
        if !self.state.history.contains(title) {
            return Err(DocchatError::Session(format!("No chat named '{}'", title)).into());
        }
        self.dispatch(Action::SelectChat(title.to_string()));
        Ok(())
    }

    /// Drop the document text and summary
    pub fn clear_document(&mut self) {
        self.dispatch(Action::ClearDocument);
    }

    /// Load uploaded bytes as the session document
    ///
    /// Extraction failures do not fail the upload: the document text becomes
    /// empty and the outcome carries the error message. The existing summary
    /// is kept.
    pub fn upload(&mut self, bytes: &[u8], declared_type: &str) -> UploadOutcome {
        let extracted = extract::extract(bytes, declared_type, &self.config.extraction.encodings);
        let outcome = match extracted {
            Ok(extracted) => {
                let outcome = UploadOutcome {
                    chars: extracted.char_count(),
                    source: Some(extracted.source),
                    error: None,
                };
                self.dispatch(Action::DocumentLoaded(extracted.text));
                outcome
            }
            Err(e) => {
                tracing::warn!("Extraction failed: {}", e);
                self.dispatch(Action::DocumentLoaded(String::new()));
                UploadOutcome {
                    chars: 0,
                    source: None,
                    error: Some(e.to_string()),
                }
            }
        };

        tracing::info!("Loaded {} document: {} chars", declared_type, outcome.chars);
        outcome
    }

    /// Read a file from disk and upload it
    ///
    /// The type is inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns error if the extension is not `.txt`, `.csv` or `.pdf`, or
    /// the file cannot be read
    pub fn upload_path(&mut self, path: impl AsRef<Path>) -> Result<UploadOutcome> {
        let path = path.as_ref();
        let kind = DocumentKind::from_path(path).ok_or_else(|| {
            ExtractionError::UnsupportedType(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            )
        })?;

        let bytes = std::fs::read(path)?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(self.upload(&bytes, kind.mime()))
    }

    /// Summarize the document with the summary model
    ///
    /// Returns `None` without calling the model when the document has no
    /// text. A failed model call still produces a summary: the sentinel
    /// reply.
    pub async fn summarize(&mut self) -> Option<String> {
        if self.state.document.raw_text.is_empty() {
            tracing::debug!("No document text to summarize");
            return None;
        }

        let messages =
            build_summary_messages(&self.state.document.raw_text, self.config.summary.max_chars);
        let summary = self
            .gateway
            .complete(&self.config.ollama.summary_model, &messages)
            .await;

        tracing::info!("Generated summary: {} chars", summary.chars().count());
        self.dispatch(Action::SummaryGenerated(summary.clone()));
        Some(summary)
    }

    /// Append the current summary to the conversation
    ///
    /// Returns false, leaving the conversation untouched, when there is no
    /// summary.
    pub fn insert_summary(&mut self) -> bool {
        if self.state.document.summary.is_empty() {
            return false;
        }
        self.dispatch(Action::InsertSummary);
        true
    }

    /// Summarize the document and insert the result into the conversation
    ///
    /// Returns false when there is no document text.
    pub async fn summarize_and_insert(&mut self) -> bool {
        if self.summarize().await.is_none() {
            return false;
        }
        self.insert_summary()
    }

    /// Send a user message and return the reply
    ///
    /// Exactly two messages are appended: the user message and the reply,
    /// which is a sentinel string when the model call fails.
    pub async fn send(&mut self, content: impl Into<String>) -> String {
        self.dispatch(Action::UserMessage(content.into()));

        let options = ContextOptions::from(&self.config.context);
        let messages = build_chat_messages(
            self.state.conversation.messages(),
            &self.state.document,
            &options,
        );
        let reply = self
            .gateway
            .complete(&self.config.ollama.chat_model, &messages)
            .await;

        self.dispatch(Action::AssistantReply(reply.clone()));
        reply
    }

    /// Write the summary to the configured file name inside `dir`
    ///
    /// # Errors
    ///
    /// Returns error if there is no summary or the file cannot be written
    pub fn save_summary(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        if self.state.document.summary.is_empty() {
            return Err(DocchatError::Session("Generate a summary first".to_string()).into());
        }

        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.config.summary.file_name);
        std::fs::write(&path, &self.state.document.summary)?;
        tracing::info!("Saved summary to {}", path.display());
        Ok(path)
    }
}
