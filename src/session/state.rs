//! Pure session state transitions

use super::{ChatHistory, Conversation};

/// Title used when a chat is stored before it has a derived title
pub const DEFAULT_CHAT_TITLE: &str = "Chat";

/// The document currently grounding the conversation
///
/// At most one document is active. A new upload replaces `raw_text`;
/// clearing resets both fields together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
    /// Text extracted from the uploaded file
    pub raw_text: String,
    /// Generated English summary
    pub summary: String,
}

impl DocumentContext {
    /// True when there is neither text nor a summary
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty() && self.summary.is_empty()
    }
}

/// A state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start a fresh chat and drop the document
    NewChat,
    /// Reopen a stored chat
    SelectChat(String),
    /// Replace the document text
    DocumentLoaded(String),
    /// Replace the document summary
    SummaryGenerated(String),
    /// Append the summary to the conversation as an assistant message
    InsertSummary,
    /// Append a user message
    UserMessage(String),
    /// Append an assistant reply and store the chat
    AssistantReply(String),
    /// Drop the document text and summary
    ClearDocument,
}

/// Everything a session remembers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Title of the active chat, unset until derived or selected
    pub active_title: Option<String>,
    /// Messages of the active chat
    pub conversation: Conversation,
    /// Stored chats by title
    pub history: ChatHistory,
    /// Current document
    pub document: DocumentContext,
}

impl SessionState {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` and return the resulting state
    ///
    /// Transitions never fail. Selecting an unknown title and inserting an
    /// empty summary leave the state unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::session::{Action, SessionState};
    ///
    /// let state = SessionState::new()
    ///     .apply(Action::UserMessage("Hello there".to_string()))
    ///     .apply(Action::AssistantReply("Hi!".to_string()));
    ///
    /// assert_eq!(state.active_title.as_deref(), Some("Hello"));
    /// assert_eq!(state.history.get("Hello"), Some(&state.conversation));
    /// ```
    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::NewChat => {
                self.active_title = None;
                self.conversation = Conversation::new();
                self.document = DocumentContext::default();
            }
            Action::SelectChat(title) => match self.history.get(&title) {
                Some(conversation) => {
                    self.conversation = conversation.clone();
                    self.active_title = Some(title);
                }
                None => tracing::debug!("Ignoring selection of unknown chat '{}'", title),
            },
            Action::DocumentLoaded(text) => {
                self.document.raw_text = text;
            }
            Action::SummaryGenerated(summary) => {
                self.document.summary = summary;
            }
            Action::InsertSummary => {
                if self.document.summary.is_empty() {
                    return self;
                }
                self.conversation
                    .add_assistant_message(self.document.summary.clone());
                let title = self
                    .active_title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string());
                self.history.insert(title, self.conversation.clone());
            }
            Action::UserMessage(content) => {
                self.conversation.add_user_message(content);
            }
            Action::AssistantReply(reply) => {
                self.conversation.add_assistant_message(reply);
                let title = match self.active_title.clone() {
                    Some(title) => title,
                    None => {
                        let title = self
                            .conversation
                            .last_user_message()
                            .map(|m| derive_title(&m.content))
                            .unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string());
                        tracing::debug!("Derived chat title '{}'", title);
                        self.active_title = Some(title.clone());
                        title
                    }
                };
                self.history.insert(title, self.conversation.clone());
            }
            Action::ClearDocument => {
                self.document = DocumentContext::default();
            }
        }
        self
    }
}

/// Title for a chat: the first whitespace-separated word of its opening
/// message, or the default title for blank input
///
/// # Examples
///
/// ```
/// use docchat::session::state::derive_title;
///
/// assert_eq!(derive_title("Hello there"), "Hello");
/// assert_eq!(derive_title("   "), "Chat");
/// ```
pub fn derive_title(message: &str) -> String {
    message
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_CHAT_TITLE)
        .to_string()
}
