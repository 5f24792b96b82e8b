//! Ordered message list of a single chat

use crate::providers::{Message, Role};

/// An ordered sequence of user and assistant messages
///
/// Messages are only ever appended. System messages are never stored here;
/// they are assembled per model call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages in order
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::session::Conversation;
    ///
    /// let mut conversation = Conversation::new();
    /// conversation.add_user_message("Hi");
    /// conversation.add_assistant_message("Hello!");
    /// assert_eq!(conversation.messages().len(), 2);
    /// ```
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent user message, if any
    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role == Role::User)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no message has been added
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}
