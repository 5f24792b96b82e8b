//! Named chat history

use super::Conversation;

/// Chats by title, kept in insertion order
///
/// Storing under an existing title replaces that chat in place, so the
/// listing order is the order in which titles were first stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    entries: Vec<(String, Conversation)>,
}

impl ChatHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot of `conversation` under `title`
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::session::{ChatHistory, Conversation};
    ///
    /// let mut history = ChatHistory::new();
    /// history.insert("Hello", Conversation::new());
    /// history.insert("Report", Conversation::new());
    /// history.insert("Hello", Conversation::new());
    /// assert_eq!(history.titles().collect::<Vec<_>>(), vec!["Hello", "Report"]);
    /// ```
    pub fn insert(&mut self, title: impl Into<String>, conversation: Conversation) {
        let title = title.into();
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some(entry) => entry.1 = conversation,
            None => self.entries.push((title, conversation)),
        }
    }

    /// Chat stored under `title`
    pub fn get(&self, title: &str) -> Option<&Conversation> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, conversation)| conversation)
    }

    /// True when a chat is stored under `title`
    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    /// Titles in insertion order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Titles with their chats, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Conversation)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), c))
    }

    /// Number of stored chats
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no chat has been stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
