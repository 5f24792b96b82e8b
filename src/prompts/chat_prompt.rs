//! Chat turn context assembly

use super::char_prefix;
use crate::config::ContextConfig;
use crate::providers::Message;
use crate::session::DocumentContext;

/// Base instruction sent as the system message of every chat turn
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Answer concisely and clearly.";

/// Label placed before the document excerpt in the system message
pub const REFERENCE_LABEL: &str =
    "Here’s some reference text from the uploaded file (use it if relevant):";

/// Limits applied when assembling chat context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    /// Most recent conversation messages kept
    pub max_history: usize,
    /// Characters of the document text included in the system message
    pub excerpt_chars: usize,
    /// Base system instruction
    pub system_prompt: String,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            max_history: 10,
            excerpt_chars: 2000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl From<&ContextConfig> for ContextOptions {
    fn from(config: &ContextConfig) -> Self {
        Self {
            max_history: config.max_history,
            excerpt_chars: config.excerpt_chars,
            system_prompt: config.system_prompt.clone(),
        }
    }
}

/// Build the message list for a chat turn
///
/// The result is one system message followed by at most
/// `options.max_history` of the most recent conversation messages. When the
/// document has text, its first `options.excerpt_chars` characters are
/// appended to the system instruction after a blank line and a label.
///
/// The conversation is not modified; older messages are only left out of
/// what the model sees.
///
/// # Examples
///
/// ```
/// use docchat::prompts::{build_chat_messages, ContextOptions};
/// use docchat::providers::{Message, Role};
/// use docchat::session::DocumentContext;
///
/// let conversation = vec![Message::user("Hi")];
/// let messages = build_chat_messages(
///     &conversation,
///     &DocumentContext::default(),
///     &ContextOptions::default(),
/// );
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, Role::System);
/// ```
pub fn build_chat_messages(
    conversation: &[Message],
    document: &DocumentContext,
    options: &ContextOptions,
) -> Vec<Message> {
    let mut system = options.system_prompt.clone();
    if !document.raw_text.is_empty() {
        system.push_str("\n\n");
        system.push_str(REFERENCE_LABEL);
        system.push('\n');
        system.push_str(char_prefix(&document.raw_text, options.excerpt_chars));
    }

    let start = conversation.len().saturating_sub(options.max_history);
    let mut messages = Vec::with_capacity(conversation.len() - start + 1);
    messages.push(Message::system(system));
    messages.extend_from_slice(&conversation[start..]);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Role;

    fn document(text: &str) -> DocumentContext {
        DocumentContext {
            raw_text: text.to_string(),
            summary: String::new(),
        }
    }

    #[test]
    fn test_no_document_uses_base_instruction_only() {
        let messages = build_chat_messages(
            &[Message::user("Hello there")],
            &DocumentContext::default(),
            &ContextOptions::default(),
        );
        assert_eq!(messages[0], Message::system(DEFAULT_SYSTEM_PROMPT));
        assert_eq!(messages[1], Message::user("Hello there"));
    }

    #[test]
    fn test_document_excerpt_is_labelled() {
        let messages = build_chat_messages(
            &[Message::user("What is this?")],
            &document("Quarterly revenue grew."),
            &ContextOptions::default(),
        );
        let expected = format!(
            "{}\n\n{}\nQuarterly revenue grew.",
            DEFAULT_SYSTEM_PROMPT, REFERENCE_LABEL
        );
        assert_eq!(messages[0].content, expected);
    }

    #[test]
    fn test_long_document_excerpt_is_exact_prefix() {
        let text: String = "abcdé".repeat(1000);
        let messages = build_chat_messages(&[], &document(&text), &ContextOptions::default());

        let excerpt = messages[0]
            .content
            .split_once(&format!("{}\n", REFERENCE_LABEL))
            .map(|(_, excerpt)| excerpt)
            .unwrap();
        assert_eq!(excerpt.chars().count(), 2000);
        assert_eq!(excerpt, text.chars().take(2000).collect::<String>());
    }

    #[test]
    fn test_history_is_limited_to_most_recent() {
        let conversation: Vec<Message> = (0..15)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{}", i))
                } else {
                    Message::assistant(format!("a{}", i))
                }
            })
            .collect();

        let messages = build_chat_messages(
            &conversation,
            &DocumentContext::default(),
            &ContextOptions::default(),
        );

        assert_eq!(messages.len(), 11);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(&messages[1..], &conversation[5..]);
        assert_eq!(conversation.len(), 15);
    }

    #[test]
    fn test_short_history_is_kept_whole() {
        let conversation = vec![Message::user("one"), Message::assistant("two")];
        let options = ContextOptions {
            max_history: 4,
            ..ContextOptions::default()
        };
        let messages = build_chat_messages(&conversation, &DocumentContext::default(), &options);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_custom_system_prompt() {
        let options = ContextOptions {
            system_prompt: "Be terse.".to_string(),
            excerpt_chars: 3,
            ..ContextOptions::default()
        };
        let messages = build_chat_messages(&[], &document("abcdef"), &options);
        assert_eq!(
            messages[0].content,
            format!("Be terse.\n\n{}\nabc", REFERENCE_LABEL)
        );
    }

    #[test]
    fn test_options_from_config() {
        let config = ContextConfig {
            max_history: 2,
            excerpt_chars: 50,
            system_prompt: "x".to_string(),
        };
        let options = ContextOptions::from(&config);
        assert_eq!(options.max_history, 2);
        assert_eq!(options.excerpt_chars, 50);
        assert_eq!(options.system_prompt, "x");
    }
}
