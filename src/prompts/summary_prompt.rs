//! Document summarization context assembly

use super::char_prefix;
use crate::providers::Message;

/// System instruction for document summaries
///
/// The summary is always written in English, whatever the language of the
/// document.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
The input text may be in any language. \
Your task is to generate the summary ONLY in English, regardless of the input language. \
Do NOT use any words or sentences from the original language. \
Write a 4–6 sentence English summary and then 6–10 bullet points of key insights. \
Use simple English suitable for beginners.";

/// Build the two-message request for summarizing `text`
///
/// The user message carries at most `max_chars` characters of the text.
///
/// # Examples
///
/// ```
/// use docchat::prompts::build_summary_messages;
/// use docchat::providers::Role;
///
/// let messages = build_summary_messages("Der Bericht beschreibt...", 20_000);
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[1].content, "Der Bericht beschreibt...");
/// ```
pub fn build_summary_messages(text: &str, max_chars: usize) -> Vec<Message> {
    vec![
        Message::system(SUMMARY_SYSTEM_PROMPT),
        Message::user(char_prefix(text, max_chars)),
    ]
}
