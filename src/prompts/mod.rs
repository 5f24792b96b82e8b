//! Context assembly for model calls
//!
//! Builds the ordered message lists sent to the model: one for chat turns
//! (system instruction, optional document excerpt, recent history) and one
//! for document summarization.

pub mod chat_prompt;
pub mod summary_prompt;

pub use chat_prompt::{build_chat_messages, ContextOptions, DEFAULT_SYSTEM_PROMPT};
pub use summary_prompt::{build_summary_messages, SUMMARY_SYSTEM_PROMPT};

/// Return the first `max_chars` characters of `text`
///
/// Counts Unicode scalar values, not bytes, so multi-byte characters are
/// never split. No word boundary awareness.
///
/// # Examples
///
/// ```
/// use docchat::prompts::char_prefix;
///
/// assert_eq!(char_prefix("héllo wörld", 4), "héll");
/// assert_eq!(char_prefix("short", 100), "short");
/// ```
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_prefix_counts_chars_not_bytes() {
        let text = "日本語のテキスト";
        assert_eq!(char_prefix(text, 3), "日本語");
        assert_eq!(char_prefix(text, 3).chars().count(), 3);
    }

    #[test]
    fn test_char_prefix_exact_length_and_zero() {
        assert_eq!(char_prefix("abc", 3), "abc");
        assert_eq!(char_prefix("abc", 0), "");
        assert_eq!(char_prefix("", 10), "");
    }
}
