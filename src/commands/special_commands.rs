//! Special commands parser for interactive chat mode
//!
//! Special commands manage the session instead of being sent to the model:
//! chats, the uploaded document and its summary. Commands are prefixed with
//! `/`; the command word is case-insensitive while arguments (titles, paths)
//! keep their case.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a fresh chat and drop the document
    NewChat,

    /// List stored chats in the order they were created
    ListChats,

    /// Reopen a stored chat by title
    OpenChat(String),

    /// Load a `.txt`, `.csv` or `.pdf` file as the document
    Upload(PathBuf),

    /// Show the beginning of the extracted document text
    Preview,

    /// Generate an English summary of the document
    Summarize,

    /// Generate a summary and insert it into the chat
    SummarizeAndInsert,

    /// Insert the existing summary into the chat
    InsertSummary,

    /// Print the full summary
    ShowSummary,

    /// Write the summary to a file, in the given directory or the current one
    SaveSummary(Option<PathBuf>),

    /// Drop the document text and summary
    ClearDocument,

    /// Show the active chat, models and document status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the model as a chat message.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use docchat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(
///     parse_special_command("/open Quarterly Report"),
///     Ok(SpecialCommand::OpenChat("Quarterly Report".to_string()))
/// );
/// assert_eq!(parse_special_command("What is this?"), Ok(SpecialCommand::None));
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    let command = word.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') {
        return match (command.as_str(), arg) {
            ("exit" | "quit", "") => Ok(SpecialCommand::Exit),
            _ => Ok(SpecialCommand::None),
        };
    }

    match (command.as_str(), arg) {
        // Chats
        ("/new", "") => Ok(SpecialCommand::NewChat),
        ("/chats", "") => Ok(SpecialCommand::ListChats),
        ("/open", "") => Err(CommandError::MissingArgument {
            command: "/open".to_string(),
            usage: "/open <title>".to_string(),
        }),
        ("/open", title) => Ok(SpecialCommand::OpenChat(title.to_string())),

        // Document
        ("/upload", "") => Err(CommandError::MissingArgument {
            command: "/upload".to_string(),
            usage: "/upload <path>".to_string(),
        }),
        ("/upload", path) => Ok(SpecialCommand::Upload(PathBuf::from(path))),
        ("/preview", "") => Ok(SpecialCommand::Preview),
        ("/clear", "") => Ok(SpecialCommand::ClearDocument),

        // Summary
        ("/summarize", "") => Ok(SpecialCommand::Summarize),
        ("/summarize", sub) if sub.eq_ignore_ascii_case("insert") => {
            Ok(SpecialCommand::SummarizeAndInsert)
        }
        ("/insert", "") => Ok(SpecialCommand::InsertSummary),
        ("/summary", "") => Ok(SpecialCommand::ShowSummary),
        ("/save", "") => Ok(SpecialCommand::SaveSummary(None)),
        ("/save", dir) => Ok(SpecialCommand::SaveSummary(Some(PathBuf::from(dir)))),

        // Session information
        ("/status", "") => Ok(SpecialCommand::ShowStatus),
        ("/help" | "/?", "") => Ok(SpecialCommand::Help),
        ("/exit" | "/quit", "") => Ok(SpecialCommand::Exit),

        // Known command with an argument it does not take
        (
            "/new" | "/chats" | "/preview" | "/clear" | "/summarize" | "/insert" | "/summary"
            | "/status" | "/help" | "/?" | "/exit" | "/quit",
            arg,
        ) => Err(CommandError::UnsupportedArgument {
            command: command.clone(),
            arg: arg.to_string(),
        }),

        _ => Err(CommandError::UnknownCommand(word.to_string())),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

CHATS:
  /new               - Start a new chat (also clears the document)
  /chats             - List saved chats
  /open <title>      - Reopen a saved chat

DOCUMENT:
  /upload <path>     - Load a .txt, .csv or .pdf file as reference
  /preview           - Show the beginning of the extracted text
  /clear             - Clear the document and its summary

SUMMARY:
  /summarize         - Summarize the document in English
  /summarize insert  - Summarize and insert the summary into the chat
  /insert            - Insert the current summary into the chat
  /summary           - Show the full summary
  /save [dir]        - Save the summary as summary.txt

SESSION:
  /status            - Show chat, models and document status
  /help              - Show this help message
  /?                 - Same as /help
  exit               - Exit interactive mode
  quit               - Same as exit

NOTES:
  - Command names are case-insensitive; titles and paths are not
  - Regular text (not starting with /) is sent to the model
  - The first word of your first message names the chat
  - The beginning of the document is shared with the model on every turn
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_commands() {
        assert_eq!(parse_special_command("/new"), Ok(SpecialCommand::NewChat));
        assert_eq!(parse_special_command("/chats"), Ok(SpecialCommand::ListChats));
        assert_eq!(
            parse_special_command("/open Budget"),
            Ok(SpecialCommand::OpenChat("Budget".to_string()))
        );
    }

    #[test]
    fn test_parse_open_keeps_title_case_and_spaces() {
        assert_eq!(
            parse_special_command("/OPEN   Quarterly Report  "),
            Ok(SpecialCommand::OpenChat("Quarterly Report".to_string()))
        );
    }

    #[test]
    fn test_parse_open_without_title() {
        assert!(matches!(
            parse_special_command("/open"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_upload() {
        assert_eq!(
            parse_special_command("/upload docs/Report Q3.pdf"),
            Ok(SpecialCommand::Upload(PathBuf::from("docs/Report Q3.pdf")))
        );
        assert!(matches!(
            parse_special_command("/upload"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_document_commands() {
        assert_eq!(parse_special_command("/preview"), Ok(SpecialCommand::Preview));
        assert_eq!(
            parse_special_command("/clear"),
            Ok(SpecialCommand::ClearDocument)
        );
    }

    #[test]
    fn test_parse_summary_commands() {
        assert_eq!(
            parse_special_command("/summarize"),
            Ok(SpecialCommand::Summarize)
        );
        assert_eq!(
            parse_special_command("/summarize INSERT"),
            Ok(SpecialCommand::SummarizeAndInsert)
        );
        assert_eq!(
            parse_special_command("/insert"),
            Ok(SpecialCommand::InsertSummary)
        );
        assert_eq!(
            parse_special_command("/summary"),
            Ok(SpecialCommand::ShowSummary)
        );
    }

    #[test]
    fn test_parse_save() {
        assert_eq!(
            parse_special_command("/save"),
            Ok(SpecialCommand::SaveSummary(None))
        );
        assert_eq!(
            parse_special_command("/save out/Summaries"),
            Ok(SpecialCommand::SaveSummary(Some(PathBuf::from(
                "out/Summaries"
            ))))
        );
    }

    #[test]
    fn test_parse_help_and_status() {
        assert_eq!(parse_special_command("/help"), Ok(SpecialCommand::Help));
        assert_eq!(parse_special_command("/?"), Ok(SpecialCommand::Help));
        assert_eq!(
            parse_special_command("/status"),
            Ok(SpecialCommand::ShowStatus)
        );
    }

    #[test]
    fn test_parse_exit_variants() {
        for input in ["exit", "quit", "/exit", "/quit", "EXIT", "  Quit  "] {
            assert_eq!(parse_special_command(input), Ok(SpecialCommand::Exit));
        }
    }

    #[test]
    fn test_parse_exit_as_first_word_is_chat() {
        assert_eq!(
            parse_special_command("exit strategies for startups"),
            Ok(SpecialCommand::None)
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse_special_command("/NEW"), Ok(SpecialCommand::NewChat));
        assert_eq!(
            parse_special_command("/Summarize"),
            Ok(SpecialCommand::Summarize)
        );
    }

    #[test]
    fn test_parse_regular_text_returns_none() {
        assert_eq!(
            parse_special_command("Hello there"),
            Ok(SpecialCommand::None)
        );
        assert_eq!(parse_special_command(""), Ok(SpecialCommand::None));
        assert_eq!(parse_special_command("   "), Ok(SpecialCommand::None));
    }

    #[test]
    fn test_parse_unknown_command_returns_error() {
        let result = parse_special_command("/frobnicate now");
        assert_eq!(
            result,
            Err(CommandError::UnknownCommand("/frobnicate".to_string()))
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Type '/help' to see available commands"));
    }

    #[test]
    fn test_parse_unsupported_argument() {
        assert_eq!(
            parse_special_command("/summarize later"),
            Err(CommandError::UnsupportedArgument {
                command: "/summarize".to_string(),
                arg: "later".to_string(),
            })
        );
        assert!(matches!(
            parse_special_command("/new chat"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }
}
