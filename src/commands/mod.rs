/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`: Interactive chat about an uploaded document
- `summarize`: One-shot English summary of a document, saved to disk
- `extract`: Print the text extracted from a document
*/

use crate::config::Config;
use crate::error::{DocchatError, Result};
use crate::prompts::char_prefix;
use crate::session::ChatSession;

// Special commands parser for the interactive loop
pub mod special_commands;

/// Cut `text` to `max_chars` characters for display
///
/// Returns the visible part and whether anything was cut.
fn preview(text: &str, max_chars: usize) -> (&str, bool) {
    let shown = char_prefix(text, max_chars);
    (shown, shown.len() < text.len())
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Builds a `ChatSession` and runs a readline-based loop. Lines starting
    //! with `/` manage chats and the document; everything else is sent to the
    //! chat model.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::providers::is_sentinel;
    use crate::session::UploadOutcome;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::{Path, PathBuf};

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `file` - Optional document uploaded before the first prompt
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::commands::chat;
    /// use docchat::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default(), None).await?;
    /// ```
    pub async fn run_chat(config: Config, file: Option<PathBuf>) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut session = ChatSession::from_config(config)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session);

        if let Some(path) = file {
            upload(&mut session, &path);
        }

        loop {
            let prompt = format_prompt(&session);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    if command == SpecialCommand::None {
                        let reply = session.send(trimmed).await;
                        print_reply(&reply);
                        continue;
                    }

                    if !handle_special_command(&mut session, command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Run one special command; returns false when the session should end
    async fn handle_special_command(session: &mut ChatSession, command: SpecialCommand) -> bool {
        match command {
            SpecialCommand::NewChat => {
                session.new_chat();
                println!("{}\n", "Started a new chat.".green());
            }
            SpecialCommand::ListChats => print_chat_list(session),
            SpecialCommand::OpenChat(title) => match session.select_chat(&title) {
                Ok(()) => print_conversation(session),
                Err(e) => eprintln!("{}\n", e.to_string().red()),
            },
            SpecialCommand::Upload(path) => upload(session, &path),
            SpecialCommand::Preview => print_document_preview(session),
            SpecialCommand::ClearDocument => {
                session.clear_document();
                println!("{}\n", "Cleared uploaded file and summary.".green());
            }
            SpecialCommand::Summarize => {
                println!("{}", "Summarizing file in English...".cyan());
                match session.summarize().await {
                    Some(summary) if is_sentinel(&summary) => println!("{}\n", summary.red()),
                    Some(_) => {
                        println!("{}", "Summary generated.".green());
                        print_summary_preview(session);
                    }
                    None => println!("{}\n", "Upload a file first to summarize.".yellow()),
                }
            }
            SpecialCommand::SummarizeAndInsert => {
                println!("{}", "Summarizing and inserting into chat...".cyan());
                if session.summarize_and_insert().await {
                    println!("{}\n", "Inserted summary into chat.".green());
                } else {
                    println!("{}\n", "Upload a file first to summarize.".yellow());
                }
            }
            SpecialCommand::InsertSummary => {
                if session.insert_summary() {
                    println!("{}\n", "Inserted summary into chat.".green());
                } else {
                    println!("{}\n", "Generate a summary first.".yellow());
                }
            }
            SpecialCommand::ShowSummary => {
                let summary = &session.state().document.summary;
                if summary.is_empty() {
                    println!("{}\n", "Generate a summary first.".yellow());
                } else {
                    println!("\n{}\n", summary);
                }
            }
            SpecialCommand::SaveSummary(dir) => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                match session.save_summary(&dir) {
                    Ok(path) => println!("{}\n", format!("Saved {}", path.display()).green()),
                    Err(e) => eprintln!("{}\n", e.to_string().red()),
                }
            }
            SpecialCommand::ShowStatus => print_status_display(session),
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit => return false,
            SpecialCommand::None => {}
        }
        true
    }

    fn upload(session: &mut ChatSession, path: &Path) {
        match session.upload_path(path) {
            Ok(outcome) => print_upload_outcome(path, &outcome),
            Err(e) => eprintln!("{}\n", e.to_string().red()),
        }
    }

    fn print_upload_outcome(path: &Path, outcome: &UploadOutcome) {
        if let Some(error) = &outcome.error {
            eprintln!("{}\n", error.red());
            return;
        }
        if outcome.is_best_effort() {
            println!(
                "{}",
                "Could not decode the file cleanly; some characters were replaced.".yellow()
            );
        }
        println!(
            "{}\n",
            format!(
                "Loaded {} ({} characters)",
                path.display(),
                outcome.chars
            )
            .green()
        );
    }

    fn print_reply(reply: &str) {
        if is_sentinel(reply) {
            println!("\n{}\n", reply.red());
        } else {
            println!("\n{}\n", reply);
        }
    }

    fn format_prompt(session: &ChatSession) -> String {
        let title = session.state().active_title.as_deref().unwrap_or("new chat");
        let marker = if session.state().document.raw_text.is_empty() {
            String::new()
        } else {
            format!(" {}", "[doc]".cyan())
        };
        format!("[{}]{} >> ", title.bold(), marker)
    }

    fn print_chat_list(session: &ChatSession) {
        let history = &session.state().history;
        if history.is_empty() {
            println!("{}\n", "No saved chats yet.".yellow());
            return;
        }

        let active = session.state().active_title.as_deref();
        println!("\nSaved chats:");
        for (title, conversation) in history.iter() {
            let marker = if Some(title) == active { "*" } else { " " };
            println!(
                " {} {} ({} messages)",
                marker,
                title.bold(),
                conversation.len()
            );
        }
        println!();
    }

    fn print_conversation(session: &ChatSession) {
        let state = session.state();
        println!(
            "\n{}\n",
            format!(
                "Opened '{}'",
                state.active_title.as_deref().unwrap_or_default()
            )
            .green()
        );
        for message in state.conversation.messages() {
            println!("{}: {}\n", message.role.to_string().bold(), message.content);
        }
    }

    fn print_document_preview(session: &ChatSession) {
        let document = &session.state().document;
        if document.raw_text.is_empty() {
            println!("{}\n", "No file uploaded.".yellow());
            return;
        }
        let limit = session.config().extraction.preview_chars;
        let (shown, _) = preview(&document.raw_text, limit);
        println!("\nFile preview (first {} characters):", limit);
        println!("{}\n", shown);
    }

    fn print_summary_preview(session: &ChatSession) {
        let limit = session.config().summary.preview_chars;
        let (shown, truncated) = preview(&session.state().document.summary, limit);
        println!("\n{}", shown);
        if truncated {
            println!(
                "{}",
                "...summary truncated in preview; use /insert or /summary to see all of it."
                    .italic()
            );
        }
        println!();
    }

    /// Display the welcome banner with the configured models
    fn print_welcome_banner(session: &ChatSession) {
        let config = session.config();
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║             docchat Interactive Chat - Welcome!              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Chat model:    {}", config.ollama.chat_model.cyan());
        println!("Summary model: {}\n", config.ollama.summary_model.cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display the active chat, models and document state
    fn print_status_display(session: &ChatSession) {
        let state = session.state();
        let config = session.config();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    docchat Session Status                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Active Chat:       {}",
            state.active_title.as_deref().unwrap_or("(untitled)")
        );
        println!("Conversation Size: {} messages", state.conversation.len());
        println!("Saved Chats:       {}", state.history.len());
        println!(
            "Provider:          {} ({})",
            session.provider_name(),
            config.ollama.host
        );
        println!("Chat Model:        {}", config.ollama.chat_model);
        println!("Summary Model:     {}", config.ollama.summary_model);
        println!(
            "Document:          {} characters",
            state.document.raw_text.chars().count()
        );
        println!(
            "Summary:           {} characters",
            state.document.summary.chars().count()
        );
        println!();
    }
}

// Summarize command handler
pub mod summarize {
    //! One-shot document summary.

    use super::*;
    use crate::providers::is_sentinel;
    use std::path::Path;

    /// Summarize `path` with the summary model and save the result in `output`
    ///
    /// The summary is printed to stdout and written to the configured file
    /// name inside `output`.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be read, has no text, or the
    /// model call fails
    pub async fn run_summarize(config: Config, path: &Path, output: &Path) -> Result<()> {
        tracing::info!("Summarizing {}", path.display());

        let mut session = ChatSession::from_config(config)?;
        let outcome = session.upload_path(path)?;
        if let Some(error) = outcome.error {
            return Err(DocchatError::Session(error).into());
        }
        if outcome.is_best_effort() {
            tracing::warn!(
                "{} could not be decoded cleanly; some characters were replaced",
                path.display()
            );
        }

        let summary = session.summarize().await.ok_or_else(|| {
            DocchatError::Session(format!("No text could be extracted from {}", path.display()))
        })?;

        if is_sentinel(&summary) {
            return Err(DocchatError::Provider(summary).into());
        }

        println!("{}", summary);
        let saved = session.save_summary(output)?;
        eprintln!("Saved {}", saved.display());
        Ok(())
    }
}

// Extract command handler
pub mod extract {
    //! Plain text extraction to stdout.

    use super::*;
    use crate::extract::{extract, DocumentKind, ExtractionError, TextSource};
    use std::path::Path;

    /// Print the text extracted from `path`
    ///
    /// # Errors
    ///
    /// Returns error if the extension is unsupported, the file cannot be
    /// read, or the PDF parser fails
    pub fn run_extract(config: &Config, path: &Path) -> Result<()> {
        let kind = DocumentKind::from_path(path).ok_or_else(|| {
            ExtractionError::UnsupportedType(path.display().to_string())
        })?;
        let bytes = std::fs::read(path)?;
        let extracted = extract(&bytes, kind.mime(), &config.extraction.encodings)
            .map_err(DocchatError::from)?;

        match extracted.source {
            TextSource::Pdf {
                pages_with_text,
                total_pages,
            } => tracing::info!(
                "Extracted text from {} of {} pages",
                pages_with_text,
                total_pages
            ),
            TextSource::Decoded(encoding) => tracing::info!("Decoded as {}", encoding),
            TextSource::Lossy => tracing::warn!(
                "{} could not be decoded cleanly; some characters were replaced",
                path.display()
            ),
        }

        println!("{}", extracted.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_error_contains, create_test_file, temp_dir, test_config};

    #[test]
    fn test_preview_short_text_is_whole() {
        assert_eq!(preview("short", 800), ("short", false));
    }

    #[test]
    fn test_preview_long_text_is_cut() {
        let text = "é".repeat(900);
        let (shown, truncated) = preview(&text, 800);
        assert!(truncated);
        assert_eq!(shown.chars().count(), 800);
    }

    #[test]
    fn test_preview_exact_length_not_truncated() {
        let text = "a".repeat(800);
        assert_eq!(preview(&text, 800), (text.as_str(), false));
    }

    #[test]
    fn test_run_extract_prints_text_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "data.csv", b"a,b\n1,2\n");
        assert!(extract::run_extract(&test_config(), &path).is_ok());
    }

    #[test]
    fn test_run_extract_rejects_unknown_extension() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "data.docx", b"x");
        assert_error_contains(
            extract::run_extract(&test_config(), &path),
            "Unsupported file type",
        );
    }
}
