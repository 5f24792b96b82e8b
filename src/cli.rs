//! Command-line interface definition for docchat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot summaries and
//! plain text extraction.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docchat - chat with a local Ollama model about your documents
#[derive(Parser, Debug, Clone)]
#[command(name = "docchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the Ollama host from config
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Override the model used for chat turns
    #[arg(long, global = true)]
    pub chat_model: Option<String>,

    /// Override the model used for document summaries
    #[arg(long, global = true)]
    pub summary_model: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for docchat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Upload this document before the first prompt
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Summarize a document in English and export it
    Summarize {
        /// Document to summarize (.txt, .csv or .pdf)
        path: PathBuf,

        /// Directory the summary file is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Print the text extracted from a document
    Extract {
        /// Document to read (.txt, .csv or .pdf)
        path: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            host: None,
            chat_model: None,
            summary_model: None,
            command: Commands::Chat { file: None },
        }
    }
}
