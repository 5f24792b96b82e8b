//! Configuration management for docchat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{DocchatError, Result};
use crate::extract::TextEncoding;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for docchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Ollama server and model selection
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Chat context assembly limits
    #[serde(default)]
    pub context: ContextConfig,

    /// Document summarization settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Uploaded file decoding settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Ollama provider configuration
///
/// The chat and summary models are independent: chat turns use a small,
/// fast model and document summaries use a larger one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model used for interactive chat turns
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for document summarization
    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_chat_model() -> String {
    "llama3.2:1b".to_string()
}

fn default_summary_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            chat_model: default_chat_model(),
            summary_model: default_summary_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Chat context assembly configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Number of most recent conversation messages sent to the model
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Character cap for the document excerpt added to the system prompt
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Base system instruction for chat turns
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_max_history() -> usize {
    10
}

fn default_excerpt_chars() -> usize {
    2000
}

fn default_system_prompt() -> String {
    crate::prompts::chat_prompt::DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            excerpt_chars: default_excerpt_chars(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Document summarization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Character cap for the document text sent for summarization
    #[serde(default = "default_summary_max_chars")]
    pub max_chars: usize,

    /// Characters of the summary shown by the REPL preview
    #[serde(default = "default_summary_preview_chars")]
    pub preview_chars: usize,

    /// File name used when exporting the summary
    #[serde(default = "default_summary_file_name")]
    pub file_name: String,
}

fn default_summary_max_chars() -> usize {
    20_000
}

fn default_summary_preview_chars() -> usize {
    800
}

fn default_summary_file_name() -> String {
    "summary.txt".to_string()
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_chars: default_summary_max_chars(),
            preview_chars: default_summary_preview_chars(),
            file_name: default_summary_file_name(),
        }
    }
}

/// Uploaded file extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Candidate encodings tried in order for non-PDF uploads
    #[serde(default = "default_encodings")]
    pub encodings: Vec<TextEncoding>,

    /// Characters of the extracted text shown by the REPL preview
    #[serde(default = "default_extraction_preview_chars")]
    pub preview_chars: usize,
}

fn default_encodings() -> Vec<TextEncoding> {
    TextEncoding::DEFAULT_CANDIDATES.to_vec()
}

fn default_extraction_preview_chars() -> usize {
    1500
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            encodings: default_encodings(),
            preview_chars: default_extraction_preview_chars(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DocchatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DocchatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(host) = std::env::var("DOCCHAT_OLLAMA_HOST") {
            self.ollama.host = host;
        }

        if let Ok(model) = std::env::var("DOCCHAT_CHAT_MODEL") {
            self.ollama.chat_model = model;
        }

        if let Ok(model) = std::env::var("DOCCHAT_SUMMARY_MODEL") {
            self.ollama.summary_model = model;
        }

        if let Ok(timeout) = std::env::var("DOCCHAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.ollama.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid DOCCHAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(max_history) = std::env::var("DOCCHAT_MAX_HISTORY") {
            if let Ok(value) = max_history.parse() {
                self.context.max_history = value;
            } else {
                tracing::warn!("Invalid DOCCHAT_MAX_HISTORY: {}", max_history);
            }
        }

        if let Ok(excerpt) = std::env::var("DOCCHAT_EXCERPT_CHARS") {
            if let Ok(value) = excerpt.parse() {
                self.context.excerpt_chars = value;
            } else {
                tracing::warn!("Invalid DOCCHAT_EXCERPT_CHARS: {}", excerpt);
            }
        }

        if let Ok(max_chars) = std::env::var("DOCCHAT_SUMMARY_MAX_CHARS") {
            if let Ok(value) = max_chars.parse() {
                self.summary.max_chars = value;
            } else {
                tracing::warn!("Invalid DOCCHAT_SUMMARY_MAX_CHARS: {}", max_chars);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(host) = &cli.host {
            tracing::debug!("CLI override: host={}", host);
            self.ollama.host = host.clone();
        }

        if let Some(model) = &cli.chat_model {
            tracing::debug!("CLI override: chat_model={}", model);
            self.ollama.chat_model = model.clone();
        }

        if let Some(model) = &cli.summary_model {
            tracing::debug!("CLI override: summary_model={}", model);
            self.ollama.summary_model = model.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `DocchatError::Config` naming the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.ollama.host.trim().is_empty() {
            return Err(DocchatError::Config("ollama.host cannot be empty".to_string()).into());
        }

        if self.ollama.chat_model.trim().is_empty() {
            return Err(
                DocchatError::Config("ollama.chat_model cannot be empty".to_string()).into(),
            );
        }

        if self.ollama.summary_model.trim().is_empty() {
            return Err(
                DocchatError::Config("ollama.summary_model cannot be empty".to_string()).into(),
            );
        }

        if self.ollama.timeout_seconds == 0 {
            return Err(DocchatError::Config(
                "ollama.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.context.max_history == 0 {
            return Err(DocchatError::Config(
                "context.max_history must be greater than 0".to_string(),
            )
            .into());
        }

        if self.context.excerpt_chars == 0 {
            return Err(DocchatError::Config(
                "context.excerpt_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.summary.max_chars == 0 {
            return Err(DocchatError::Config(
                "summary.max_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.summary.file_name.trim().is_empty() {
            return Err(
                DocchatError::Config("summary.file_name cannot be empty".to_string()).into(),
            );
        }

        if self.extraction.encodings.is_empty() {
            return Err(DocchatError::Config(
                "extraction.encodings must list at least one encoding".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
