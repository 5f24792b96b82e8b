//! Ollama provider implementation for docchat
//!
//! This module implements the Provider trait for Ollama, sending one
//! non-streaming request to the `/api/chat` endpoint per call.

use crate::config::OllamaConfig;
use crate::error::{DocchatError, Result};
use crate::providers::{GatewayError, Message, Provider};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// Connects to a local or remote Ollama server. The model is chosen per
/// call, so one provider serves both chat turns and summaries.
///
/// # Examples
///
/// ```no_run
/// use docchat::config::OllamaConfig;
/// use docchat::providers::{Message, OllamaProvider, Provider};
///
/// # async fn example() -> docchat::error::Result<()> {
/// let provider = OllamaProvider::new(OllamaConfig::default())?;
/// let reply = provider.chat("llama3.2:1b", &[Message::user("Hello!")]).await;
/// # Ok(())
/// # }
/// ```
pub struct OllamaProvider {
    client: Client,
    host: String,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    error: Option<String>,
}

/// Reply message from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Arguments
    ///
    /// * `config` - Ollama configuration containing host and timeout
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::config::OllamaConfig;
    /// use docchat::providers::OllamaProvider;
    ///
    /// let provider = OllamaProvider::new(OllamaConfig::default());
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("docchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocchatError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Ollama provider: host={}, chat_model={}, summary_model={}",
            config.host,
            config.chat_model,
            config.summary_model
        );

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured Ollama host
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::config::OllamaConfig;
    /// use docchat::providers::OllamaProvider;
    ///
    /// let provider = OllamaProvider::new(OllamaConfig::default()).unwrap();
    /// assert_eq!(provider.host(), "http://localhost:11434");
    /// ```
    pub fn host(&self) -> &str {
        &self.host
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.host)
    }
}

/// Format a service rejection the way users see it in the chat
fn service_detail(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<OllamaErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| body.trim().to_string());
    format!("{} (status code: {})", message, status.as_u16())
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
    ) -> std::result::Result<Option<String>, GatewayError> {
        let request = OllamaRequest {
            model,
            messages,
            stream: false,
        };

        tracing::debug!(
            "Sending Ollama request: model={}, {} messages",
            model,
            messages.len()
        );

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                GatewayError::Connection(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Ollama response body: {}", e);
            GatewayError::Connection(e.to_string())
        })?;

        if !status.is_success() {
            tracing::error!("Ollama returned error {}: {}", status, body);
            return Err(GatewayError::Service(service_detail(status, &body)));
        }

        let parsed: OllamaResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            GatewayError::Connection(format!("Failed to parse Ollama response: {}", e))
        })?;

        if let Some(error) = parsed.error {
            tracing::error!("Ollama reported error: {}", error);
            return Err(GatewayError::Service(format!(
                "{} (status code: {})",
                error,
                status.as_u16()
            )));
        }

        let content = parsed
            .message
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty());

        tracing::debug!(
            "Ollama response: {} chars",
            content.as_ref().map(|c| c.chars().count()).unwrap_or(0)
        );

        Ok(content)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
