//! Base provider trait and common message types for docchat
//!
//! This module defines the `Provider` trait that model backends implement,
//! the role-tagged `Message` exchanged with them, and the two failure
//! classes a backend can report.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person chatting
    User,
    /// The model
    Assistant,
    /// Instructions for the model
    System,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role-tagged message
///
/// Messages are immutable once created; conversations own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Failure reported by a provider
///
/// The two classes are shown to the user with different prefixes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The model service answered but rejected the request
    #[error("{0}")]
    Service(String),

    /// The model service could not be reached or its answer was unreadable
    #[error("{0}")]
    Connection(String),
}

/// Trait for model backends
///
/// A provider sends one non-streaming chat request and returns the reply
/// content, or `None` when the response is well-formed but carries no
/// content.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use docchat::providers::{GatewayError, Message, Provider};
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn chat(
///         &self,
///         _model: &str,
///         messages: &[Message],
///     ) -> Result<Option<String>, GatewayError> {
///         Ok(messages.last().map(|m| m.content.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send `messages` to `model` and return the reply content
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Service` when the service rejects the request
    /// and `GatewayError::Connection` for any other failure
    async fn chat(&self, model: &str, messages: &[Message])
        -> Result<Option<String>, GatewayError>;

    /// Short provider name for logs and status output
    fn name(&self) -> &str {
        "provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("u").role, Role::User);
        assert_eq!(Message::assistant("a").role, Role::Assistant);
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("content").content, "content");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);

        let parsed: Message = serde_json::from_str(r#"{"role":"system","content":"x"}"#).unwrap();
        assert_eq!(parsed.role, Role::System);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_gateway_error_display_is_detail() {
        let error = GatewayError::Service("model 'x' not found".to_string());
        assert_eq!(error.to_string(), "model 'x' not found");
    }

    #[tokio::test]
    async fn test_default_provider_name() {
        struct Silent;

        #[async_trait]
        impl Provider for Silent {
            async fn chat(
                &self,
                _model: &str,
                _messages: &[Message],
            ) -> Result<Option<String>, GatewayError> {
                Ok(None)
            }
        }

        let provider = Silent;
        assert_eq!(provider.name(), "provider");
        assert_eq!(provider.chat("m", &[]).await, Ok(None));
    }
}
