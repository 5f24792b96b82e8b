//! Model gateway: provider calls that never fail
//!
//! Every outcome of a provider call becomes displayable reply text. Failures
//! turn into sentinel strings that are stored in the conversation like any
//! other assistant reply.

use crate::providers::{GatewayError, Message, Provider};
use std::sync::Arc;

/// Reply used when the model answered without any content
pub const NO_REPLY: &str = "⚠️ No reply from model.";

/// Prefix for replies produced by a service rejection
pub const SERVICE_ERROR_PREFIX: &str = "⚠️ Ollama error: ";

/// Prefix for replies produced by a connectivity failure
pub const CONNECTION_ERROR_PREFIX: &str = "⚠️ Connection error: ";

/// Turns provider results into reply text
#[derive(Clone)]
pub struct ModelGateway {
    provider: Arc<dyn Provider>,
}

impl ModelGateway {
    /// Wrap a provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Send `messages` to `model` and return the reply or a sentinel
    ///
    /// No retries are attempted.
    pub async fn complete(&self, model: &str, messages: &[Message]) -> String {
        let result = self.provider.chat(model, messages).await;
        if let Err(e) = &result {
            tracing::warn!("Model call to {} failed: {:?}", model, e);
        }
        reply_text(result)
    }
}

/// Map a provider result to the text shown to the user
///
/// # Examples
///
/// ```
/// use docchat::providers::{reply_text, GatewayError};
///
/// assert_eq!(reply_text(Ok(Some("Hi!".to_string()))), "Hi!");
/// assert_eq!(reply_text(Ok(None)), "⚠️ No reply from model.");
/// assert_eq!(
///     reply_text(Err(GatewayError::Connection("refused".to_string()))),
///     "⚠️ Connection error: refused"
/// );
/// ```
pub fn reply_text(result: Result<Option<String>, GatewayError>) -> String {
    match result {
        Ok(Some(content)) if !content.is_empty() => content,
        Ok(_) => NO_REPLY.to_string(),
        Err(GatewayError::Service(detail)) => format!("{}{}", SERVICE_ERROR_PREFIX, detail),
        Err(GatewayError::Connection(detail)) => format!("{}{}", CONNECTION_ERROR_PREFIX, detail),
    }
}

/// True when `reply` is one of the gateway's failure sentinels
pub fn is_sentinel(reply: &str) -> bool {
    reply == NO_REPLY
        || reply.starts_with(SERVICE_ERROR_PREFIX)
        || reply.starts_with(CONNECTION_ERROR_PREFIX)
}
