//! Provider module for docchat
//!
//! This module contains the model provider abstraction, the Ollama
//! implementation and the gateway that turns provider results into reply
//! text.

pub mod base;
pub mod gateway;
pub mod ollama;

pub use base::{GatewayError, Message, Provider, Role};
pub use gateway::{is_sentinel, reply_text, ModelGateway, NO_REPLY};
pub use ollama::OllamaProvider;

use crate::config::OllamaConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the configured provider
///
/// # Errors
///
/// Returns error if provider initialization fails
pub fn create_provider(config: &OllamaConfig) -> Result<Arc<dyn Provider>> {
    Ok(Arc::new(OllamaProvider::new(config.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider() {
        let provider = create_provider(&OllamaConfig::default()).unwrap();
        assert_eq!(provider.name(), "ollama");
    }
}
