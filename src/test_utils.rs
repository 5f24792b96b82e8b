//! Test utilities for docchat
//!
//! Temporary directories, test files, a scripted provider and assertion
//! helpers shared by unit tests.

use crate::config::Config;
use crate::providers::{GatewayError, Message, Provider};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// The directory is removed when the returned value is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration with default values
pub fn test_config() -> Config {
    Config::default()
}

/// Provider that returns a fixed result and records every call
pub struct MockProvider {
    result: Result<Option<String>, GatewayError>,
    calls: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
}

impl MockProvider {
    /// Always reply with `content`
    pub fn replying(content: &str) -> Self {
        Self::with_result(Ok(Some(content.to_string())))
    }

    /// Always answer without content
    pub fn silent() -> Self {
        Self::with_result(Ok(None))
    }

    /// Always fail with `error`
    pub fn failing(error: GatewayError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<Option<String>, GatewayError>) -> Self {
        Self {
            result,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Models requested, in call order
    pub fn models(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    /// Messages sent with the most recent call
    pub fn last_messages(&self) -> Vec<Message> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, messages)| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<Option<String>, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.result.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocchatError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", b"content");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> =
            Err(DocchatError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_is_valid() {
        assert!(test_config().validate().is_ok());
    }

    #[tokio::test]
    async fn test_mock_provider_records_calls() {
        let provider = MockProvider::replying("hi");
        provider.chat("a", &[Message::user("one")]).await.unwrap();
        provider.chat("b", &[Message::user("two")]).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.models(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(provider.last_messages(), vec![Message::user("two")]);
    }
}
