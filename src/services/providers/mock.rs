//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// What the mock should do when asked to generate.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with a fixed text body.
    Reply(String),
    /// Fail as if the network were unreachable.
    NetworkDown,
    /// Fail as if the upstream API rejected the request.
    RateLimited,
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    behavior: MockBehavior,
}

impl MockTextProvider {
    /// Mock that replies with a well-formed prediction object.
    pub fn new() -> Self {
        Self::with_response(
            r#"{"most_likely_word":"مرحبا","list_of_other_likely_words":["مرحبا بك"],"is_a_full_sentence":false}"#,
        )
    }

    /// Mock that replies with the given text verbatim.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(text.into()),
        }
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self { behavior }
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        match &self.behavior {
            MockBehavior::Reply(text) => Ok(ProviderResponse {
                text: Some(text.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockBehavior::NetworkDown => Err(ProviderError::NetworkError(
                "connection refused".to_string(),
            )),
            MockBehavior::RateLimited => Err(ProviderError::RateLimited),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
