//! Prediction service: the single stateless round trip to the model.
//!
//! Holds the fixed decoding configuration, output schema, and system
//! instruction, and turns a gesture sequence into a [`Prediction`].

use crate::error::AppError;
use crate::models::{prediction_output_schema, Prediction};
use crate::services::providers::{GenerationParams, TextProvider};
use std::sync::Arc;

/// Fixed directive configuring the model for gesture disambiguation.
const SYSTEM_INSTRUCTION: &str = "You are an LLM AI model, an Arabic language model designed to assist a sign language to speech translation system. \
You will be provided with a sequence of Arabic letters (which may contain errors or extra letters), and your task is to predict the most probable word or sentence the user intended. \
Your output should be a JSON object containing the keys 'most_likely_word', 'list_of_other_likely_words', and 'is_a_full_sentence'. \
Do not include any additional text or explanations. \
Inputs might be in Egyptian Arabic, so make sure you output Egyptian Arabic in that case, including the slangs that are used. \
If a word is in full you may try to guess the next word based on the context.";

/// Service performing gesture-to-word prediction against a text provider.
#[derive(Clone)]
pub struct PredictionService {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl PredictionService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        // Decoding configuration is static for the process lifetime.
        let params = GenerationParams {
            temperature: Some(0.0),
            top_p: Some(0.95),
            top_k: Some(40),
            max_tokens: Some(8192),
            output_schema: Some(prediction_output_schema()),
            system_instruction: Some(SYSTEM_INSTRUCTION.to_string()),
        };

        Self { provider, params }
    }

    /// Submit a gesture sequence as a single message and parse the reply.
    ///
    /// Parsing is two-stage: syntactically invalid JSON is a
    /// [`AppError::ModelResponseNotJson`]; valid JSON that does not match the
    /// prediction shape is a [`AppError::SchemaMismatch`].
    pub async fn predict(&self, gestures: &str) -> Result<Prediction, AppError> {
        let response = self.provider.generate(gestures, &self.params).await?;

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Model call completed"
        );

        let text = response.text.ok_or(AppError::EmptyModelResponse)?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(AppError::ModelResponseNotJson)?;

        let prediction: Prediction =
            serde_json::from_value(value).map_err(AppError::SchemaMismatch)?;

        Ok(prediction)
    }

    /// Provider health, used by the readiness probe.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.provider.health_check().await.map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::{MockBehavior, MockTextProvider};

    fn service_with(provider: MockTextProvider) -> PredictionService {
        PredictionService::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn parses_schema_conforming_response() {
        let service = service_with(MockTextProvider::with_response(
            r#"{"most_likely_word":"شكرا","list_of_other_likely_words":["شكرا لك"],"is_a_full_sentence":false}"#,
        ));

        let prediction = service.predict("شكر").await.unwrap();
        assert_eq!(prediction.most_likely_word, "شكرا");
        assert_eq!(prediction.list_of_other_likely_words, vec!["شكرا لك"]);
        assert!(!prediction.is_a_full_sentence);
    }

    #[tokio::test]
    async fn non_json_response_is_a_parse_error() {
        let service = service_with(MockTextProvider::with_response("not json"));

        let err = service.predict("ش").await.unwrap_err();
        assert!(matches!(err, AppError::ModelResponseNotJson(_)));
    }

    #[tokio::test]
    async fn valid_json_with_missing_field_is_a_schema_mismatch() {
        let service = service_with(MockTextProvider::with_response(
            r#"{"list_of_other_likely_words":[]}"#,
        ));

        let err = service.predict("ش").await.unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn network_failure_surfaces_as_provider_error() {
        let service = service_with(MockTextProvider::with_behavior(MockBehavior::NetworkDown));

        let err = service.predict("ش").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
    }
}
