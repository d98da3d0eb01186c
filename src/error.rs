use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The model returned text that is not syntactically valid JSON.
    #[error("Model response is not valid JSON: {0}")]
    ModelResponseNotJson(serde_json::Error),

    /// The model returned valid JSON that does not match the prediction shape.
    #[error("Model response does not match the prediction schema: {0}")]
    SchemaMismatch(serde_json::Error),

    /// The model returned a response with no text content.
    #[error("Model response contained no text")]
    EmptyModelResponse,

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let (status, error_message, details) = match self {
            // Contract with existing clients: parse failures are a 500 with
            // this exact body; the parse error itself is only logged.
            AppError::ModelResponseNotJson(err) => {
                tracing::error!("Error parsing model response as JSON: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse model response as JSON.".to_string(),
                    None,
                )
            }
            AppError::SchemaMismatch(err) => (
                StatusCode::BAD_GATEWAY,
                "Model response did not match the prediction schema.".to_string(),
                Some(err.to_string()),
            ),
            AppError::EmptyModelResponse => (
                StatusCode::BAD_GATEWAY,
                "Model returned an empty response.".to_string(),
                None,
            ),
            AppError::Provider(err) => match err {
                ProviderError::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Upstream model is rate limiting requests.".to_string(),
                    None,
                ),
                ProviderError::NotConfigured(msg) => {
                    (StatusCode::SERVICE_UNAVAILABLE, msg, None)
                }
                ProviderError::ContentFiltered => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Model refused the input.".to_string(),
                    None,
                ),
                ProviderError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
                ProviderError::ApiError(msg) | ProviderError::NetworkError(msg) => {
                    tracing::error!("Upstream model call failed: {}", msg);
                    (
                        StatusCode::BAD_GATEWAY,
                        "Failed to reach the model API.".to_string(),
                        None,
                    )
                }
            },
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(err.to_string()),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}
