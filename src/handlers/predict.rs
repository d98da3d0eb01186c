use crate::error::AppError;
use crate::models::{PredictRequest, PredictResponse};
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `POST /predict` — forward a gesture sequence to the model and relay the
/// structured prediction.
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    tracing::info!(gestures_len = body.gestures.len(), "Prediction requested");

    let prediction = state.prediction.predict(&body.gestures).await?;

    Ok(Json(PredictResponse { prediction }))
}
