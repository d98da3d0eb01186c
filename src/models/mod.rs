//! Request and response types for the prediction API.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Body of `POST /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Sequence of recognized Arabic letters; may be noisy. An absent field
    /// is treated as the empty string rather than rejected.
    #[serde(default)]
    pub gestures: String,
}

/// Structured prediction returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub most_likely_word: String,
    /// Alternative candidates, most likely first. Tolerated when the model
    /// omits the field entirely.
    #[serde(default)]
    pub list_of_other_likely_words: Vec<String>,
    pub is_a_full_sentence: bool,
}

/// Success envelope for `POST /predict`.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
}

/// JSON schema handed to the model to constrain its output to the
/// [`Prediction`] shape. Uses the Gemini schema dialect (upper-case type
/// names).
pub fn prediction_output_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "required": [
            "most_likely_word",
            "list_of_other_likely_words",
            "is_a_full_sentence"
        ],
        "properties": {
            "most_likely_word": { "type": "STRING" },
            "list_of_other_likely_words": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "is_a_full_sentence": { "type": "BOOLEAN" }
        }
    })
}
