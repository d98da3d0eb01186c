//! Integration tests for the prediction endpoint.
//!
//! The remote model is replaced with mock providers; the app runs on a
//! random port and is driven over HTTP.

use prediction_gateway::config::GatewayConfig;
use prediction_gateway::services::providers::mock::{MockBehavior, MockTextProvider};
use prediction_gateway::services::providers::TextProvider;
use prediction_gateway::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application with the given provider and return its port.
async fn spawn_app(provider: impl TextProvider + 'static) -> u16 {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP_PORT", "0"); // Random port
    std::env::set_var("GOOGLE_API_KEY", "test-api-key");

    let config = GatewayConfig::load().expect("Failed to load config");
    let app = Application::build_with_provider(config, Arc::new(provider))
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}

async fn post_predict(port: u16, body: serde_json::Value) -> reqwest::Response {
    Client::new()
        .post(format!("http://localhost:{}/predict", port))
        .json(&body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn well_formed_model_output_yields_prediction_envelope() {
    let port = spawn_app(MockTextProvider::with_response(
        r#"{"most_likely_word":"مرحبا","list_of_other_likely_words":["مرحبا بك"],"is_a_full_sentence":false}"#,
    ))
    .await;

    let response = post_predict(port, serde_json::json!({"gestures": "مرحبا"})).await;

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        serde_json::json!({
            "prediction": {
                "most_likely_word": "مرحبا",
                "list_of_other_likely_words": ["مرحبا بك"],
                "is_a_full_sentence": false
            }
        })
    );
}

#[tokio::test]
async fn prediction_object_has_exactly_three_keys() {
    let port = spawn_app(MockTextProvider::new()).await;

    let response = post_predict(port, serde_json::json!({"gestures": "شكر"})).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let prediction = body["prediction"].as_object().expect("prediction object");
    assert_eq!(prediction.len(), 3);
    assert!(prediction["most_likely_word"].is_string());
    assert!(prediction["list_of_other_likely_words"].is_array());
    assert!(prediction["is_a_full_sentence"].is_boolean());
}

#[tokio::test]
async fn non_json_model_output_yields_500_with_fixed_body() {
    let port = spawn_app(MockTextProvider::with_response("not json")).await;

    let response = post_predict(port, serde_json::json!({"gestures": "مرحبا"})).await;

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        serde_json::json!({"error": "Failed to parse model response as JSON."})
    );
}

#[tokio::test]
async fn missing_gestures_field_defaults_to_empty_string() {
    let port = spawn_app(MockTextProvider::new()).await;

    let response = post_predict(port, serde_json::json!({})).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn schema_mismatched_model_output_yields_502() {
    // Valid JSON, but most_likely_word is missing.
    let port = spawn_app(MockTextProvider::with_response(
        r#"{"list_of_other_likely_words":[],"is_a_full_sentence":false}"#,
    ))
    .await;

    let response = post_predict(port, serde_json::json!({"gestures": "مرحبا"})).await;

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn transport_failure_yields_502() {
    let port = spawn_app(MockTextProvider::with_behavior(MockBehavior::NetworkDown)).await;

    let response = post_predict(port, serde_json::json!({"gestures": "مرحبا"})).await;

    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Failed to reach the model API.");
}

#[tokio::test]
async fn rate_limited_upstream_yields_429() {
    let port = spawn_app(MockTextProvider::with_behavior(MockBehavior::RateLimited)).await;

    let response = post_predict(port, serde_json::json!({"gestures": "مرحبا"})).await;

    assert_eq!(response.status().as_u16(), 429);
}
