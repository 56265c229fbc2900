//! Router for the health API

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{SecondsFormat, Utc};

use super::public::HealthResponse;
use crate::api::SharedState;
use crate::session::OllamaStatus;

/// Check the model server is reachable right now
async fn health(State(state): State<SharedState>) -> (StatusCode, Json<HealthResponse>) {
    let provider = Arc::clone(&state.read().expect("Unable to read shared state").provider);
    let result = provider.list_models().await;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut shared = state.write().expect("Unable to write shared state");
    let current_model = shared.session.current_model.clone();

    match result {
        Ok(models) => {
            shared.session.ollama_status = OllamaStatus::Connected;
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                    ollama: "connected".to_string(),
                    models: Some(models.len()),
                    error: None,
                    current_model,
                    timestamp,
                }),
            )
        }
        Err(e) => {
            tracing::warn!("Health check failed: {:#}", e);
            shared.session.ollama_status = OllamaStatus::Disconnected;
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error".to_string(),
                    ollama: "disconnected".to_string(),
                    models: None,
                    error: Some(format!("{:#}", e)),
                    current_model,
                    timestamp,
                }),
            )
        }
    }
}

/// Create the health router
pub fn router() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}
