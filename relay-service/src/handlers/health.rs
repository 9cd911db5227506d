use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Health check endpoint for liveness checks.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "relay-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: both providers have the settings they need.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mail_ready = state.config.mail.is_complete();
    let answers_ready = state.answer_provider.is_configured();

    let status = if mail_ready && answers_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "checks": {
                "mail": if mail_ready { "configured" } else { "missing_credentials" },
                "answers": if answers_ready { "configured" } else { "missing_api_key" },
            }
        })),
    )
}
