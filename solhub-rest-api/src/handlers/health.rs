//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{context::AppContext, models::HealthResponse};

/// Health check covering the database connection
pub async fn health_check(State(ctx): State<AppContext>) -> impl IntoResponse {
    match ctx.repositories.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::degraded(e)),
        ),
    }
}
