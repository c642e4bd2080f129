// src/api/handlers/system_handler.rs
use crate::api::AppState;
use crate::types::ApiResponse;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub database: bool,
}

/// データベースに到達できない場合は 503
pub async fn health_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let database = app_state.db_pool.ping().await.is_ok();
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        ApiResponse::success(HealthResponse {
            status: if database { "ok" } else { "degraded" }.to_string(),
            environment: app_state.config.environment.clone(),
            database,
        }),
    )
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_state)
}
