// src/api/handlers/log_handler.rs
use crate::api::dto::log_dto::{LogDetailDto, LogDto, LogQuery};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::IdPath;
use crate::types::{ApiResponse, PaginatedResponse};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

pub async fn list_logs_handler(
    State(app_state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> AppResult<impl IntoResponse> {
    let logs = app_state.log_service.page(&query).await?;
    Ok(ApiResponse::<PaginatedResponse<LogDto>>::success(logs))
}

pub async fn get_log_handler(
    State(app_state): State<AppState>,
    IdPath(log_id): IdPath,
) -> AppResult<impl IntoResponse> {
    let log = app_state.log_service.get(log_id).await?;
    Ok(ApiResponse::<LogDetailDto>::success(log))
}

pub fn log_router(app_state: AppState) -> Router {
    Router::new()
        .route("/monitor/log", get(list_logs_handler))
        .route("/monitor/log/{id}", get(get_log_handler))
        .with_state(app_state)
}
