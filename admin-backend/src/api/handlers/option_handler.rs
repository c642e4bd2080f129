// src/api/handlers/option_handler.rs
use crate::api::dto::option_dto::{OptionDto, OptionQuery, ResetOptionsDto, UpdateOptionsDto};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::Operator;
use crate::types::ApiResponse;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use validator::Validate;

pub async fn list_options_handler(
    State(app_state): State<AppState>,
    Query(query): Query<OptionQuery>,
) -> AppResult<impl IntoResponse> {
    let options = app_state.option_service.list(&query).await?;
    Ok(ApiResponse::<Vec<OptionDto>>::success(options))
}

pub async fn update_options_handler(
    State(app_state): State<AppState>,
    Operator(operator): Operator,
    Json(payload): Json<UpdateOptionsDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    app_state
        .option_service
        .update(payload.options, operator)
        .await?;
    Ok(ApiResponse::success(()))
}

/// デフォルト値に戻す
pub async fn reset_options_handler(
    State(app_state): State<AppState>,
    Operator(operator): Operator,
    Json(payload): Json<ResetOptionsDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    app_state
        .option_service
        .reset_value(&payload.codes, operator)
        .await?;
    Ok(ApiResponse::success(()))
}

pub fn option_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/system/option",
            get(list_options_handler).put(update_options_handler),
        )
        .route("/system/option/value", patch(reset_options_handler))
        .with_state(app_state)
}
