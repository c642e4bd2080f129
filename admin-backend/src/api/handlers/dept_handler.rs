// src/api/handlers/dept_handler.rs
use crate::api::dto::dept_dto::{
    CreateDeptDto, DeptDetailDto, DeptDto, DeptQuery, TreeNode, UpdateDeptDto,
};
use crate::api::dto::CreatedIdDto;
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::{IdPath, IdsPath, Operator};
use crate::types::ApiResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::info;
use validator::Validate;

/// 部門一覧（入れ子構造）
pub async fn list_depts_handler(
    State(app_state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> AppResult<impl IntoResponse> {
    let depts = app_state.dept_service.list_tree(&query).await?;
    Ok(ApiResponse::<Vec<DeptDto>>::success(depts))
}

/// 選択用の部門ツリー
pub async fn dept_tree_handler(
    State(app_state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> AppResult<impl IntoResponse> {
    let tree = app_state.dept_service.tree(&query).await?;
    Ok(ApiResponse::<Vec<TreeNode>>::success(tree))
}

pub async fn get_dept_handler(
    State(app_state): State<AppState>,
    IdPath(dept_id): IdPath,
) -> AppResult<impl IntoResponse> {
    let dept = app_state.dept_service.get(dept_id).await?;
    Ok(ApiResponse::<DeptDetailDto>::success(dept))
}

pub async fn create_dept_handler(
    State(app_state): State<AppState>,
    Operator(operator): Operator,
    Json(payload): Json<CreateDeptDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    info!(
        dept_name = %payload.dept_name,
        parent_id = %payload.parent_id,
        "Creating department"
    );

    let id = app_state.dept_service.add(payload, operator).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(CreatedIdDto { id })))
}

pub async fn update_dept_handler(
    State(app_state): State<AppState>,
    IdPath(dept_id): IdPath,
    Operator(operator): Operator,
    Json(payload): Json<UpdateDeptDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    app_state
        .dept_service
        .update(dept_id, payload, operator)
        .await?;
    Ok(ApiResponse::success(()))
}

/// `DELETE /system/dept/1,2,3`
pub async fn delete_depts_handler(
    State(app_state): State<AppState>,
    IdsPath(ids): IdsPath,
) -> AppResult<impl IntoResponse> {
    app_state.dept_service.delete(&ids).await?;
    Ok(ApiResponse::success(()))
}

pub fn dept_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/system/dept",
            get(list_depts_handler).post(create_dept_handler),
        )
        .route("/system/dept/tree", get(dept_tree_handler))
        // 削除ではカンマ区切りの複数IDを受け付ける
        .route(
            "/system/dept/{id}",
            get(get_dept_handler)
                .put(update_dept_handler)
                .delete(delete_depts_handler),
        )
        .with_state(app_state)
}
