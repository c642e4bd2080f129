// tests/common/test_data.rs

use admin_backend::domain::user_model;
use admin_backend::repository::user_repository::UserRepository;
use axum::{http::StatusCode, Router};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::app_helper::{read_json, request_as};

pub fn dept_payload(name: &str, parent_id: i64, dept_sort: i32) -> Value {
    json!({
        "dept_name": name,
        "parent_id": parent_id,
        "description": format!("{} description", name),
        "dept_sort": dept_sort,
    })
}

/// API経由で部門を作成し、IDを返す
pub async fn create_dept(app: &Router, name: &str, parent_id: i64, dept_sort: i32) -> i64 {
    let res = app
        .clone()
        .oneshot(request_as(
            "POST",
            "/system/dept",
            Some(dept_payload(name, parent_id, dept_sort)),
            Some(1),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    read_json(res).await["data"]["id"].as_i64().unwrap()
}

/// 部門に所属するユーザーを直接登録
pub async fn create_user_in_dept(db: &DatabaseConnection, username: &str, dept_id: i64) {
    UserRepository::create(
        db,
        user_model::ActiveModel {
            username: Set(username.to_string()),
            nickname: Set(Some(username.to_uppercase())),
            dept_id: Set(Some(dept_id)),
            status: Set(1),
            create_time: Set(Utc::now()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}
