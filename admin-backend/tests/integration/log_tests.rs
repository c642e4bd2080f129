// tests/integration/log_tests.rs

use admin_backend::api::handlers::log_handler::log_router;
use admin_backend::api::AppState;
use admin_backend::config::AppConfig;
use admin_backend::error::{AppError, AppResult};
use admin_backend::middleware::operation_log::record_operation;
use axum::{
    body::{self, Body},
    http::{header, Request, StatusCode},
    middleware,
    routing::post,
    Router,
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

use crate::common::app_helper::{read_json, request, request_as, setup_app, setup_app_with_config};
use crate::common::db::TestDatabase;
use crate::common::test_data::{create_dept, dept_payload};

/// 操作ログは別タスクで保存されるため、件数が揃うまで待つ
async fn wait_for_logs(app: &Router, uri: &str, expected: u64) -> Value {
    for _ in 0..50 {
        let res = app.clone().oneshot(request("GET", uri, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        if body["data"]["pagination"]["total_count"].as_u64() == Some(expected) {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("operation logs did not reach {} entries", expected);
}

#[tokio::test]
async fn test_write_requests_are_recorded() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request_as(
            "POST",
            "/system/dept",
            Some(dept_payload("Sales", 0, 1)),
            Some(42),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = wait_for_logs(&app, "/monitor/log", 1).await;
    let log = &body["data"]["items"][0];
    assert_eq!(log["description"], "Create department");
    assert_eq!(log["request_method"], "POST");
    assert_eq!(log["request_url"], "/system/dept");
    assert_eq!(log["status_code"], 201);
    assert_eq!(log["log_level"], "INFO");
    assert_eq!(log["create_user"], 42);
    assert_eq!(log["request_ip"], "203.0.113.10");
    assert_eq!(log["browser"], "Firefox 128.0");
    // 一覧にはボディを含めない
    assert!(log.get("request_body").is_none());

    let log_id = log["log_id"].as_i64().unwrap();
    let res = app
        .clone()
        .oneshot(request("GET", &format!("/monitor/log/{}", log_id), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let detail = read_json(res).await;
    assert!(detail["data"]["request_body"]
        .as_str()
        .unwrap()
        .contains("\"dept_name\":\"Sales\""));
    assert!(detail["data"]["response_body"]
        .as_str()
        .unwrap()
        .contains("\"success\":true"));
    assert!(detail["data"]["exception"].is_null());
}

#[tokio::test]
async fn test_read_requests_are_not_recorded() {
    let (app, _db) = setup_app().await;

    create_dept(&app, "Sales", 0, 1).await;
    for _ in 0..3 {
        app.clone()
            .oneshot(request("GET", "/system/dept", None))
            .await
            .unwrap();
    }

    let body = wait_for_logs(&app, "/monitor/log", 1).await;
    assert_eq!(body["data"]["items"][0]["request_method"], "POST");
}

#[tokio::test]
async fn test_failed_requests_are_recorded_as_info() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request("DELETE", "/system/dept/12345", None))
        .await
        .unwrap();
    // 存在しないIDの削除は成功扱い
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept/9999", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/system/dept",
            Some(dept_payload("Orphan", 9999, 1)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = wait_for_logs(&app, "/monitor/log?sort_by=status_code&sort_order=desc", 2).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["status_code"], 404);
    assert_eq!(items[0]["log_level"], "INFO");
    assert_eq!(items[1]["description"], "Delete department");
}

#[tokio::test]
async fn test_log_pagination_and_filters() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    create_dept(&app, "Sales", root, 1).await;
    let res = app
        .clone()
        .oneshot(request_as(
            "PUT",
            &format!("/system/dept/{}", root),
            Some(dept_payload("Headquarters", 0, 1)),
            Some(5),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = wait_for_logs(&app, "/monitor/log?page=1&per_page=2", 3).await;
    let pagination = &body["data"]["pagination"];
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(pagination["total_pages"], 2);
    assert_eq!(pagination["has_next"], true);

    let res = app
        .clone()
        .oneshot(request("GET", "/monitor/log?request_method=put", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["data"]["pagination"]["total_count"], 1);
    assert_eq!(body["data"]["items"][0]["description"], "Update department");

    let res = app
        .clone()
        .oneshot(request("GET", "/monitor/log?create_user=5", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["data"]["pagination"]["total_count"], 1);

    let res = app
        .clone()
        .oneshot(request("GET", "/monitor/log?log_level=ERROR", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["data"]["pagination"]["total_count"], 0);
}

#[tokio::test]
async fn test_get_unknown_log_returns_not_found() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request("GET", "/monitor/log/424242", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

async fn failing_handler() -> AppResult<()> {
    Err(AppError::InternalServerError(
        "storage node sys-db-3 unreachable".to_string(),
    ))
}

#[tokio::test]
async fn test_server_errors_are_recorded_with_exception() {
    crate::common::init_test_env();
    let db = TestDatabase::new().await;
    let state = AppState::new(db.connection.clone(), AppConfig::for_testing());

    let app = Router::new()
        .route("/system/failing", post(failing_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            record_operation,
        ))
        .merge(log_router(state));

    let res = app
        .clone()
        .oneshot(request_as("POST", "/system/failing", Some(serde_json::json!({})), Some(9)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&bytes);
    // 内部エラーの詳細はレスポンスに含めない
    assert!(!text.contains("sys-db-3"));

    let body = wait_for_logs(&app, "/monitor/log?log_level=ERROR", 1).await;
    let log = &body["data"]["items"][0];
    assert_eq!(log["log_level"], "ERROR");
    assert_eq!(log["status_code"], 500);
    assert_eq!(log["create_user"], 9);

    let log_id = log["log_id"].as_i64().unwrap();
    let res = app
        .clone()
        .oneshot(request("GET", &format!("/monitor/log/{}", log_id), None))
        .await
        .unwrap();
    let detail = read_json(res).await;
    let exception = detail["data"]["exception"].as_str().unwrap();
    assert!(exception.contains("storage node sys-db-3 unreachable"));
    assert!(!detail["data"]["response_body"]
        .as_str()
        .unwrap()
        .contains("sys-db-3"));
}

fn oversized_request(body: String, declare_length: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/system/dept")
        .header(header::CONTENT_TYPE, "application/json");
    if declare_length {
        builder = builder.header(header::CONTENT_LENGTH, body.len());
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn test_oversized_bodies_are_rejected_and_recorded() {
    let mut config = AppConfig::for_testing();
    config.request_body_limit_bytes = 1024;
    let (app, _db) = setup_app_with_config(config).await;

    let payload = serde_json::json!({
        "dept_name": "Sales",
        "description": "x".repeat(8 * 1024),
    })
    .to_string();

    // Content-Length なし（ストリーム）と宣言ありの両方
    for declare_length in [false, true] {
        let res = app
            .clone()
            .oneshot(oversized_request(payload.clone(), declare_length))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = read_json(res).await;
        assert_eq!(body["error_type"], "payload_too_large");
    }

    let body = wait_for_logs(&app, "/monitor/log", 2).await;
    for log in body["data"]["items"].as_array().unwrap() {
        assert_eq!(log["status_code"], 413);
        assert_eq!(log["log_level"], "INFO");
    }

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
