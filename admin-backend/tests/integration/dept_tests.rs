// tests/integration/dept_tests.rs

use admin_backend::api::dto::dept_dto::{CreateDeptDto, DeptQuery};
use admin_backend::domain::dept_model;
use admin_backend::error::AppError;
use admin_backend::repository::dept_repository::DeptRepository;
use admin_backend::service::dept_service::DeptService;
use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{Set, SqlErr};
use serde_json::json;
use tower::ServiceExt;

use crate::common::app_helper::{read_json, request, request_as, setup_app};
use crate::common::test_data::{create_dept, create_user_in_dept, dept_payload};

#[tokio::test]
async fn test_create_and_list_nested_departments() {
    let (app, _db) = setup_app().await;

    let head_office = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", head_office, 2).await;
    let _east = create_dept(&app, "Sales East", sales, 1).await;
    let _dev = create_dept(&app, "Development", head_office, 1).await;

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;

    let roots = body["data"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["dept_name"], "Head Office");
    assert_eq!(roots[0]["status"], 1);

    // dept_sort の昇順
    let children = roots[0]["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["dept_name"], "Development");
    assert_eq!(children[1]["dept_name"], "Sales");
    assert_eq!(children[1]["children"][0]["dept_name"], "Sales East");
}

#[tokio::test]
async fn test_filtered_list_promotes_orphans_to_roots() {
    let (app, _db) = setup_app().await;

    let head_office = create_dept(&app, "Head Office", 0, 1).await;
    create_dept(&app, "Sales", head_office, 1).await;
    create_dept(&app, "Support", head_office, 2).await;

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept?dept_name=S", None))
        .await
        .unwrap();
    let body = read_json(res).await;

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["dept_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sales", "Support"]);
}

#[tokio::test]
async fn test_dept_tree_for_selector() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let second = create_dept(&app, "Second", root, 20).await;
    let first = create_dept(&app, "First", root, 10).await;

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept/tree", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;

    let tree = body["data"].as_array().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["key"], root);
    assert_eq!(tree[0]["title"], "Head Office");
    assert_eq!(tree[0]["children"][0]["key"], first);
    assert_eq!(tree[0]["children"][1]["key"], second);
    assert_eq!(tree[0]["children"][1]["weight"], 20);
}

#[tokio::test]
async fn test_get_dept_includes_parent_name() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", root, 1).await;

    let res = app
        .clone()
        .oneshot(request("GET", &format!("/system/dept/{}", sales), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["data"]["dept_name"], "Sales");
    assert_eq!(body["data"]["parent_name"], "Head Office");
    assert_eq!(body["data"]["create_user"], 1);

    let res = app
        .clone()
        .oneshot(request("GET", &format!("/system/dept/{}", root), None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert!(body["data"]["parent_name"].is_null());
}

#[tokio::test]
async fn test_get_unknown_dept_returns_not_found() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept/9999", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_duplicate_name_under_same_parent_conflicts() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", root, 1).await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/system/dept",
            Some(dept_payload("Sales", root, 5)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = read_json(res).await;
    assert!(body["message"].as_str().unwrap().contains("'Sales' already exists"));

    // 別の親の下なら同名でも登録できる
    create_dept(&app, "Sales", sales, 1).await;
}

#[tokio::test]
async fn test_create_with_unknown_parent_returns_not_found() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/system/dept",
            Some(dept_payload("Orphan", 4242, 1)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_dept() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let other_root = create_dept(&app, "Branch", 0, 2).await;
    let sales = create_dept(&app, "Sales", root, 1).await;

    let mut payload = dept_payload("Sales & Marketing", other_root, 3);
    payload["status"] = json!(2);

    let res = app
        .clone()
        .oneshot(request_as(
            "PUT",
            &format!("/system/dept/{}", sales),
            Some(payload),
            Some(7),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(request("GET", &format!("/system/dept/{}", sales), None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["data"]["dept_name"], "Sales & Marketing");
    assert_eq!(body["data"]["parent_id"], other_root);
    assert_eq!(body["data"]["parent_name"], "Branch");
    assert_eq!(body["data"]["status"], 2);
    assert_eq!(body["data"]["update_user"], 7);
    assert!(body["data"]["update_time"].is_string());
}

#[tokio::test]
async fn test_update_keeps_own_name_without_conflict() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;

    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/system/dept/{}", root),
            Some(dept_payload("Head Office", 0, 9)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_rejects_circular_parent() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", root, 1).await;
    let east = create_dept(&app, "Sales East", sales, 1).await;

    // 自分自身
    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/system/dept/{}", root),
            Some(dept_payload("Head Office", root, 1)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // 孫部門の下へ移動
    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/system/dept/{}", root),
            Some(dept_payload("Head Office", east, 1)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_dept_returns_not_found() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            "/system/dept/777",
            Some(dept_payload("Ghost", 0, 1)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_direct_children() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", root, 1).await;
    let branch = create_dept(&app, "Branch", 0, 2).await;

    let res = app
        .clone()
        .oneshot(request("DELETE", &format!("/system/dept/{}", root), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    for id in [root, sales] {
        let res = app
            .clone()
            .oneshot(request("GET", &format!("/system/dept/{}", id), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    let res = app
        .clone()
        .oneshot(request("GET", &format!("/system/dept/{}", branch), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_multiple_ids() {
    let (app, _db) = setup_app().await;

    let first = create_dept(&app, "First", 0, 1).await;
    let second = create_dept(&app, "Second", 0, 2).await;

    let res = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/system/dept/{},{}", first, second),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_with_assigned_users_conflicts() {
    let (app, db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", root, 1).await;
    create_user_in_dept(&db.connection, "alice", root).await;

    let res = app
        .clone()
        .oneshot(request("DELETE", &format!("/system/dept/{}", root), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // ロールバックされ、子部門も残っている
    let res = app
        .clone()
        .oneshot(request("GET", &format!("/system/dept/{}", sales), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_service_check_name_exists() {
    let (app, db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    create_dept(&app, "Sales", root, 1).await;

    let service = DeptService::new(db.connection.clone());
    assert!(service
        .check_name_exists(&db.connection, "Sales", root, None)
        .await
        .unwrap());
    assert!(!service
        .check_name_exists(&db.connection, "Sales", 0, None)
        .await
        .unwrap());
    assert!(!service
        .check_name_exists(&db.connection, "Head Office", 0, Some(root))
        .await
        .unwrap());

    let list = service.list(&DeptQuery::default()).await.unwrap();
    assert_eq!(list.len(), 2);
}

fn create_dto(name: &str, parent_id: i64) -> CreateDeptDto {
    CreateDeptDto {
        dept_name: name.to_string(),
        parent_id,
        description: None,
        dept_sort: 1,
    }
}

#[tokio::test]
async fn test_concurrent_adds_with_same_name_create_one_dept() {
    let (_app, db) = setup_app().await;
    let service = DeptService::new(db.connection.clone());

    let (first, second) = tokio::join!(
        service.add(create_dto("Sales", 0), Some(1)),
        service.add(create_dto("Sales", 0), Some(2)),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::Conflict(message)) if message.contains("'Sales' already exists"))));

    let list = service.list(&DeptQuery::default()).await.unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_schema_rejects_duplicate_name_under_same_parent() {
    let (_app, db) = setup_app().await;

    let dept = |name: &str| dept_model::ActiveModel {
        dept_name: Set(name.to_string()),
        parent_id: Set(0),
        dept_sort: Set(1),
        status: Set(1),
        create_time: Set(Utc::now()),
        ..Default::default()
    };

    DeptRepository::create(&db.connection, dept("Sales"))
        .await
        .unwrap();
    let err = DeptRepository::create(&db.connection, dept("Sales"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_name_filter_treats_wildcards_literally() {
    let (app, _db) = setup_app().await;

    create_dept(&app, "50% Off Team", 0, 1).await;
    create_dept(&app, "500 Club", 0, 2).await;
    create_dept(&app, "Ops_East", 0, 3).await;
    create_dept(&app, "OpsWest", 0, 4).await;

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept?dept_name=50%25", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["dept_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["50% Off Team"]);

    let res = app
        .clone()
        .oneshot(request("GET", "/system/dept?dept_name=Ops_", None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["dept_name"], "Ops_East");
}

#[tokio::test]
async fn test_update_without_parent_keeps_department_in_place() {
    let (app, _db) = setup_app().await;

    let root = create_dept(&app, "Head Office", 0, 1).await;
    let sales = create_dept(&app, "Sales", root, 1).await;

    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/system/dept/{}", sales),
            Some(json!({ "dept_name": "Sales", "dept_sort": 5 })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = app
        .clone()
        .oneshot(request("GET", &format!("/system/dept/{}", sales), None))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["data"]["parent_id"], root);
}
