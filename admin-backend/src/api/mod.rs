// src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::operation_log::record_operation;
use crate::service::{
    dept_service::DeptService, log_service::LogService, option_service::OptionService,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod dto;
pub mod handlers;

use handlers::{
    dept_handler::dept_router, log_handler::log_router, option_handler::option_router,
    system_handler::system_router,
};

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub dept_service: Arc<DeptService>,
    pub option_service: Arc<OptionService>,
    pub log_service: Arc<LogService>,
    pub db_pool: DbPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db_pool: DbPool, config: AppConfig) -> Self {
        Self {
            dept_service: Arc::new(DeptService::new(db_pool.clone())),
            option_service: Arc::new(OptionService::new(db_pool.clone())),
            log_service: Arc::new(LogService::new(db_pool.clone())),
            db_pool,
            config: Arc::new(config),
        }
    }
}

/// 全ルーターを結合し、共通ミドルウェアを適用
pub fn app_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.request_body_limit_bytes;
    let timeout = Duration::from_secs(app_state.config.request_timeout_secs);

    // 変更系の操作ログは /system 配下のみ。
    // ボディ上限は操作ログの内側に置き、413 も記録されるようにする
    let system_routes = Router::new()
        .merge(dept_router(app_state.clone()))
        .merge(option_router(app_state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            record_operation,
        ));

    let monitor_routes = Router::new()
        .merge(log_router(app_state.clone()))
        .merge(system_router(app_state.clone()))
        .layer(RequestBodyLimitLayer::new(body_limit));

    Router::new()
        .merge(system_routes)
        .merge(monitor_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&app_state.config))
}

/// CORS 設定（解析できないオリジンは無視する）
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(crate::extractors::OPERATOR_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}
