// src/api/dto/log_dto.rs
use crate::domain::log_model::{self, LogLevel};
use crate::types::query::deserialize_option_i64_from_string;
use crate::types::{PaginationQuery, SortQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQuery {
    /// 説明の部分一致
    pub description: Option<String>,
    pub log_level: Option<LogLevel>,
    pub request_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_i64_from_string")]
    pub create_user: Option<i64>,
    /// 作成日時の開始（以降）
    pub created_after: Option<DateTime<Utc>>,
    /// 作成日時の終了（以前）
    pub created_before: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    pub sort: SortQuery,
}

impl LogQuery {
    /// 許可されたソートフィールド
    pub fn allowed_sort_fields() -> &'static [&'static str] {
        &["create_time", "elapsed_time", "status_code"]
    }
}

/// 一覧用（ヘッダー・ボディを含まない）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogDto {
    pub log_id: i64,
    pub log_level: LogLevel,
    pub description: Option<String>,
    pub request_method: String,
    pub request_url: String,
    pub status_code: i32,
    pub elapsed_time: i64,
    pub request_ip: Option<String>,
    pub location: Option<String>,
    pub browser: Option<String>,
    pub create_user: Option<i64>,
    pub create_time: DateTime<Utc>,
}

impl From<log_model::Model> for LogDto {
    fn from(model: log_model::Model) -> Self {
        Self {
            log_level: model.get_log_level(),
            log_id: model.log_id,
            description: model.description,
            request_method: model.request_method,
            request_url: model.request_url,
            status_code: model.status_code,
            elapsed_time: model.elapsed_time,
            request_ip: model.request_ip,
            location: model.location,
            browser: model.browser,
            create_user: model.create_user,
            create_time: model.create_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogDetailDto {
    #[serde(flatten)]
    pub summary: LogDto,
    pub request_header: Option<String>,
    pub request_body: Option<String>,
    pub response_header: Option<String>,
    pub response_body: Option<String>,
    pub exception: Option<String>,
}

impl From<log_model::Model> for LogDetailDto {
    fn from(model: log_model::Model) -> Self {
        let request_header = model.request_header.clone();
        let request_body = model.request_body.clone();
        let response_header = model.response_header.clone();
        let response_body = model.response_body.clone();
        let exception = model.exception.clone();
        Self {
            summary: LogDto::from(model),
            request_header,
            request_body,
            response_header,
            response_body,
            exception,
        }
    }
}
