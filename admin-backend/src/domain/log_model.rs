use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sys_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub log_id: i64,
    pub log_level: String,
    pub description: Option<String>,
    pub request_url: String,
    pub request_method: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub request_header: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub request_body: Option<String>,
    pub status_code: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_header: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_body: Option<String>,
    /// リクエスト処理時間（ミリ秒）
    pub elapsed_time: i64,
    pub request_ip: Option<String>,
    pub location: Option<String>,
    pub browser: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub exception: Option<String>,
    pub create_user: Option<i64>,
    pub create_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }

    /// レスポンスステータスからログレベルを決定
    pub fn from_status(status: u16) -> Self {
        if status >= 500 {
            LogLevel::Error
        } else {
            LogLevel::Info
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LogLevel {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl Model {
    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from(self.log_level.clone())
    }
}
