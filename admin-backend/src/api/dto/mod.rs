// src/api/dto/mod.rs
pub mod dept_dto;
pub mod log_dto;
pub mod option_dto;

use serde::{Deserialize, Serialize};

/// 新規作成時のレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIdDto {
    pub id: i64,
}
