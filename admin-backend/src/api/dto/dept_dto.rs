// src/api/dto/dept_dto.rs
use crate::domain::dept_model;
use crate::domain::status::DisEnableStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEPT_NAME_MAX_LENGTH: u64 = 30;
pub const DESCRIPTION_MAX_LENGTH: u64 = 200;
pub const DEFAULT_DEPT_SORT: i32 = 999;

fn default_dept_sort() -> i32 {
    DEFAULT_DEPT_SORT
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Department name must not be blank".into());
        return Err(error);
    }
    Ok(())
}

// --- Request DTOs ---

/// 部門一覧の検索条件
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeptQuery {
    /// 部門名の部分一致
    pub dept_name: Option<String>,
    pub status: Option<DisEnableStatus>,
}

/// 部門の作成リクエスト
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateDeptDto {
    #[validate(
        length(
            min = 1,
            max = DEPT_NAME_MAX_LENGTH,
            message = "Department name must be between 1 and 30 characters"
        ),
        custom(function = validate_not_blank)
    )]
    pub dept_name: String,

    /// 省略時は最上位部門（0）
    #[serde(default)]
    #[validate(range(min = 0, message = "Parent id must not be negative"))]
    pub parent_id: i64,

    #[validate(length(
        max = DESCRIPTION_MAX_LENGTH,
        message = "Description must not exceed 200 characters"
    ))]
    pub description: Option<String>,

    #[serde(default = "default_dept_sort")]
    #[validate(range(min = 1, max = 9999, message = "Sort must be between 1 and 9999"))]
    pub dept_sort: i32,
}

/// 部門の更新リクエスト（親部門の暗黙的な変更を避けるため parent_id は必須）
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateDeptDto {
    #[validate(
        length(
            min = 1,
            max = DEPT_NAME_MAX_LENGTH,
            message = "Department name must be between 1 and 30 characters"
        ),
        custom(function = validate_not_blank)
    )]
    pub dept_name: String,

    #[validate(range(min = 0, message = "Parent id must not be negative"))]
    pub parent_id: i64,

    #[validate(length(
        max = DESCRIPTION_MAX_LENGTH,
        message = "Description must not exceed 200 characters"
    ))]
    pub description: Option<String>,

    #[serde(default = "default_dept_sort")]
    #[validate(range(min = 1, max = 9999, message = "Sort must be between 1 and 9999"))]
    pub dept_sort: i32,

    /// 省略時は現在のステータスを維持
    pub status: Option<DisEnableStatus>,
}

// --- Response DTOs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptDto {
    pub dept_id: i64,
    pub dept_name: String,
    pub parent_id: i64,
    pub description: Option<String>,
    pub dept_sort: i32,
    pub status: DisEnableStatus,
    pub create_user: Option<i64>,
    pub create_time: DateTime<Utc>,
    pub update_user: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeptDto>,
}

impl From<dept_model::Model> for DeptDto {
    fn from(model: dept_model::Model) -> Self {
        let status = model.get_status();
        Self {
            dept_id: model.dept_id,
            dept_name: model.dept_name,
            parent_id: model.parent_id,
            description: model.description,
            dept_sort: model.dept_sort,
            status,
            create_user: model.create_user,
            create_time: model.create_time,
            update_user: model.update_user,
            update_time: model.update_time,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeptDetailDto {
    #[serde(flatten)]
    pub dept: DeptDto,
    /// 上位部門名（最上位または上位部門が存在しない場合は None）
    pub parent_name: Option<String>,
}

/// 選択用の部門ツリー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: i64,
    pub title: String,
    pub parent_id: i64,
    pub weight: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}
