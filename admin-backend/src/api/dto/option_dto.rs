// src/api/dto/option_dto.rs
use crate::domain::option_model;
use crate::types::query::deserialize_comma_separated;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `?code=SITE_TITLE,SITE_LOGO`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionQuery {
    #[serde(default, deserialize_with = "deserialize_comma_separated")]
    pub code: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OptionValueDto {
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Code must be between 1 and 100 characters"))]
    pub code: String,

    #[validate(length(max = 65535, message = "Value is too long"))]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateOptionsDto {
    #[validate(
        length(min = 1, message = "At least one option is required"),
        nested
    )]
    pub options: Vec<OptionValueDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ResetOptionsDto {
    #[validate(length(min = 1, message = "At least one code is required"))]
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDto {
    pub id: i64,
    pub name: String,
    pub code: String,
    /// 未設定の場合はデフォルト値
    pub value: Option<String>,
    pub description: Option<String>,
}

impl From<option_model::Model> for OptionDto {
    fn from(model: option_model::Model) -> Self {
        let value = model.effective_value().map(str::to_string);
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            value,
            description: model.description,
        }
    }
}
