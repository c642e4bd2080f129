use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// 単一IDのパスパラメータ
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Missing path parameter 'id': {}", e)))?;

        parse_id(&raw)
            .map(IdPath)
            .map_err(|message| AppError::ValidationErrors(vec![format!("id: {}", message)]))
    }
}

/// カンマ区切りのIDリスト（例: `/system/dept/1,2,3`）
#[derive(Debug, Clone)]
pub struct IdsPath(pub Vec<i64>);

impl<S> FromRequestParts<S> for IdsPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Missing path parameter 'ids': {}", e)))?;

        parse_ids(&raw).map(IdsPath)
    }
}

fn parse_id(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("invalid id '{}'", raw)),
    }
}

/// 重複を除き、出現順を保ったままIDリストを解析
pub fn parse_ids(raw: &str) -> Result<Vec<i64>, AppError> {
    let mut ids = Vec::new();
    let mut errors = Vec::new();

    for segment in raw.split(',').filter(|s| !s.trim().is_empty()) {
        match parse_id(segment) {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(message) => errors.push(format!("ids: {}", message)),
        }
    }

    if !errors.is_empty() {
        return Err(AppError::ValidationErrors(errors));
    }
    if ids.is_empty() {
        return Err(AppError::ValidationErrors(vec![
            "ids: must not be empty".to_string()
        ]));
    }

    Ok(ids)
}
