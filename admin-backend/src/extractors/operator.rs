use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// 操作者IDを受け取るヘッダー（認証は上流のゲートウェイで実施される前提）
pub const OPERATOR_HEADER: &str = "x-user-id";

pub fn operator_id_from_headers(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(OPERATOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

/// 現在の操作者（不明な場合は None）
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator(pub Option<i64>);

impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Operator(operator_id_from_headers(&parts.headers)))
    }
}
