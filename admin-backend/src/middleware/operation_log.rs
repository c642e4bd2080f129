// src/middleware/operation_log.rs
use crate::api::AppState;
use crate::domain::log_model::{self, LogLevel};
use crate::error::{AppError, ErrorDetail};
use crate::extractors::operator_id_from_headers;
use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::State,
    http::{header, HeaderMap, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use sea_orm::Set;
use std::collections::BTreeMap;
use std::time::Instant;

/// 変更系リクエストを sys_log に記録するミドルウェア
///
/// リクエストボディは `request_body_limit_bytes` までしか読み込まず、超過時は 413 を返して記録する。
pub async fn record_operation(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let settings = &app_state.config.operation_log;
    if !settings.enabled || !is_recorded_method(request.method()) {
        return next.run(request).await;
    }
    let max_body_bytes = settings.max_body_bytes;
    let body_limit = app_state.config.request_body_limit_bytes;

    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_url = request
        .uri()
        .path_and_query()
        .map_or_else(|| path.clone(), |pq| pq.as_str().to_string());
    let request_header = headers_to_json(request.headers());
    let request_ip = client_ip(request.headers());
    let browser = request
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .and_then(parse_browser);
    let create_user = operator_id_from_headers(request.headers());

    // 上限付きで読み出してから組み立て直す
    let (parts, body) = request.into_parts();
    let declared_too_large = content_length(&parts.headers).is_some_and(|len| len > body_limit);
    let request_bytes = if declared_too_large {
        None
    } else {
        to_bytes(body, body_limit).await.ok()
    };

    let (response, request_body) = match request_bytes {
        Some(bytes) => {
            let request_body = body_to_string(&bytes, max_body_bytes);
            let response = next
                .run(Request::from_parts(parts, Body::from(bytes)))
                .await;
            (response, request_body)
        }
        None => {
            let response = AppError::PayloadTooLarge(format!(
                "Request body exceeds {} bytes",
                body_limit
            ))
            .into_response();
            (response, None)
        }
    };
    let elapsed_time = i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX);

    let status = response.status();
    let response_header = headers_to_json(response.headers());
    let exception = response
        .extensions()
        .get::<ErrorDetail>()
        .map(|detail| detail.0.clone());

    let (response, response_body) = capture_response_body(response, max_body_bytes).await;

    let log_level = LogLevel::from_status(status.as_u16());
    let entry = log_model::ActiveModel {
        log_level: Set(log_level.as_str().to_string()),
        description: Set(Some(describe_operation(&method, &path))),
        request_url: Set(request_url),
        request_method: Set(method.to_string()),
        request_header: Set(Some(request_header)),
        request_body: Set(request_body),
        status_code: Set(i32::from(status.as_u16())),
        response_header: Set(Some(response_header)),
        response_body: Set(response_body),
        elapsed_time: Set(elapsed_time),
        request_ip: Set(request_ip),
        location: Set(None),
        browser: Set(browser),
        exception: Set(exception.filter(|_| log_level == LogLevel::Error)),
        create_user: Set(create_user),
        create_time: Set(Utc::now()),
        ..Default::default()
    };

    // 非同期で保存（失敗してもレスポンスには影響しない）
    let log_service = app_state.log_service.clone();
    tokio::spawn(async move {
        if let Err(e) = log_service.record(entry).await {
            tracing::error!("Failed to record operation log: {:?}", e);
        } else {
            tracing::debug!("Operation log recorded for {} {}", method, path);
        }
    });

    response
}

/// サイズが分かっていて上限以内のレスポンスだけボディを保存する（それ以外はそのまま返す）
async fn capture_response_body(response: Response, max_bytes: usize) -> (Response, Option<String>) {
    let bounded = response
        .body()
        .size_hint()
        .upper()
        .and_then(|upper| usize::try_from(upper).ok())
        .is_some_and(|upper| upper <= max_bytes);
    if !bounded {
        return (response, None);
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, max_bytes).await {
        Ok(bytes) => {
            let captured = body_to_string(&bytes, max_bytes);
            (Response::from_parts(parts, Body::from(bytes)), captured)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer response body");
            let response = AppError::InternalServerError(format!(
                "Failed to read response body: {}",
                e
            ))
            .into_response();
            (response, None)
        }
    }
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

fn is_recorded_method(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// ヘッダーを JSON 文字列化（ASCII でない値は除外）
fn headers_to_json(headers: &HeaderMap) -> String {
    let map: BTreeMap<&str, &str> = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .collect();
    serde_json::to_string(&map).unwrap_or_default()
}

/// 空のボディは None、上限を超える部分は切り捨てる
fn body_to_string(bytes: &Bytes, max_bytes: usize) -> Option<String> {
    if bytes.is_empty() || max_bytes == 0 {
        return None;
    }
    let end = bytes.len().min(max_bytes);
    Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

/// x-forwarded-for の先頭、なければ x-real-ip
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
        })
        .map(str::to_string)
}

/// User-Agent からブラウザ名とバージョンを推定
fn parse_browser(user_agent: &str) -> Option<String> {
    // 判定順が重要（Edge/Opera の UA は Chrome を含み、Chrome の UA は Safari を含む）
    const BROWSERS: [(&str, &str); 6] = [
        ("Edg/", "Edge"),
        ("OPR/", "Opera"),
        ("Firefox/", "Firefox"),
        ("Chrome/", "Chrome"),
        ("Version/", "Safari"),
        ("curl/", "curl"),
    ];

    BROWSERS.iter().find_map(|(token, name)| {
        user_agent.find(token).map(|index| {
            let version: String = user_agent[index + token.len()..]
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if version.is_empty() {
                (*name).to_string()
            } else {
                format!("{} {}", name, version)
            }
        })
    })
}

/// メソッドとパスから操作内容を推定
fn describe_operation(method: &Method, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let description = match (method.as_str(), segments.as_slice()) {
        ("POST", ["system", "dept"]) => "Create department",
        ("PUT", ["system", "dept", _]) => "Update department",
        ("DELETE", ["system", "dept", _]) => "Delete department",
        ("PUT", ["system", "option"]) => "Update system options",
        ("PATCH", ["system", "option", "value"]) => "Reset system options",
        _ => return format!("{} {}", method, path),
    };

    description.to_string()
}
