// src/repository/mod.rs
pub mod dept_repository;
pub mod log_repository;
pub mod option_repository;
pub mod user_repository;

use sea_orm::sea_query::LikeExpr;

/// 部分一致検索用の LIKE パターン（`%` と `_` は文字として扱う）
pub fn contains_pattern(value: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(value))).escape('\\')
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
