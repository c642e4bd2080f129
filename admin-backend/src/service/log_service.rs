// src/service/log_service.rs
use crate::api::dto::log_dto::{LogDetailDto, LogDto, LogQuery};
use crate::db::DbPool;
use crate::domain::log_model;
use crate::error::{AppError, AppResult};
use crate::repository::log_repository::LogRepository;
use crate::types::PaginatedResponse;

pub struct LogService {
    db: DbPool,
}

impl LogService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn record(&self, entry: log_model::ActiveModel) -> AppResult<i64> {
        let log = LogRepository::create(&self.db, entry).await?;
        Ok(log.log_id)
    }

    pub async fn page(&self, query: &LogQuery) -> AppResult<PaginatedResponse<LogDto>> {
        let (page, per_page) = query.pagination.get_pagination();
        let (logs, total) = LogRepository::find_with_query(&self.db, query).await?;

        let items = logs.into_iter().map(LogDto::from).collect();
        Ok(PaginatedResponse::new(items, page, per_page, total))
    }

    pub async fn get(&self, log_id: i64) -> AppResult<LogDetailDto> {
        LogRepository::find_by_id(&self.db, log_id)
            .await?
            .map(LogDetailDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Log {} not found", log_id)))
    }
}
