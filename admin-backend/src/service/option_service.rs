// src/service/option_service.rs
use crate::api::dto::option_dto::{OptionDto, OptionQuery, OptionValueDto};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::option_repository::OptionRepository;
use sea_orm::TransactionTrait;
use std::collections::HashMap;

pub struct OptionService {
    db: DbPool,
}

impl OptionService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn list(&self, query: &OptionQuery) -> AppResult<Vec<OptionDto>> {
        let codes = query.code.as_deref().filter(|codes| !codes.is_empty());
        let options = OptionRepository::find_all(&self.db, codes).await?;
        Ok(options.into_iter().map(OptionDto::from).collect())
    }

    /// 複数のパラメータ値を一括更新（ID とコードの組み合わせが一致しない場合は全体を失敗させる）
    pub async fn update(&self, items: Vec<OptionValueDto>, operator: Option<i64>) -> AppResult<()> {
        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();

        let txn = self.db.begin().await?;

        let existing: HashMap<i64, String> = OptionRepository::find_by_ids(&txn, &ids)
            .await?
            .into_iter()
            .map(|option| (option.id, option.code))
            .collect();

        for item in &items {
            match existing.get(&item.id) {
                Some(code) if *code == item.code => {}
                Some(_) => {
                    return Err(AppError::BadRequest(format!(
                        "Option {} does not have code '{}'",
                        item.id, item.code
                    )))
                }
                None => {
                    return Err(AppError::BadRequest(format!(
                        "Option {} does not exist",
                        item.id
                    )))
                }
            }
        }

        for item in items {
            OptionRepository::update_value(&txn, item.id, item.value, operator).await?;
        }

        txn.commit().await?;

        log_with_context!(
            tracing::Level::INFO,
            "Options updated successfully",
            "ids" => &ids,
            "operator" => operator
        );

        Ok(())
    }

    /// 値をデフォルトに戻す
    pub async fn reset_value(&self, codes: &[String], operator: Option<i64>) -> AppResult<u64> {
        let reset = OptionRepository::reset_values(&self.db, codes, operator).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Options reset to default",
            "codes" => codes,
            "reset" => reset
        );

        Ok(reset)
    }
}
