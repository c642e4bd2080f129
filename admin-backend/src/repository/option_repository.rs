// src/repository/option_repository.rs
use crate::domain::option_model::{self, Entity as SysOption};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct OptionRepository;

impl OptionRepository {
    /// コード指定がなければ全件
    pub async fn find_all<C: ConnectionTrait>(
        db: &C,
        codes: Option<&[String]>,
    ) -> Result<Vec<option_model::Model>, DbErr> {
        let mut query = SysOption::find();

        if let Some(codes) = codes {
            query = query.filter(option_model::Column::Code.is_in(codes.iter().cloned()));
        }

        query.order_by_asc(option_model::Column::Id).all(db).await
    }

    pub async fn find_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: &[i64],
    ) -> Result<Vec<option_model::Model>, DbErr> {
        SysOption::find()
            .filter(option_model::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await
    }

    pub async fn update_value<C: ConnectionTrait>(
        db: &C,
        id: i64,
        value: Option<String>,
        update_user: Option<i64>,
    ) -> Result<u64, DbErr> {
        let result = SysOption::update_many()
            .col_expr(option_model::Column::Value, Expr::value(value))
            .col_expr(option_model::Column::UpdateUser, Expr::value(update_user))
            .col_expr(option_model::Column::UpdateTime, Expr::value(Utc::now()))
            .filter(option_model::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// 値を消去してデフォルト値に戻す
    pub async fn reset_values<C: ConnectionTrait>(
        db: &C,
        codes: &[String],
        update_user: Option<i64>,
    ) -> Result<u64, DbErr> {
        let result = SysOption::update_many()
            .col_expr(option_model::Column::Value, Expr::value(Option::<String>::None))
            .col_expr(option_model::Column::UpdateUser, Expr::value(update_user))
            .col_expr(option_model::Column::UpdateTime, Expr::value(Utc::now()))
            .filter(option_model::Column::Code.is_in(codes.iter().cloned()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
