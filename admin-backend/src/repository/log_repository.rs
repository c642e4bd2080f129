// src/repository/log_repository.rs
use crate::api::dto::log_dto::LogQuery;
use crate::domain::log_model::{ActiveModel, Column, Entity, Model};
use crate::repository::contains_pattern;
use crate::types::SortQuery;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

pub struct LogRepository;

impl LogRepository {
    pub async fn create<C: ConnectionTrait>(db: &C, log: ActiveModel) -> Result<Model, DbErr> {
        log.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        log_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(log_id).one(db).await
    }

    /// 検索条件・ソート・ページネーションを適用して取得
    pub async fn find_with_query<C: ConnectionTrait>(
        db: &C,
        query: &LogQuery,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(description) = query
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            condition = condition.add(Column::Description.like(contains_pattern(description)));
        }
        if let Some(level) = query.log_level {
            condition = condition.add(Column::LogLevel.eq(level.as_str()));
        }
        if let Some(method) = query.request_method.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(Column::RequestMethod.eq(method.to_ascii_uppercase()));
        }
        if let Some(create_user) = query.create_user {
            condition = condition.add(Column::CreateUser.eq(create_user));
        }
        if let Some(after) = query.created_after {
            condition = condition.add(Column::CreateTime.gte(after));
        }
        if let Some(before) = query.created_before {
            condition = condition.add(Column::CreateTime.lte(before));
        }

        let select = Self::apply_sorting(Entity::find().filter(condition), &query.sort);

        let (page, per_page) = query.pagination.get_pagination();
        let paginator = select.paginate(db, per_page);
        let total = paginator.num_items().await?;
        let logs = paginator.fetch_page(page - 1).await?;

        Ok((logs, total))
    }

    /// ソート適用ヘルパー（未指定・不正なフィールドは作成日時の降順）
    fn apply_sorting(query: Select<Entity>, sort: &SortQuery) -> Select<Entity> {
        let allowed = LogQuery::allowed_sort_fields();
        let column = match sort.sort_by.as_deref() {
            Some(field) if allowed.contains(&field) => match field {
                "elapsed_time" => Column::ElapsedTime,
                "status_code" => Column::StatusCode,
                _ => Column::CreateTime,
            },
            _ => {
                return query
                    .order_by(Column::CreateTime, Order::Desc)
                    .order_by(Column::LogId, Order::Desc)
            }
        };

        query
            .order_by(column, sort.sort_order.into())
            .order_by(Column::LogId, Order::Desc)
    }
}
