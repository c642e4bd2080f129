// src/repository/dept_repository.rs
use crate::api::dto::dept_dto::DeptQuery;
use crate::repository::contains_pattern;
use crate::domain::dept_model::{self, Entity as SysDept};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// 部門テーブルへのアクセス。トランザクション内でも使えるよう接続は呼び出し側から渡す。
pub struct DeptRepository;

impl DeptRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        dept_id: i64,
    ) -> Result<Option<dept_model::Model>, DbErr> {
        SysDept::find_by_id(dept_id).one(db).await
    }

    /// 検索条件に一致する部門を並び順（dept_sort → dept_id）で取得
    pub async fn find_all<C: ConnectionTrait>(
        db: &C,
        query: &DeptQuery,
    ) -> Result<Vec<dept_model::Model>, DbErr> {
        let mut condition = Condition::all();

        if let Some(name) = query
            .dept_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            condition = condition.add(dept_model::Column::DeptName.like(contains_pattern(name)));
        }

        if let Some(status) = query.status {
            condition = condition.add(dept_model::Column::Status.eq(status.value()));
        }

        SysDept::find()
            .filter(condition)
            .order_by_asc(dept_model::Column::DeptSort)
            .order_by_asc(dept_model::Column::DeptId)
            .all(db)
            .await
    }

    /// 全部門の (dept_id, parent_id) ペア
    pub async fn find_all_edges<C: ConnectionTrait>(db: &C) -> Result<Vec<(i64, i64)>, DbErr> {
        SysDept::find()
            .select_only()
            .column(dept_model::Column::DeptId)
            .column(dept_model::Column::ParentId)
            .into_tuple()
            .all(db)
            .await
    }

    /// 同じ親の下に同名の部門が存在するか
    pub async fn exists_by_name<C: ConnectionTrait>(
        db: &C,
        dept_name: &str,
        parent_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = SysDept::find()
            .filter(dept_model::Column::DeptName.eq(dept_name))
            .filter(dept_model::Column::ParentId.eq(parent_id));

        if let Some(id) = exclude_id {
            query = query.filter(dept_model::Column::DeptId.ne(id));
        }

        Ok(query.count(db).await? > 0)
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        dept: dept_model::ActiveModel,
    ) -> Result<dept_model::Model, DbErr> {
        dept.insert(db).await
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        dept: dept_model::ActiveModel,
    ) -> Result<dept_model::Model, DbErr> {
        dept.update(db).await
    }

    pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[i64]) -> Result<u64, DbErr> {
        let result = SysDept::delete_many()
            .filter(dept_model::Column::DeptId.is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// 指定部門を親に持つ部門を削除
    pub async fn delete_by_parent_ids<C: ConnectionTrait>(
        db: &C,
        parent_ids: &[i64],
    ) -> Result<u64, DbErr> {
        let result = SysDept::delete_many()
            .filter(dept_model::Column::ParentId.is_in(parent_ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
