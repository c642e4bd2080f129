// src/repository/user_repository.rs
use crate::domain::user_model::{self, Entity as SysUser};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};

pub struct UserRepository;

impl UserRepository {
    /// 指定部門に所属するユーザー数
    pub async fn count_by_dept_ids<C: ConnectionTrait>(
        db: &C,
        dept_ids: &[i64],
    ) -> Result<u64, DbErr> {
        if dept_ids.is_empty() {
            return Ok(0);
        }

        SysUser::find()
            .filter(user_model::Column::DeptId.is_in(dept_ids.iter().copied()))
            .count(db)
            .await
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user: user_model::ActiveModel,
    ) -> Result<user_model::Model, DbErr> {
        user.insert(db).await
    }
}
