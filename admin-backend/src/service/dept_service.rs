// src/service/dept_service.rs
use crate::api::dto::dept_dto::{
    CreateDeptDto, DeptDetailDto, DeptDto, DeptQuery, TreeNode, UpdateDeptDto,
};
use crate::db::DbPool;
use crate::domain::dept_model::{self, ROOT_PARENT_ID};
use crate::domain::status::DisEnableStatus;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::{dept_repository::DeptRepository, user_repository::UserRepository};
use crate::service::dept_tree;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DbErr, Set, SqlErr, TransactionTrait};

pub struct DeptService {
    db: DbPool,
}

impl DeptService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn list(&self, query: &DeptQuery) -> AppResult<Vec<DeptDto>> {
        let depts = DeptRepository::find_all(&self.db, query).await?;
        Ok(depts.into_iter().map(DeptDto::from).collect())
    }

    /// 入れ子の部門一覧
    pub async fn list_tree(&self, query: &DeptQuery) -> AppResult<Vec<DeptDto>> {
        let list = self.list(query).await?;
        Ok(dept_tree::build_list_tree(list))
    }

    /// 選択用の部門ツリー
    pub async fn tree(&self, query: &DeptQuery) -> AppResult<Vec<TreeNode>> {
        let list = self.list(query).await?;
        Ok(dept_tree::build_tree(list))
    }

    pub async fn get(&self, dept_id: i64) -> AppResult<DeptDetailDto> {
        let dept = DeptRepository::find_by_id(&self.db, dept_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", dept_id)))?;

        let parent_name = if dept.is_top_level() {
            None
        } else {
            DeptRepository::find_by_id(&self.db, dept.parent_id)
                .await?
                .map(|parent| parent.dept_name)
        };

        Ok(DeptDetailDto {
            dept: DeptDto::from(dept),
            parent_name,
        })
    }

    pub async fn add(&self, request: CreateDeptDto, operator: Option<i64>) -> AppResult<i64> {
        let dept_name = request.dept_name.trim().to_string();

        log_with_context!(
            tracing::Level::DEBUG,
            "Creating department",
            "dept_name" => &dept_name,
            "parent_id" => request.parent_id,
            "operator" => operator
        );

        let txn = self.db.begin().await?;

        if self
            .check_name_exists(&txn, &dept_name, request.parent_id, None)
            .await?
        {
            return Err(duplicate_name_conflict("add", &dept_name));
        }
        Self::ensure_parent_exists(&txn, request.parent_id).await?;

        let new_dept = dept_model::ActiveModel {
            dept_name: Set(dept_name.clone()),
            parent_id: Set(request.parent_id),
            description: Set(request.description),
            dept_sort: Set(request.dept_sort),
            status: Set(DisEnableStatus::Enable.value()),
            create_user: Set(operator),
            create_time: Set(Utc::now()),
            ..Default::default()
        };
        // 同時登録は一意インデックスで検出される
        let dept = DeptRepository::create(&txn, new_dept)
            .await
            .map_err(|e| map_unique_violation(e, "add", &dept_name))?;

        txn.commit().await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department created successfully",
            "dept_id" => dept.dept_id,
            "dept_name" => &dept.dept_name
        );

        Ok(dept.dept_id)
    }

    pub async fn update(
        &self,
        dept_id: i64,
        request: UpdateDeptDto,
        operator: Option<i64>,
    ) -> AppResult<()> {
        let dept_name = request.dept_name.trim().to_string();

        log_with_context!(
            tracing::Level::DEBUG,
            "Updating department",
            "dept_id" => dept_id,
            "operator" => operator
        );

        let txn = self.db.begin().await?;

        let existing = DeptRepository::find_by_id(&txn, dept_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", dept_id)))?;

        if self
            .check_name_exists(&txn, &dept_name, request.parent_id, Some(dept_id))
            .await?
        {
            return Err(duplicate_name_conflict("update", &dept_name));
        }

        // 親部門変更時の循環参照チェック
        if request.parent_id != existing.parent_id {
            if request.parent_id == dept_id {
                return Err(AppError::BadRequest(
                    "A department cannot be its own parent".to_string(),
                ));
            }
            let edges = DeptRepository::find_all_edges(&txn).await?;
            if dept_tree::descendant_ids(&edges, dept_id).contains(&request.parent_id) {
                return Err(AppError::BadRequest(
                    "A department cannot be moved under one of its descendants".to_string(),
                ));
            }
            Self::ensure_parent_exists(&txn, request.parent_id).await?;
        }

        let status = request.status.unwrap_or_else(|| existing.get_status());
        let mut active_model: dept_model::ActiveModel = existing.into();
        active_model.dept_name = Set(dept_name.clone());
        active_model.parent_id = Set(request.parent_id);
        active_model.description = Set(request.description);
        active_model.dept_sort = Set(request.dept_sort);
        active_model.status = Set(status.value());
        active_model.update_user = Set(operator);
        active_model.update_time = Set(Some(Utc::now()));
        DeptRepository::update(&txn, active_model)
            .await
            .map_err(|e| map_unique_violation(e, "update", &dept_name))?;

        txn.commit().await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department updated successfully",
            "dept_id" => dept_id
        );

        Ok(())
    }

    /// 部門と、その直下の子部門を削除（所属ユーザーがいる場合は失敗）
    pub async fn delete(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "At least one department id is required".to_string(),
            ));
        }

        log_with_context!(
            tracing::Level::DEBUG,
            "Deleting departments",
            "ids" => ids
        );

        let txn = self.db.begin().await?;

        if UserRepository::count_by_dept_ids(&txn, ids).await? > 0 {
            return Err(AppError::Conflict(
                "The selected departments still have users assigned, unassign them and retry"
                    .to_string(),
            ));
        }

        let deleted = DeptRepository::delete_by_ids(&txn, ids).await?;
        let deleted_children = DeptRepository::delete_by_parent_ids(&txn, ids).await?;

        txn.commit().await?;

        log_with_context!(
            tracing::Level::INFO,
            "Departments deleted successfully",
            "ids" => ids,
            "deleted" => deleted,
            "deleted_children" => deleted_children
        );

        Ok(())
    }

    /// 同じ親の下に同名の部門があるか（exclude_id は更新対象自身）
    pub async fn check_name_exists<C: ConnectionTrait>(
        &self,
        db: &C,
        dept_name: &str,
        parent_id: i64,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        Ok(DeptRepository::exists_by_name(db, dept_name, parent_id, exclude_id).await?)
    }

    async fn ensure_parent_exists<C: ConnectionTrait>(db: &C, parent_id: i64) -> AppResult<()> {
        if parent_id == ROOT_PARENT_ID {
            return Ok(());
        }
        DeptRepository::find_by_id(db, parent_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Parent department {} not found", parent_id)))
    }
}

fn duplicate_name_conflict(action: &str, dept_name: &str) -> AppError {
    AppError::Conflict(format!("Failed to {}, '{}' already exists", action, dept_name))
}

/// (parent_id, dept_name) の一意制約違反を Conflict に変換
fn map_unique_violation(err: DbErr, action: &str, dept_name: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_name_conflict(action, dept_name),
        _ => AppError::DbErr(err),
    }
}
