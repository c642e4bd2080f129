use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::DisEnableStatus;

/// 最上位部門の parent_id
pub const ROOT_PARENT_ID: i64 = 0;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sys_dept")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub dept_id: i64,
    pub dept_name: String,
    pub parent_id: i64,
    pub description: Option<String>,
    pub dept_sort: i32,
    pub status: i16,
    pub create_user: Option<i64>,
    pub create_time: DateTime<Utc>,
    pub update_user: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_model::Entity")]
    Users,
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_top_level(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }

    pub fn get_status(&self) -> DisEnableStatus {
        DisEnableStatus::try_from(self.status).unwrap_or(DisEnableStatus::Disable)
    }
}
