// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// システム管理テーブル
mod m20250801_000001_create_sys_dept_table;
mod m20250801_000002_create_sys_user_table;
mod m20250801_000003_create_sys_option_table;

// 監視テーブル
mod m20250801_000004_create_sys_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 部門（依存関係なし）
            Box::new(m20250801_000001_create_sys_dept_table::Migration),
            // 2. ユーザー（部門への紐付け）
            Box::new(m20250801_000002_create_sys_user_table::Migration),
            // 3. システムパラメータと初期値
            Box::new(m20250801_000003_create_sys_option_table::Migration),
            // 4. 操作ログ
            Box::new(m20250801_000004_create_sys_log_table::Migration),
        ]
    }
}
