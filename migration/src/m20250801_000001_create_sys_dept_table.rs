use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysDept::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SysDept::DeptId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SysDept::DeptName).string_len(64).not_null())
                    .col(
                        ColumnDef::new(SysDept::ParentId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SysDept::Description).string_len(512))
                    .col(
                        ColumnDef::new(SysDept::DeptSort)
                            .integer()
                            .not_null()
                            .default(999),
                    )
                    .col(
                        ColumnDef::new(SysDept::Status)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(SysDept::CreateUser).big_integer())
                    .col(
                        ColumnDef::new(SysDept::CreateTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SysDept::UpdateUser).big_integer())
                    .col(ColumnDef::new(SysDept::UpdateTime).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // 親部門での絞り込み用
        manager
            .create_index(
                Index::create()
                    .name("idx_sys_dept_parent_id")
                    .table(SysDept::Table)
                    .col(SysDept::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sys_dept_parent_id_dept_name")
                    .table(SysDept::Table)
                    .col(SysDept::ParentId)
                    .col(SysDept::DeptName)
                    // 同じ親の下で部門名は一意
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysDept::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysDept {
    Table,
    DeptId,
    DeptName,
    ParentId,
    Description,
    DeptSort,
    Status,
    CreateUser,
    CreateTime,
    UpdateUser,
    UpdateTime,
}
