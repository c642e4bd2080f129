use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初期パラメータ (name, code, default_value, description)
const DEFAULT_OPTIONS: &[(&str, &str, &str, &str)] = &[
    (
        "Site title",
        "SITE_TITLE",
        "Admin Backend",
        "Shown in the browser title and the login page",
    ),
    (
        "Site description",
        "SITE_DESCRIPTION",
        "Department, option and operation log management",
        "Used as the meta description of the front end",
    ),
    (
        "Copyright",
        "SITE_COPYRIGHT",
        "Copyright © 2025 Admin Backend",
        "Shown in the page footer",
    ),
    ("Favicon", "SITE_FAVICON", "/favicon.ico", "Browser tab icon"),
    ("Logo", "SITE_LOGO", "/logo.svg", "Logo in the navigation bar"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysOption::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SysOption::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SysOption::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(SysOption::Code)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SysOption::Value).text())
                    .col(ColumnDef::new(SysOption::DefaultValue).text())
                    .col(ColumnDef::new(SysOption::Description).string_len(200))
                    .col(ColumnDef::new(SysOption::UpdateUser).big_integer())
                    .col(ColumnDef::new(SysOption::UpdateTime).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(SysOption::Table).columns([
            SysOption::Name,
            SysOption::Code,
            SysOption::DefaultValue,
            SysOption::Description,
        ]);
        for (name, code, default_value, description) in DEFAULT_OPTIONS {
            insert.values_panic([
                (*name).into(),
                (*code).into(),
                (*default_value).into(),
                (*description).into(),
            ]);
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysOption::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysOption {
    Table,
    Id,
    Name,
    Code,
    Value,
    DefaultValue,
    Description,
    UpdateUser,
    UpdateTime,
}
