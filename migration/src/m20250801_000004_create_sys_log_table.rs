use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SysLog::LogId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SysLog::LogLevel)
                            .string_len(10)
                            .not_null()
                            .default("INFO"),
                    )
                    .col(ColumnDef::new(SysLog::Description).string_len(255))
                    .col(ColumnDef::new(SysLog::RequestUrl).string_len(512).not_null())
                    .col(ColumnDef::new(SysLog::RequestMethod).string_len(10).not_null())
                    .col(ColumnDef::new(SysLog::RequestHeader).text())
                    .col(ColumnDef::new(SysLog::RequestBody).text())
                    .col(ColumnDef::new(SysLog::StatusCode).integer().not_null())
                    .col(ColumnDef::new(SysLog::ResponseHeader).text())
                    .col(ColumnDef::new(SysLog::ResponseBody).text())
                    .col(
                        ColumnDef::new(SysLog::ElapsedTime)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SysLog::RequestIp).string_len(100))
                    .col(ColumnDef::new(SysLog::Location).string_len(255))
                    .col(ColumnDef::new(SysLog::Browser).string_len(100))
                    .col(ColumnDef::new(SysLog::Exception).text())
                    .col(ColumnDef::new(SysLog::CreateUser).big_integer())
                    .col(
                        ColumnDef::new(SysLog::CreateTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sys_log_create_time")
                    .table(SysLog::Table)
                    .col(SysLog::CreateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sys_log_create_user")
                    .table(SysLog::Table)
                    .col(SysLog::CreateUser)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysLog {
    Table,
    LogId,
    LogLevel,
    Description,
    RequestUrl,
    RequestMethod,
    RequestHeader,
    RequestBody,
    StatusCode,
    ResponseHeader,
    ResponseBody,
    ElapsedTime,
    RequestIp,
    Location,
    Browser,
    Exception,
    CreateUser,
    CreateTime,
}
