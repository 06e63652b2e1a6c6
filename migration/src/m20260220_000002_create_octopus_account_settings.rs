use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OctopusAccountSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OctopusAccountSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OctopusAccountSettings::AccountNumber)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(OctopusAccountSettings::ApiKey)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OctopusAccountSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(OctopusAccountSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OctopusAccountSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OctopusAccountSettings {
    Table,
    Id,
    AccountNumber,
    ApiKey,
    CreatedAt,
    UpdatedAt,
}
