use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeatPumpDevices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HeatPumpDevices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpDevices::DeviceId)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpDevices::AccountNumber)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HeatPumpDevices::Euid).string_len(100).null())
                    .col(
                        ColumnDef::new(HeatPumpDevices::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(HeatPumpDevices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(HeatPumpDevices::LastSyncAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_heat_pump_devices_is_active")
                    .table(HeatPumpDevices::Table)
                    .col(HeatPumpDevices::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HeatPumpDevices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HeatPumpDevices {
    Table,
    Id,
    DeviceId,
    AccountNumber,
    Euid,
    IsActive,
    CreatedAt,
    LastSyncAt,
}
