use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeatPumpSnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HeatPumpSnapshots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpSnapshots::DeviceId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpSnapshots::AccountNumber)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HeatPumpSnapshots::Payload).json_binary().not_null())
                    .col(
                        ColumnDef::new(HeatPumpSnapshots::SnapshotTakenAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpSnapshots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_heat_pump_snapshots_device_taken_at")
                    .table(HeatPumpSnapshots::Table)
                    .col(HeatPumpSnapshots::DeviceId)
                    .col(HeatPumpSnapshots::SnapshotTakenAt)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HeatPumpSnapshots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HeatPumpSnapshots {
    Table,
    Id,
    DeviceId,
    AccountNumber,
    Payload,
    SnapshotTakenAt,
    CreatedAt,
}
