use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeatPumpEfficiencyRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // One record per calendar day
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::Date)
                            .date()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::ElectricityKwh)
                            .decimal_len(10, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::OutdoorAvgC)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::OutdoorHighC)
                            .decimal_len(6, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::OutdoorLowC)
                            .decimal_len(6, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::IndoorAvgC)
                            .decimal_len(6, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::ComfortScore)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::ChangeActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::ChangeDescription)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::Notes)
                            .string_len(2000)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(HeatPumpEfficiencyRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        // Change-period queries filter on this flag
        manager
            .create_index(
                Index::create()
                    .name("idx_heat_pump_efficiency_records_change_active")
                    .table(HeatPumpEfficiencyRecords::Table)
                    .col(HeatPumpEfficiencyRecords::ChangeActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(HeatPumpEfficiencyRecords::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum HeatPumpEfficiencyRecords {
    Table,
    Id,
    Date,
    ElectricityKwh,
    OutdoorAvgC,
    OutdoorHighC,
    OutdoorLowC,
    IndoorAvgC,
    ComfortScore,
    ChangeActive,
    ChangeDescription,
    Notes,
    CreatedAt,
    UpdatedAt,
}
