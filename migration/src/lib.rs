pub use sea_orm_migration::prelude::*;

mod m20260220_000001_create_heat_pump_efficiency_records;
mod m20260220_000002_create_octopus_account_settings;
mod m20260220_000003_create_heat_pump_devices;
mod m20260220_000004_create_heat_pump_snapshots;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260220_000001_create_heat_pump_efficiency_records::Migration),
            Box::new(m20260220_000002_create_octopus_account_settings::Migration),
            Box::new(m20260220_000003_create_heat_pump_devices::Migration),
            Box::new(m20260220_000004_create_heat_pump_snapshots::Migration),
        ]
    }
}
