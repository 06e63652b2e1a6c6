//! `SeaORM` Entity prelude

pub use super::heat_pump_devices::Entity as HeatPumpDevices;
pub use super::heat_pump_efficiency_records::Entity as HeatPumpEfficiencyRecords;
pub use super::heat_pump_snapshots::Entity as HeatPumpSnapshots;
pub use super::octopus_account_settings::Entity as OctopusAccountSettings;
