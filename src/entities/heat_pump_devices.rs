//! `SeaORM` Entity for heat_pump_devices table
//!
//! Devices are provisioned outside this service; the snapshot poller
//! only reads the active ones.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "heat_pump_devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub device_id: String,
    pub account_number: String,
    /// Controller EUID, required for live telemetry queries
    pub euid: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub last_sync_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
