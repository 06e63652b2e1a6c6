use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{heat_pump_devices, heat_pump_snapshots};

/// Snapshot lookback when no `from` is given
pub const DEFAULT_SNAPSHOT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPumpDevice {
    pub id: i32,
    pub device_id: String,
    pub account_number: String,
    pub euid: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl From<heat_pump_devices::Model> for HeatPumpDevice {
    fn from(model: heat_pump_devices::Model) -> Self {
        Self {
            id: model.id,
            device_id: model.device_id,
            account_number: model.account_number,
            euid: model.euid,
            is_active: model.is_active,
            created_at: model.created_at,
            last_sync_at: model.last_sync_at,
        }
    }
}

/// One stored vendor payload for a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPumpSnapshot {
    pub id: i32,
    pub device_id: String,
    pub account_number: String,
    pub payload: Value,
    pub snapshot_taken_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<heat_pump_snapshots::Model> for HeatPumpSnapshot {
    fn from(model: heat_pump_snapshots::Model) -> Self {
        Self {
            id: model.id,
            device_id: model.device_id,
            account_number: model.account_number,
            payload: model.payload,
            snapshot_taken_at: model.snapshot_taken_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRangeQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotsResponse {
    pub device_id: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub count: usize,
    pub snapshots: Vec<HeatPumpSnapshot>,
}
