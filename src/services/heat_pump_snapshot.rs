//! Heat Pump Snapshot Service
//!
//! Takes a telemetry snapshot for every active device and stores the vendor
//! payload as-is.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::heat_pump::HeatPumpDevice;
use crate::services::account_settings::AccountSettingsRepository;
use crate::services::heat_pump_repository::HeatPumpRepository;
use crate::services::octopus::HeatPumpTelemetry;

#[derive(Clone)]
pub struct HeatPumpSnapshotService {
    heat_pumps: Arc<dyn HeatPumpRepository>,
    telemetry: Arc<dyn HeatPumpTelemetry>,
    account_settings: Arc<dyn AccountSettingsRepository>,
}

impl HeatPumpSnapshotService {
    pub fn new(
        heat_pumps: Arc<dyn HeatPumpRepository>,
        telemetry: Arc<dyn HeatPumpTelemetry>,
        account_settings: Arc<dyn AccountSettingsRepository>,
    ) -> Self {
        Self {
            heat_pumps,
            telemetry,
            account_settings,
        }
    }

    /// Snapshot all active devices. Returns how many snapshots were stored.
    ///
    /// A failing device is logged and skipped.
    pub async fn snapshot_all_devices(
        &self,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        let devices = self.heat_pumps.get_active_devices().await?;

        info!(count = devices.len(), "Snapshotting active heat pump devices");

        let mut stored = 0;
        for device in &devices {
            match self.snapshot_device(device).await {
                Ok(true) => stored += 1,
                Ok(false) => {}
                Err(e) => {
                    error!(device_id = %device.device_id, error = %e, "Failed to snapshot device");
                }
            }
        }

        Ok(stored)
    }

    async fn snapshot_device(
        &self,
        device: &HeatPumpDevice,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let Some(euid) = usable_euid(device) else {
            warn!(device_id = %device.device_id, "Device has no EUID, skipping snapshot");
            return Ok(false);
        };

        let Some(settings) = self
            .account_settings
            .get_by_account_number(&device.account_number)
            .await?
        else {
            warn!(
                device_id = %device.device_id,
                account_number = %device.account_number,
                "No settings found for account, skipping device"
            );
            return Ok(false);
        };

        let payload = self
            .telemetry
            .fetch_status_and_config(&settings.api_key, &device.account_number, euid)
            .await?;

        let now = Utc::now();
        let snapshot = self.heat_pumps.add_snapshot(device, payload, now).await?;
        self.heat_pumps.mark_synced(&device.device_id, now).await?;

        info!(
            device_id = %device.device_id,
            snapshot_id = snapshot.id,
            "Stored heat pump snapshot"
        );

        Ok(true)
    }
}

fn usable_euid(device: &HeatPumpDevice) -> Option<&str> {
    device
        .euid
        .as_deref()
        .map(str::trim)
        .filter(|euid| !euid.is_empty())
}
