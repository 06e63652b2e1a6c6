//! Heat Pump Snapshot Sync Job
//!
//! Periodically snapshots live telemetry for every active heat pump.
//! Supports graceful shutdown via ctrl-c.

use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::services::heat_pump_snapshot::HeatPumpSnapshotService;

/// Default snapshot interval in seconds (15 minutes)
pub const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 900;

/// Start the heat pump snapshot job
///
/// Spawns a background task that takes a snapshot of every active device
/// each `interval_secs`. Errors are logged and the next tick retries.
pub async fn start_heat_pump_snapshot_job(service: HeatPumpSnapshotService, interval_secs: u64) {
    tokio::spawn(async move {
        info!(interval_secs = interval_secs, "Heat pump snapshot job started");

        let mut interval = interval(Duration::from_secs(interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received, stopping heat pump snapshot job");
                    break;
                }
                _ = interval.tick() => {
                    match service.snapshot_all_devices().await {
                        Ok(count) => {
                            info!(count = count, "Heat pump snapshot completed");
                        }
                        Err(e) => {
                            error!(error = %e, "Heat pump snapshot failed");
                        }
                    }
                }
            }
        }

        info!("Heat pump snapshot job stopped");
    });
}
