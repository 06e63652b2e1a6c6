//! Storage for heat pump devices and their telemetry snapshots.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::Value;

use crate::entities::{
    heat_pump_devices, heat_pump_snapshots,
    prelude::{HeatPumpDevices, HeatPumpSnapshots},
};
use crate::models::heat_pump::{HeatPumpDevice, HeatPumpSnapshot};

#[async_trait]
pub trait HeatPumpRepository: Send + Sync {
    /// Active devices, ordered by device id.
    async fn get_active_devices(&self) -> Result<Vec<HeatPumpDevice>, DbErr>;

    /// Snapshots for one device taken within `[from, to]`, oldest first.
    async fn get_snapshots(
        &self,
        device_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<HeatPumpSnapshot>, DbErr>;

    async fn add_snapshot(
        &self,
        device: &HeatPumpDevice,
        payload: Value,
        taken_at: DateTime<Utc>,
    ) -> Result<HeatPumpSnapshot, DbErr>;

    async fn mark_synced(&self, device_id: &str, synced_at: DateTime<Utc>) -> Result<(), DbErr>;
}

#[derive(Clone)]
pub struct SeaOrmHeatPumpRepository {
    db: DatabaseConnection,
}

impl SeaOrmHeatPumpRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HeatPumpRepository for SeaOrmHeatPumpRepository {
    async fn get_active_devices(&self) -> Result<Vec<HeatPumpDevice>, DbErr> {
        let devices = HeatPumpDevices::find()
            .filter(heat_pump_devices::Column::IsActive.eq(true))
            .order_by_asc(heat_pump_devices::Column::DeviceId)
            .all(&self.db)
            .await?;
        Ok(devices.into_iter().map(HeatPumpDevice::from).collect())
    }

    async fn get_snapshots(
        &self,
        device_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<HeatPumpSnapshot>, DbErr> {
        let snapshots = HeatPumpSnapshots::find()
            .filter(heat_pump_snapshots::Column::DeviceId.eq(device_id))
            .filter(heat_pump_snapshots::Column::SnapshotTakenAt.gte(from))
            .filter(heat_pump_snapshots::Column::SnapshotTakenAt.lte(to))
            .order_by_asc(heat_pump_snapshots::Column::SnapshotTakenAt)
            .all(&self.db)
            .await?;

        tracing::debug!(
            device_id = %device_id,
            count = snapshots.len(),
            "Loaded heat pump snapshots"
        );

        Ok(snapshots.into_iter().map(HeatPumpSnapshot::from).collect())
    }

    async fn add_snapshot(
        &self,
        device: &HeatPumpDevice,
        payload: Value,
        taken_at: DateTime<Utc>,
    ) -> Result<HeatPumpSnapshot, DbErr> {
        let snapshot = heat_pump_snapshots::ActiveModel {
            device_id: Set(device.device_id.clone()),
            account_number: Set(device.account_number.clone()),
            payload: Set(payload),
            snapshot_taken_at: Set(taken_at),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(snapshot.insert(&self.db).await?.into())
    }

    async fn mark_synced(&self, device_id: &str, synced_at: DateTime<Utc>) -> Result<(), DbErr> {
        HeatPumpDevices::update_many()
            .col_expr(
                heat_pump_devices::Column::LastSyncAt,
                sea_orm::sea_query::Expr::value(Some(synced_at)),
            )
            .filter(heat_pump_devices::Column::DeviceId.eq(device_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
