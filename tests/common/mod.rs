#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use cosy_analyser_backend::{
    build_router,
    models::{
        account_settings::AccountSettings,
        efficiency::{DailyRecord, EfficiencyRecordRequest},
        heat_pump::{HeatPumpDevice, HeatPumpSnapshot},
    },
    services::{
        account_settings::AccountSettingsRepository,
        efficiency_repository::{EfficiencyRepository, RecordWriteError},
        heat_pump_repository::HeatPumpRepository,
    },
    AppState,
};
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::Value;
use tower::ServiceExt;

/// Efficiency records held in memory, ordered by date on read.
///
/// Dates are unique on write, like the database constraint.
#[derive(Default)]
pub struct InMemoryEfficiencyRepository {
    records: Mutex<Vec<DailyRecord>>,
    skip_date_check: bool,
}

impl InMemoryEfficiencyRepository {
    /// `exists_for_date` always answers false, as when two writers race.
    pub fn without_date_check() -> Self {
        Self {
            skip_date_check: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl EfficiencyRepository for InMemoryEfficiencyRepository {
    async fn get_records(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyRecord>, DbErr> {
        let mut records: Vec<DailyRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| from.is_none_or(|f| r.date >= f))
            .filter(|r| to.is_none_or(|t| r.date <= t))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<DailyRecord>, DbErr> {
        Ok(self.records.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn exists_for_date(
        &self,
        date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        if self.skip_date_check {
            return Ok(false);
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.date == date && Some(r.id) != exclude_id))
    }

    async fn add(
        &self,
        request: &EfficiencyRecordRequest,
    ) -> Result<DailyRecord, RecordWriteError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.date == request.date) {
            return Err(RecordWriteError::DuplicateDate(request.date));
        }

        let now = Utc::now();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let mut record = DailyRecord {
            id,
            date: request.date,
            electricity_kwh: request.electricity_kwh,
            outdoor_avg_c: request.outdoor_avg_c,
            outdoor_high_c: None,
            outdoor_low_c: None,
            indoor_avg_c: None,
            comfort_score: None,
            change_active: false,
            change_description: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        request.apply_to(&mut record, now);

        records.push(record.clone());
        Ok(record)
    }

    async fn save(&self, record: &DailyRecord) -> Result<DailyRecord, RecordWriteError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.date == record.date && r.id != record.id) {
            return Err(RecordWriteError::DuplicateDate(record.date));
        }

        let existing = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| DbErr::RecordNotFound(format!("record {}", record.id)))?;
        *existing = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DbErr> {
        self.records.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAccountSettingsRepository {
    settings: Mutex<Vec<AccountSettings>>,
}

#[async_trait]
impl AccountSettingsRepository for InMemoryAccountSettingsRepository {
    async fn get_all(&self) -> Result<Vec<AccountSettings>, DbErr> {
        let mut settings = self.settings.lock().unwrap().clone();
        settings.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        Ok(settings)
    }

    async fn get_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<AccountSettings>, DbErr> {
        Ok(self
            .settings
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.account_number == account_number)
            .cloned())
    }

    async fn upsert(
        &self,
        account_number: &str,
        api_key: &str,
    ) -> Result<AccountSettings, DbErr> {
        let mut settings = self.settings.lock().unwrap();
        let now = Utc::now();
        let account_number = account_number.trim();
        let api_key = api_key.trim();

        if let Some(existing) = settings.iter_mut().find(|s| s.account_number == account_number) {
            existing.api_key = api_key.to_string();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let id = settings.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let created = AccountSettings {
            id,
            account_number: account_number.to_string(),
            api_key: api_key.to_string(),
            created_at: now,
            updated_at: now,
        };
        settings.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryHeatPumpRepository {
    devices: Mutex<Vec<HeatPumpDevice>>,
    snapshots: Mutex<Vec<HeatPumpSnapshot>>,
}

impl InMemoryHeatPumpRepository {
    pub fn add_device(&self, device_id: &str, account_number: &str, is_active: bool) {
        let mut devices = self.devices.lock().unwrap();
        let id = devices.len() as i32 + 1;
        devices.push(HeatPumpDevice {
            id,
            device_id: device_id.to_string(),
            account_number: account_number.to_string(),
            euid: Some(format!("euid-{}", device_id)),
            is_active,
            created_at: Utc::now(),
            last_sync_at: None,
        });
    }
}

#[async_trait]
impl HeatPumpRepository for InMemoryHeatPumpRepository {
    async fn get_active_devices(&self) -> Result<Vec<HeatPumpDevice>, DbErr> {
        let mut devices: Vec<HeatPumpDevice> = self
            .devices
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.is_active)
            .cloned()
            .collect();
        devices.sort_by(|a, b| a.device_id.cmp(&b.device_id));
        Ok(devices)
    }

    async fn get_snapshots(
        &self,
        device_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<HeatPumpSnapshot>, DbErr> {
        let mut snapshots: Vec<HeatPumpSnapshot> = self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.device_id == device_id)
            .filter(|s| s.snapshot_taken_at >= from && s.snapshot_taken_at <= to)
            .cloned()
            .collect();
        snapshots.sort_by_key(|s| s.snapshot_taken_at);
        Ok(snapshots)
    }

    async fn add_snapshot(
        &self,
        device: &HeatPumpDevice,
        payload: Value,
        taken_at: DateTime<Utc>,
    ) -> Result<HeatPumpSnapshot, DbErr> {
        let mut snapshots = self.snapshots.lock().unwrap();
        let snapshot = HeatPumpSnapshot {
            id: snapshots.len() as i32 + 1,
            device_id: device.device_id.clone(),
            account_number: device.account_number.clone(),
            payload,
            snapshot_taken_at: taken_at,
            created_at: taken_at,
        };
        snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn mark_synced(&self, device_id: &str, synced_at: DateTime<Utc>) -> Result<(), DbErr> {
        let mut devices = self.devices.lock().unwrap();
        if let Some(device) = devices.iter_mut().find(|d| d.device_id == device_id) {
            device.last_sync_at = Some(synced_at);
        }
        Ok(())
    }
}

/// Router over the given repositories
pub fn build_router_with(
    efficiency: Arc<InMemoryEfficiencyRepository>,
    heat_pumps: Arc<InMemoryHeatPumpRepository>,
) -> Router {
    build_router(AppState {
        efficiency,
        account_settings: Arc::new(InMemoryAccountSettingsRepository::default()),
        heat_pumps,
    })
}

/// Router backed by fresh in-memory repositories
pub fn build_test_router() -> Router {
    build_router_with(
        Arc::new(InMemoryEfficiencyRepository::default()),
        Arc::new(InMemoryHeatPumpRepository::default()),
    )
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}
