//! Storage for daily efficiency records.

use std::fmt;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::entities::{heat_pump_efficiency_records, prelude::HeatPumpEfficiencyRecords};
use crate::models::efficiency::{DailyRecord, EfficiencyRecordRequest};

/// Failure writing a daily record.
#[derive(Debug)]
pub enum RecordWriteError {
    /// Another record already holds this date
    DuplicateDate(NaiveDate),
    Database(DbErr),
}

impl RecordWriteError {
    /// Classify a failed insert or update of the record for `date`.
    pub fn from_db(e: DbErr, date: NaiveDate) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RecordWriteError::DuplicateDate(date),
            _ => RecordWriteError::Database(e),
        }
    }
}

impl fmt::Display for RecordWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordWriteError::DuplicateDate(date) => {
                write!(f, "A record already exists for {}.", date)
            }
            RecordWriteError::Database(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RecordWriteError {}

impl From<DbErr> for RecordWriteError {
    fn from(e: DbErr) -> Self {
        RecordWriteError::Database(e)
    }
}

#[async_trait]
pub trait EfficiencyRepository: Send + Sync {
    /// Records within the inclusive date bounds, ordered by date ascending.
    async fn get_records(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyRecord>, DbErr>;

    async fn get_by_id(&self, id: i32) -> Result<Option<DailyRecord>, DbErr>;

    /// Whether any record other than `exclude_id` holds `date`.
    async fn exists_for_date(&self, date: NaiveDate, exclude_id: Option<i32>)
        -> Result<bool, DbErr>;

    /// A date already held by another row fails with `DuplicateDate`.
    async fn add(&self, request: &EfficiencyRecordRequest)
        -> Result<DailyRecord, RecordWriteError>;

    /// Persist every raw field of an existing record.
    async fn save(&self, record: &DailyRecord) -> Result<DailyRecord, RecordWriteError>;

    async fn delete(&self, id: i32) -> Result<(), DbErr>;
}

#[derive(Clone)]
pub struct SeaOrmEfficiencyRepository {
    db: DatabaseConnection,
}

impl SeaOrmEfficiencyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EfficiencyRepository for SeaOrmEfficiencyRepository {
    async fn get_records(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyRecord>, DbErr> {
        let mut query = HeatPumpEfficiencyRecords::find();

        if let Some(from) = from {
            query = query.filter(heat_pump_efficiency_records::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(heat_pump_efficiency_records::Column::Date.lte(to));
        }

        let records = query
            .order_by_asc(heat_pump_efficiency_records::Column::Date)
            .all(&self.db)
            .await?;

        tracing::debug!(
            count = records.len(),
            from = ?from,
            to = ?to,
            "Loaded efficiency records"
        );

        Ok(records.into_iter().map(DailyRecord::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<DailyRecord>, DbErr> {
        let record = HeatPumpEfficiencyRecords::find_by_id(id)
            .one(&self.db)
            .await?;
        Ok(record.map(DailyRecord::from))
    }

    async fn exists_for_date(
        &self,
        date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = HeatPumpEfficiencyRecords::find()
            .filter(heat_pump_efficiency_records::Column::Date.eq(date));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(heat_pump_efficiency_records::Column::Id.ne(exclude_id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn add(
        &self,
        request: &EfficiencyRecordRequest,
    ) -> Result<DailyRecord, RecordWriteError> {
        let now = Utc::now();

        let new_record = heat_pump_efficiency_records::ActiveModel {
            date: Set(request.date),
            electricity_kwh: Set(request.electricity_kwh),
            outdoor_avg_c: Set(request.outdoor_avg_c),
            outdoor_high_c: Set(request.outdoor_high_c),
            outdoor_low_c: Set(request.outdoor_low_c),
            indoor_avg_c: Set(request.indoor_avg_c),
            comfort_score: Set(request.comfort_score),
            change_active: Set(request.change_active),
            change_description: Set(request.change_description.clone()),
            notes: Set(request.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = new_record
            .insert(&self.db)
            .await
            .map_err(|e| RecordWriteError::from_db(e, request.date))?;
        tracing::info!(id = inserted.id, date = %inserted.date, "Created efficiency record");

        Ok(inserted.into())
    }

    async fn save(&self, record: &DailyRecord) -> Result<DailyRecord, RecordWriteError> {
        let active_model = heat_pump_efficiency_records::ActiveModel {
            id: Unchanged(record.id),
            date: Set(record.date),
            electricity_kwh: Set(record.electricity_kwh),
            outdoor_avg_c: Set(record.outdoor_avg_c),
            outdoor_high_c: Set(record.outdoor_high_c),
            outdoor_low_c: Set(record.outdoor_low_c),
            indoor_avg_c: Set(record.indoor_avg_c),
            comfort_score: Set(record.comfort_score),
            change_active: Set(record.change_active),
            change_description: Set(record.change_description.clone()),
            notes: Set(record.notes.clone()),
            created_at: Unchanged(record.created_at),
            updated_at: Set(record.updated_at),
        };

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| RecordWriteError::from_db(e, record.date))?;
        tracing::info!(id = updated.id, date = %updated.date, "Updated efficiency record");

        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DbErr> {
        let result = HeatPumpEfficiencyRecords::delete_by_id(id)
            .exec(&self.db)
            .await?;
        tracing::info!(id = id, rows = result.rows_affected, "Deleted efficiency record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_stay_database_errors() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let err = RecordWriteError::from_db(DbErr::Custom("timeout".to_string()), date);
        assert!(matches!(err, RecordWriteError::Database(_)));
    }

    #[test]
    fn test_duplicate_date_message() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let err = RecordWriteError::DuplicateDate(date);
        assert_eq!(err.to_string(), "A record already exists for 2026-01-10.");
    }
}
