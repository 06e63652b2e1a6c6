//! Efficiency Handlers
//!
//! CRUD for daily records under `/api/efficiency/records`, plus the
//! summary, comparison, grouping and temperature filter reports. Records
//! are enriched with HDD metrics on every read.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::handlers::{database_error, error_response, ApiError};
use crate::models::efficiency::{
    ChangeGroup, ComparisonResult, DateRangeQuery, EfficiencyRecordRequest, EnrichedRecord,
    PeriodSummary, TemperatureFilterQuery,
};
use crate::services::efficiency_analysis;
use crate::services::efficiency_repository::RecordWriteError;
use crate::services::hdd::to_enriched;
use crate::AppState;

pub const ALL_RECORDS_LABEL: &str = "All Records";

async fn load_enriched(
    state: &AppState,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<EnrichedRecord>, ApiError> {
    let records = state
        .efficiency
        .get_records(from, to)
        .await
        .map_err(database_error)?;

    Ok(records.iter().map(to_enriched).collect())
}

fn conflict(date: NaiveDate) -> ApiError {
    error_response(
        StatusCode::CONFLICT,
        format!("A record already exists for {}.", date),
    )
}

fn write_error(e: RecordWriteError) -> ApiError {
    match e {
        RecordWriteError::DuplicateDate(date) => conflict(date),
        RecordWriteError::Database(e) => database_error(e),
    }
}

fn not_found(id: i32) -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Efficiency record {} not found", id),
    )
}

/// GET /api/efficiency/records?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<EnrichedRecord>>, ApiError> {
    let records = load_enriched(&state, query.from, query.to).await?;
    Ok(Json(records))
}

/// GET /api/efficiency/records/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EnrichedRecord>, ApiError> {
    let record = state
        .efficiency
        .get_by_id(id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(to_enriched(&record)))
}

/// POST /api/efficiency/records
pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<EfficiencyRecordRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<EnrichedRecord>), ApiError> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "Invalid efficiency record");
        return Err(error_response(StatusCode::BAD_REQUEST, e));
    }

    let taken = state
        .efficiency
        .exists_for_date(payload.date, None)
        .await
        .map_err(database_error)?;
    if taken {
        return Err(conflict(payload.date));
    }

    let record = state
        .efficiency
        .add(&payload)
        .await
        .map_err(write_error)?;

    let location = format!("/api/efficiency/records/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_enriched(&record)),
    ))
}

/// PUT /api/efficiency/records/{id}
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<EfficiencyRecordRequest>,
) -> Result<Json<EnrichedRecord>, ApiError> {
    if let Err(e) = payload.validate() {
        warn!(id = id, error = %e, "Invalid efficiency record update");
        return Err(error_response(StatusCode::BAD_REQUEST, e));
    }

    let mut record = state
        .efficiency
        .get_by_id(id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found(id))?;

    if record.date != payload.date {
        let taken = state
            .efficiency
            .exists_for_date(payload.date, Some(id))
            .await
            .map_err(database_error)?;
        if taken {
            return Err(conflict(payload.date));
        }
    }

    payload.apply_to(&mut record, Utc::now());

    let saved = state
        .efficiency
        .save(&record)
        .await
        .map_err(write_error)?;

    Ok(Json(to_enriched(&saved)))
}

/// DELETE /api/efficiency/records/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .efficiency
        .get_by_id(id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found(id))?;

    state
        .efficiency
        .delete(id)
        .await
        .map_err(database_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/efficiency/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<PeriodSummary>, ApiError> {
    let records = load_enriched(&state, query.from, query.to).await?;
    Ok(Json(efficiency_analysis::summarise(ALL_RECORDS_LABEL, &records)))
}

/// GET /api/efficiency/comparison
///
/// Baseline is every record with `changeActive = false`, the change period
/// every record with `changeActive = true`.
pub async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let records = load_enriched(&state, query.from, query.to).await?;
    let (baseline, change) = efficiency_analysis::split_by_change_active(records);

    let result = efficiency_analysis::compare(&baseline, &change);

    info!(
        baseline = baseline.len(),
        change = change.len(),
        improved = ?result.efficiency_improved,
        "Efficiency comparison returned"
    );

    Ok(Json(result))
}

/// GET /api/efficiency/groups
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<ChangeGroup>>, ApiError> {
    let records = load_enriched(&state, query.from, query.to).await?;
    Ok(Json(efficiency_analysis::group_by_change(&records)))
}

/// GET /api/efficiency/filter?minOutdoorC=..&maxOutdoorC=..
pub async fn filter_records(
    State(state): State<AppState>,
    Query(query): Query<TemperatureFilterQuery>,
) -> Result<Json<Vec<EnrichedRecord>>, ApiError> {
    let records = load_enriched(&state, query.from, query.to).await?;
    Ok(Json(efficiency_analysis::filter_by_temperature_range(
        &records,
        query.min_outdoor_c,
        query.max_outdoor_c,
    )))
}
