use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, Utc};

use crate::handlers::{database_error, ApiError};
use crate::models::heat_pump::{
    HeatPumpDevice, SnapshotRangeQuery, SnapshotsResponse, DEFAULT_SNAPSHOT_WINDOW_DAYS,
};
use crate::AppState;

/// GET /api/heatpump/devices
pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeatPumpDevice>>, ApiError> {
    let devices = state
        .heat_pumps
        .get_active_devices()
        .await
        .map_err(database_error)?;

    Ok(Json(devices))
}

/// GET /api/heatpump/snapshots/{device_id}?from=..&to=..
///
/// `from` defaults to seven days ago and `to` to now. Bounds are RFC 3339
/// timestamps; an inverted range returns no snapshots.
pub async fn get_snapshots(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(query): Query<SnapshotRangeQuery>,
) -> Result<Json<SnapshotsResponse>, ApiError> {
    let now = Utc::now();
    let from = query
        .from
        .unwrap_or_else(|| now - Duration::days(DEFAULT_SNAPSHOT_WINDOW_DAYS));
    let to = query.to.unwrap_or(now);

    let snapshots = state
        .heat_pumps
        .get_snapshots(&device_id, from, to)
        .await
        .map_err(database_error)?;

    Ok(Json(SnapshotsResponse {
        device_id,
        from,
        to,
        count: snapshots.len(),
        snapshots,
    }))
}
