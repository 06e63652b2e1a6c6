use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::handlers::{database_error, error_response, ApiError};
use crate::models::account_settings::{AccountSettingsResponse, UpsertAccountSettingsRequest};
use crate::AppState;

/// GET /api/settings
pub async fn list_account_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountSettingsResponse>>, ApiError> {
    let settings = state
        .account_settings
        .get_all()
        .await
        .map_err(database_error)?;

    Ok(Json(settings.iter().map(AccountSettingsResponse::from).collect()))
}

/// GET /api/settings/{account_number}
pub async fn get_account_settings(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<AccountSettingsResponse>, ApiError> {
    let settings = state
        .account_settings
        .get_by_account_number(&account_number)
        .await
        .map_err(database_error)?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Account settings not found"))?;

    Ok(Json(AccountSettingsResponse::from(&settings)))
}

/// PUT /api/settings
pub async fn upsert_account_settings(
    State(state): State<AppState>,
    Json(payload): Json<UpsertAccountSettingsRequest>,
) -> Result<Json<AccountSettingsResponse>, ApiError> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "Invalid account settings");
        return Err(error_response(StatusCode::BAD_REQUEST, e));
    }

    let settings = state
        .account_settings
        .upsert(&payload.account_number, &payload.api_key)
        .await
        .map_err(database_error)?;

    Ok(Json(AccountSettingsResponse::from(&settings)))
}
