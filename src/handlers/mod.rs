pub mod account_settings;
pub mod efficiency;
pub mod heat_pump;

use axum::{http::StatusCode, Json};
use sea_orm::DbErr;

use crate::models::error::ErrorResponse;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn database_error(e: DbErr) -> ApiError {
    tracing::error!(error = %e, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("Database error: {}", e))),
    )
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}
