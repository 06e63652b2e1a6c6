// src/lib.rs

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::{
    account_settings::AccountSettingsRepository, efficiency_repository::EfficiencyRepository,
    heat_pump_repository::HeatPumpRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub efficiency: Arc<dyn EfficiencyRepository>,
    pub account_settings: Arc<dyn AccountSettingsRepository>,
    pub heat_pumps: Arc<dyn HeatPumpRepository>,
}

pub mod entities {
    pub mod prelude;
    pub mod heat_pump_devices;
    pub mod heat_pump_efficiency_records;
    pub mod heat_pump_snapshots;
    pub mod octopus_account_settings;
}

pub mod services {
    pub mod hdd;
    pub mod efficiency_analysis;
    pub mod efficiency_repository;
    pub mod account_settings;
    pub mod heat_pump_repository;
    pub mod octopus;
    pub mod heat_pump_snapshot;
}

pub mod config;
pub mod models;
pub mod handlers;
pub mod jobs;

async fn hello_cosy() -> &'static str {
    "Hello from Cosy Analyser Backend!"
}

pub fn build_router(state: AppState) -> Router {
    use handlers::{account_settings, efficiency, heat_pump};

    Router::new()
        .route("/", get(hello_cosy))
        .route(
            "/api/efficiency/records",
            get(efficiency::list_records).post(efficiency::create_record),
        )
        .route(
            "/api/efficiency/records/{id}",
            get(efficiency::get_record)
                .put(efficiency::update_record)
                .delete(efficiency::delete_record),
        )
        .route("/api/efficiency/summary", get(efficiency::get_summary))
        .route("/api/efficiency/comparison", get(efficiency::get_comparison))
        .route("/api/efficiency/groups", get(efficiency::get_groups))
        .route("/api/efficiency/filter", get(efficiency::filter_records))
        .route(
            "/api/settings",
            get(account_settings::list_account_settings)
                .put(account_settings::upsert_account_settings),
        )
        .route(
            "/api/settings/{account_number}",
            get(account_settings::get_account_settings),
        )
        .route("/api/heatpump/devices", get(heat_pump::list_devices))
        .route(
            "/api/heatpump/snapshots/{device_id}",
            get(heat_pump::get_snapshots),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
