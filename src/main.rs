use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cosy_analyser_backend::{
    build_router,
    config::Config,
    jobs::heat_pump_snapshot_sync::start_heat_pump_snapshot_job,
    services::{
        account_settings::{AccountSettingsRepository, SeaOrmAccountSettingsRepository},
        efficiency_repository::SeaOrmEfficiencyRepository,
        heat_pump_repository::{HeatPumpRepository, SeaOrmHeatPumpRepository},
        heat_pump_snapshot::HeatPumpSnapshotService,
        octopus::OctopusClient,
    },
    AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cosy_analyser_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let account_settings: Arc<dyn AccountSettingsRepository> =
        Arc::new(SeaOrmAccountSettingsRepository::new(db.clone()));
    let heat_pumps: Arc<dyn HeatPumpRepository> =
        Arc::new(SeaOrmHeatPumpRepository::new(db.clone()));

    if config.snapshot_enabled {
        let octopus = OctopusClient::new(config.octopus_api_url.clone());
        let snapshots = HeatPumpSnapshotService::new(
            heat_pumps.clone(),
            Arc::new(octopus),
            account_settings.clone(),
        );
        start_heat_pump_snapshot_job(snapshots, config.snapshot_interval_secs).await;
    } else {
        tracing::info!("Heat pump snapshot job disabled");
    }

    let state = AppState {
        efficiency: Arc::new(SeaOrmEfficiencyRepository::new(db)),
        account_settings,
        heat_pumps,
    };

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(addr = %config.bind_addr, "Server listening");

    axum::serve(listener, app).await.expect("Server error");
}
