mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use cosy_analyser_backend::services::heat_pump_repository::HeatPumpRepository;
use serde_json::json;

use crate::common::{
    build_router_with, get_json, InMemoryEfficiencyRepository, InMemoryHeatPumpRepository,
};

fn router(heat_pumps: Arc<InMemoryHeatPumpRepository>) -> axum::Router {
    build_router_with(Arc::new(InMemoryEfficiencyRepository::default()), heat_pumps)
}

#[tokio::test]
async fn test_list_devices_returns_active_only() {
    let heat_pumps = Arc::new(InMemoryHeatPumpRepository::default());
    heat_pumps.add_device("hp-2", "A-1234ABCD", true);
    heat_pumps.add_device("hp-retired", "A-1234ABCD", false);
    heat_pumps.add_device("hp-1", "A-1234ABCD", true);
    let app = router(heat_pumps);

    let (status, json) = get_json(&app, "/api/heatpump/devices").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["deviceId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["hp-1", "hp-2"]);
}

#[tokio::test]
async fn test_snapshots_default_to_last_seven_days() {
    let heat_pumps = Arc::new(InMemoryHeatPumpRepository::default());
    heat_pumps.add_device("hp-1", "A-1234ABCD", true);
    let device = heat_pumps.get_active_devices().await.unwrap().remove(0);

    let now = Utc::now();
    for (hours_ago, label) in [(1, "newest"), (30 * 24, "stale"), (48, "older")] {
        heat_pumps
            .add_snapshot(&device, json!({ "label": label }), now - Duration::hours(hours_ago))
            .await
            .unwrap();
    }
    let app = router(heat_pumps);

    let (status, json) = get_json(&app, "/api/heatpump/snapshots/hp-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deviceId"], "hp-1");
    assert_eq!(json["count"], 2);
    assert!(json.get("from").is_some());
    assert!(json.get("to").is_some());

    let labels: Vec<&str> = json["snapshots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["payload"]["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["older", "newest"]);
}

#[tokio::test]
async fn test_snapshots_honour_explicit_range() {
    let heat_pumps = Arc::new(InMemoryHeatPumpRepository::default());
    heat_pumps.add_device("hp-1", "A-1234ABCD", true);
    let device = heat_pumps.get_active_devices().await.unwrap().remove(0);

    let base = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
    for hour in 0..4 {
        heat_pumps
            .add_snapshot(&device, json!({ "hour": hour }), base + Duration::hours(hour))
            .await
            .unwrap();
    }
    let app = router(heat_pumps);

    let (status, json) = get_json(
        &app,
        "/api/heatpump/snapshots/hp-1?from=2026-01-10T01:00:00Z&to=2026-01-10T02:00:00Z",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["snapshots"][0]["payload"]["hour"], 1);
    assert_eq!(json["snapshots"][1]["payload"]["hour"], 2);
}

#[tokio::test]
async fn test_snapshots_for_unknown_device_are_empty() {
    let app = router(Arc::new(InMemoryHeatPumpRepository::default()));

    let (status, json) = get_json(&app, "/api/heatpump/snapshots/nope").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert!(json["snapshots"].as_array().unwrap().is_empty());
}
