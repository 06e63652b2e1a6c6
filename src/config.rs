//! Runtime configuration, read from the environment (and `.env` via dotenvy).

use std::env;

use crate::jobs::heat_pump_snapshot_sync::DEFAULT_SNAPSHOT_INTERVAL_SECS;
use crate::services::octopus::DEFAULT_OCTOPUS_API_URL;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

const ENV_DATABASE_URL: &str = "DATABASE_URL";
const ENV_BIND_ADDR: &str = "BIND_ADDR";
const ENV_OCTOPUS_API_URL: &str = "OCTOPUS_API_URL";
const ENV_SNAPSHOT_INTERVAL: &str = "HEAT_PUMP_SNAPSHOT_INTERVAL_SECS";
const ENV_SNAPSHOT_ENABLED: &str = "HEAT_PUMP_SNAPSHOT_ENABLED";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub octopus_api_url: String,
    pub snapshot_interval_secs: u64,
    pub snapshot_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(ENV_DATABASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| format!("{} must be set", ENV_DATABASE_URL))?;

        let bind_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let octopus_api_url =
            lookup(ENV_OCTOPUS_API_URL).unwrap_or_else(|| DEFAULT_OCTOPUS_API_URL.to_string());

        let snapshot_interval_secs = match lookup(ENV_SNAPSHOT_INTERVAL) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| format!("Invalid {}: {}", ENV_SNAPSHOT_INTERVAL, raw))?,
            None => DEFAULT_SNAPSHOT_INTERVAL_SECS,
        };

        let snapshot_enabled = lookup(ENV_SNAPSHOT_ENABLED)
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            bind_addr,
            octopus_api_url,
            snapshot_interval_secs,
            snapshot_enabled,
        })
    }
}
