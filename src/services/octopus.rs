//! Octopus Energy GraphQL client.
//!
//! Kraken tokens are cached per API key for slightly less than their
//! one hour lifetime.

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_OCTOPUS_API_URL: &str = "https://api.octopus.energy/v1/graphql/";

const TOKEN_TTL: Duration = Duration::from_secs(55 * 60);

const OBTAIN_TOKEN_MUTATION: &str =
    "mutation ObtainKrakenToken($apiKey: String!) { obtainKrakenToken(input: {APIKey: $apiKey}) { token } }";

/// Controller status, controller configuration, live performance and
/// lifetime performance in a single round trip.
const HEAT_PUMP_STATUS_AND_CONFIG_QUERY: &str = r#"query HeatPumpStatusAndConfig($accountNumber: String!, $euid: ID!) {
  octoHeatPumpControllerStatus(accountNumber: $accountNumber, euid: $euid) {
    sensors { code connectivity { online retrievedAt } telemetry { temperatureInCelsius humidityPercentage retrievedAt } }
    zones { zone telemetry { setpointInCelsius mode relaySwitchedOn heatDemand retrievedAt } }
  }
  octoHeatPumpControllerConfiguration(accountNumber: $accountNumber, euid: $euid) {
    controller { state heatPumpTimezone connected }
    heatPump {
      serialNumber model hardwareVersion maxWaterSetpoint minWaterSetpoint
      heatingFlowTemperature { currentTemperature { value unit } allowableRange { minimum { value unit } maximum { value unit } } }
      weatherCompensation { enabled currentRange { minimum { value unit } maximum { value unit } } }
    }
    zones { configuration { code zoneType enabled displayName primarySensor callForHeat heatDemand emergency } }
  }
  octoHeatPumpLivePerformance(euid: $euid) {
    coefficientOfPerformance outdoorTemperature { value unit } heatOutput { value unit } powerInput { value unit } readAt
  }
  octoHeatPumpLifetimePerformance(euid: $euid) {
    seasonalCoefficientOfPerformance heatOutput { value unit } energyInput { value unit } readAt
  }
}"#;

/// Source of live heat pump telemetry for one controller.
#[async_trait]
pub trait HeatPumpTelemetry: Send + Sync {
    async fn fetch_status_and_config(
        &self,
        api_key: &str,
        account_number: &str,
        euid: &str,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Clone)]
pub struct OctopusClient {
    client: Client,
    base_url: String,
    tokens: Arc<Cache<String, String>>,
}

impl OctopusClient {
    pub fn new(base_url: String) -> Self {
        let tokens = Cache::builder()
            .max_capacity(100)
            .time_to_live(TOKEN_TTL)
            .build();

        Self {
            client: Client::new(),
            base_url,
            tokens: Arc::new(tokens),
        }
    }

    /// Exchange an API key for a Kraken JWT, reusing a cached one if fresh.
    pub async fn obtain_token(
        &self,
        api_key: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(token) = self.tokens.get(api_key).await {
            tracing::debug!("Kraken token cache hit");
            return Ok(token);
        }

        tracing::info!("Requesting new Kraken token");

        let body = json!({
            "query": OBTAIN_TOKEN_MUTATION,
            "variables": { "apiKey": api_key },
        });

        let response = self.client.post(&self.base_url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Octopus token request failed {}: {}", status, error_text).into());
        }

        let data = extract_data(response.json().await?)?;
        let token = data
            .pointer("/obtainKrakenToken/token")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .ok_or("Octopus API token was empty")?
            .to_string();

        self.tokens.insert(api_key.to_string(), token.clone()).await;

        Ok(token)
    }

    /// Fetch live status, configuration and performance for one controller.
    ///
    /// Returns the GraphQL `data` object untouched.
    pub async fn get_heat_pump_status_and_config(
        &self,
        api_key: &str,
        account_number: &str,
        euid: &str,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let variables = json!({
            "accountNumber": account_number,
            "euid": euid,
        });

        self.execute_query(api_key, HEAT_PUMP_STATUS_AND_CONFIG_QUERY, variables)
            .await
    }

    async fn execute_query(
        &self,
        api_key: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let token = self.obtain_token(api_key).await?;

        let response = self
            .client
            .post(&self.base_url)
            .header("accept", "application/json")
            .header("Authorization", format!("JWT {}", token))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Octopus API returned {}: {}", status, error_text).into());
        }

        extract_data(response.json().await?)
    }
}

#[async_trait]
impl HeatPumpTelemetry for OctopusClient {
    async fn fetch_status_and_config(
        &self,
        api_key: &str,
        account_number: &str,
        euid: &str,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.get_heat_pump_status_and_config(api_key, account_number, euid)
            .await
    }
}

/// Pull `data` out of a GraphQL response, failing on a non-empty `errors`.
fn extract_data(body: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            return Err(format!("Octopus GraphQL errors: {}", messages.join("; ")).into());
        }
    }

    match body.get("data") {
        Some(data) if !data.is_null() => Ok(data.clone()),
        _ => Err("Octopus response had no data".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_data_returns_data_object() {
        let body = json!({ "data": { "obtainKrakenToken": { "token": "abc" } } });
        let data = extract_data(body).unwrap();
        assert_eq!(data["obtainKrakenToken"]["token"], "abc");
    }

    #[test]
    fn test_extract_data_surfaces_graphql_errors() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "Invalid API key" }, { "message": "Try again" }]
        });
        let err = extract_data(body).unwrap_err();
        assert_eq!(err.to_string(), "Octopus GraphQL errors: Invalid API key; Try again");
    }

    #[test]
    fn test_extract_data_ignores_empty_errors() {
        let body = json!({ "data": { "ok": true }, "errors": [] });
        assert!(extract_data(body).is_ok());
    }

    #[test]
    fn test_extract_data_missing_data() {
        assert!(extract_data(json!({})).is_err());
        assert!(extract_data(json!({ "data": null })).is_err());
    }

    #[test]
    fn test_query_uses_variables() {
        assert!(HEAT_PUMP_STATUS_AND_CONFIG_QUERY.contains("$accountNumber"));
        assert!(HEAT_PUMP_STATUS_AND_CONFIG_QUERY.contains("$euid"));
        assert!(OBTAIN_TOKEN_MUTATION.contains("$apiKey"));
    }
}
