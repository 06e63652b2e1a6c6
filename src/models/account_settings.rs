use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::octopus_account_settings;

/// Octopus API credentials for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSettings {
    pub id: i32,
    pub account_number: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<octopus_account_settings::Model> for AccountSettings {
    fn from(model: octopus_account_settings::Model) -> Self {
        Self {
            id: model.id,
            account_number: model.account_number,
            api_key: model.api_key,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettingsResponse {
    pub id: i32,
    pub account_number: String,
    pub api_key_hint: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AccountSettings> for AccountSettingsResponse {
    fn from(settings: &AccountSettings) -> Self {
        Self {
            id: settings.id,
            account_number: settings.account_number.clone(),
            api_key_hint: mask_api_key(&settings.api_key),
            created_at: settings.created_at,
            updated_at: settings.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAccountSettingsRequest {
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub api_key: String,
}

impl UpsertAccountSettingsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.account_number.trim().is_empty() {
            return Err("Account number is required".to_string());
        }
        if self.api_key.trim().is_empty() {
            return Err("API key is required".to_string());
        }
        Ok(())
    }
}

/// Keep only the last four characters visible.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
