//! Storage for Octopus account credentials.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Order, QueryFilter, QueryOrder, Set,
};

use crate::entities::{octopus_account_settings, prelude::OctopusAccountSettings};
use crate::models::account_settings::AccountSettings;

#[async_trait]
pub trait AccountSettingsRepository: Send + Sync {
    /// All settings, ordered by account number.
    async fn get_all(&self) -> Result<Vec<AccountSettings>, DbErr>;

    async fn get_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<AccountSettings>, DbErr>;

    /// Insert or replace the API key for an account. Inputs are trimmed.
    async fn upsert(&self, account_number: &str, api_key: &str)
        -> Result<AccountSettings, DbErr>;
}

#[derive(Clone)]
pub struct SeaOrmAccountSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountSettingsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountSettingsRepository for SeaOrmAccountSettingsRepository {
    async fn get_all(&self) -> Result<Vec<AccountSettings>, DbErr> {
        let settings = OctopusAccountSettings::find()
            .order_by(octopus_account_settings::Column::AccountNumber, Order::Asc)
            .all(&self.db)
            .await?;
        Ok(settings.into_iter().map(AccountSettings::from).collect())
    }

    async fn get_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<AccountSettings>, DbErr> {
        let settings = OctopusAccountSettings::find()
            .filter(octopus_account_settings::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await?;
        Ok(settings.map(AccountSettings::from))
    }

    async fn upsert(
        &self,
        account_number: &str,
        api_key: &str,
    ) -> Result<AccountSettings, DbErr> {
        let account_number = account_number.trim();
        let api_key = api_key.trim();
        let now = Utc::now();

        let existing = OctopusAccountSettings::find()
            .filter(octopus_account_settings::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await?;

        let saved = if let Some(existing) = existing {
            let mut active_model = existing.into_active_model();
            active_model.api_key = Set(api_key.to_string());
            active_model.updated_at = Set(now);
            let updated = active_model.update(&self.db).await?;
            tracing::info!(account_number = %account_number, "Updated account settings");
            updated
        } else {
            let new_settings = octopus_account_settings::ActiveModel {
                account_number: Set(account_number.to_string()),
                api_key: Set(api_key.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            let inserted = new_settings.insert(&self.db).await?;
            tracing::info!(account_number = %account_number, "Created account settings");
            inserted
        };

        Ok(saved.into())
    }
}
