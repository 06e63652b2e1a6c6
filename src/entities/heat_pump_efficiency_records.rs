//! `SeaORM` Entity for heat_pump_efficiency_records table
//!
//! One row per calendar day of measured heat pump usage. Derived metrics
//! (HDD, normalised efficiency) are never stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "heat_pump_efficiency_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub date: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 4)))")]
    pub electricity_kwh: Decimal,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub outdoor_avg_c: Decimal,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub outdoor_high_c: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub outdoor_low_c: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub indoor_avg_c: Option<Decimal>,
    /// Subjective comfort, 1-5
    pub comfort_score: Option<i32>,
    pub change_active: bool,
    pub change_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
