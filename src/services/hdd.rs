//! Heating degree days and weather-normalised efficiency.
//!
//! HDD = max(0, 15.5°C - outdoor average). Normalised efficiency is
//! kWh / HDD and is undefined on days with no heating demand.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::efficiency::{DailyRecord, EnrichedRecord};

/// Comfort baseline for heating degree days (°C)
pub const BASE_TEMPERATURE_C: Decimal = dec!(15.5);

pub fn compute_hdd(outdoor_avg_c: Decimal) -> Decimal {
    (BASE_TEMPERATURE_C - outdoor_avg_c).max(Decimal::ZERO)
}

/// kWh per degree day, or `None` when there was no heating demand.
pub fn compute_normalised_efficiency(electricity_kwh: Decimal, hdd: Decimal) -> Option<Decimal> {
    if hdd > Decimal::ZERO {
        Some(electricity_kwh / hdd)
    } else {
        None
    }
}

pub fn to_enriched(record: &DailyRecord) -> EnrichedRecord {
    let hdd = compute_hdd(record.outdoor_avg_c);
    EnrichedRecord {
        record: record.clone(),
        heating_degree_days: hdd,
        normalised_efficiency: compute_normalised_efficiency(record.electricity_kwh, hdd),
    }
}
