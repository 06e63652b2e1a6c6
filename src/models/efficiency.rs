use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::entities::heat_pump_efficiency_records;

pub const MAX_CHANGE_DESCRIPTION_LEN: usize = 500;
pub const MAX_NOTES_LEN: usize = 2000;

/// Largest value a NUMERIC(10,4) electricity column holds
pub const MAX_ELECTRICITY_KWH: Decimal = dec!(999999.9999);
/// Largest magnitude a NUMERIC(6,2) temperature column holds
pub const MAX_ABS_TEMPERATURE_C: Decimal = dec!(9999.99);

/// A raw daily measurement as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: i32,
    pub date: NaiveDate,
    #[serde(rename = "electricityKWh")]
    pub electricity_kwh: Decimal,
    pub outdoor_avg_c: Decimal,
    pub outdoor_high_c: Option<Decimal>,
    pub outdoor_low_c: Option<Decimal>,
    pub indoor_avg_c: Option<Decimal>,
    pub comfort_score: Option<i32>,
    pub change_active: bool,
    pub change_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<heat_pump_efficiency_records::Model> for DailyRecord {
    fn from(model: heat_pump_efficiency_records::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            electricity_kwh: model.electricity_kwh,
            outdoor_avg_c: model.outdoor_avg_c,
            outdoor_high_c: model.outdoor_high_c,
            outdoor_low_c: model.outdoor_low_c,
            indoor_avg_c: model.indoor_avg_c,
            comfort_score: model.comfort_score,
            change_active: model.change_active,
            change_description: model.change_description,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A daily record with its weather-normalised metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: DailyRecord,
    pub heating_degree_days: Decimal,
    /// kWh per heating degree day; `None` on days with no heating demand
    pub normalised_efficiency: Option<Decimal>,
}

/// Body for creating or updating a daily record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyRecordRequest {
    pub date: NaiveDate,
    #[serde(rename = "electricityKWh")]
    pub electricity_kwh: Decimal,
    pub outdoor_avg_c: Decimal,
    #[serde(default)]
    pub outdoor_high_c: Option<Decimal>,
    #[serde(default)]
    pub outdoor_low_c: Option<Decimal>,
    #[serde(default)]
    pub indoor_avg_c: Option<Decimal>,
    #[serde(default)]
    pub comfort_score: Option<i32>,
    #[serde(default)]
    pub change_active: bool,
    #[serde(default)]
    pub change_description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EfficiencyRecordRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.electricity_kwh < Decimal::ZERO {
            return Err("electricityKWh cannot be negative".to_string());
        }
        if self.electricity_kwh > MAX_ELECTRICITY_KWH {
            return Err(format!("electricityKWh cannot exceed {}", MAX_ELECTRICITY_KWH));
        }

        let temperatures = [
            ("outdoorAvgC", Some(self.outdoor_avg_c)),
            ("outdoorHighC", self.outdoor_high_c),
            ("outdoorLowC", self.outdoor_low_c),
            ("indoorAvgC", self.indoor_avg_c),
        ];
        for (field, value) in temperatures {
            if let Some(value) = value {
                if value.abs() > MAX_ABS_TEMPERATURE_C {
                    return Err(format!(
                        "{} must be between -{} and {}",
                        field, MAX_ABS_TEMPERATURE_C, MAX_ABS_TEMPERATURE_C
                    ));
                }
            }
        }

        if let Some(score) = self.comfort_score {
            if !(1..=5).contains(&score) {
                return Err(format!("comfortScore must be between 1 and 5, got {}", score));
            }
        }

        if let (Some(low), Some(high)) = (self.outdoor_low_c, self.outdoor_high_c) {
            if low > high {
                return Err("outdoorLowC cannot exceed outdoorHighC".to_string());
            }
        }

        if let Some(description) = &self.change_description {
            if description.chars().count() > MAX_CHANGE_DESCRIPTION_LEN {
                return Err(format!(
                    "changeDescription cannot exceed {} characters",
                    MAX_CHANGE_DESCRIPTION_LEN
                ));
            }
        }

        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(format!("notes cannot exceed {} characters", MAX_NOTES_LEN));
            }
        }

        Ok(())
    }

    /// Overwrite every raw field of `record` and bump its update timestamp.
    pub fn apply_to(&self, record: &mut DailyRecord, now: DateTime<Utc>) {
        record.date = self.date;
        record.electricity_kwh = self.electricity_kwh;
        record.outdoor_avg_c = self.outdoor_avg_c;
        record.outdoor_high_c = self.outdoor_high_c;
        record.outdoor_low_c = self.outdoor_low_c;
        record.indoor_avg_c = self.indoor_avg_c;
        record.comfort_score = self.comfort_score;
        record.change_active = self.change_active;
        record.change_description = self.change_description.clone();
        record.notes = self.notes.clone();
        record.updated_at = now;
    }
}

/// Aggregate statistics over a set of enriched records.
///
/// Every average is `None` for an empty period. `avg_normalised_efficiency`
/// is also `None` when no day in the period had heating demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub label: String,
    pub record_count: usize,
    #[serde(rename = "avgElectricityKWh")]
    pub avg_electricity_kwh: Option<Decimal>,
    pub avg_outdoor_avg_c: Option<Decimal>,
    #[serde(rename = "avgHDD")]
    pub avg_hdd: Option<Decimal>,
    pub avg_normalised_efficiency: Option<Decimal>,
    /// Records with HDD > 0
    pub analysable_records: usize,
}

/// Baseline vs change-period comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub baseline: PeriodSummary,
    pub change: PeriodSummary,
    pub efficiency_improved: Option<bool>,
    pub efficiency_change_pct: Option<Decimal>,
    pub warnings: Vec<String>,
}

/// Records sharing a change description, with their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeGroup {
    pub change_description: String,
    pub summary: PeriodSummary,
    pub records: Vec<EnrichedRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureFilterQuery {
    pub min_outdoor_c: Decimal,
    pub max_outdoor_c: Decimal,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EfficiencyRecordRequest {
        EfficiencyRecordRequest {
            date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            electricity_kwh: dec!(12.5),
            outdoor_avg_c: dec!(4.0),
            outdoor_high_c: Some(dec!(7.0)),
            outdoor_low_c: Some(dec!(1.0)),
            indoor_avg_c: Some(dec!(20.5)),
            comfort_score: Some(4),
            change_active: false,
            change_description: None,
            notes: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_electricity() {
        let mut req = request();
        req.electricity_kwh = dec!(-0.1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_electricity_beyond_column_range() {
        let mut req = request();
        req.electricity_kwh = dec!(10000000);
        assert!(req.validate().is_err());
        req.electricity_kwh = MAX_ELECTRICITY_KWH;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_temperature_beyond_column_range() {
        let mut req = request();
        req.outdoor_avg_c = dec!(-10000);
        let err = req.validate().unwrap_err();
        assert!(err.contains("outdoorAvgC"));

        let mut req = request();
        req.indoor_avg_c = Some(dec!(12345.6));
        let err = req.validate().unwrap_err();
        assert!(err.contains("indoorAvgC"));
    }

    #[test]
    fn test_validate_rejects_comfort_out_of_range() {
        let mut req = request();
        req.comfort_score = Some(0);
        assert!(req.validate().is_err());
        req.comfort_score = Some(6);
        assert!(req.validate().is_err());
        req.comfort_score = Some(5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_low_above_high() {
        let mut req = request();
        req.outdoor_low_c = Some(dec!(8.0));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_long_description() {
        let mut req = request();
        req.change_description = Some("x".repeat(MAX_CHANGE_DESCRIPTION_LEN + 1));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_deserializes_wire_names() {
        let req: EfficiencyRecordRequest = serde_json::from_str(
            r#"{"date":"2026-01-10","electricityKWh":10.25,"outdoorAvgC":-2,"changeActive":true,"changeDescription":"Lower flow temp"}"#,
        )
        .unwrap();

        assert_eq!(req.electricity_kwh, dec!(10.25));
        assert_eq!(req.outdoor_avg_c, dec!(-2));
        assert!(req.change_active);
        assert_eq!(req.comfort_score, None);
    }
}
