//! Period analysis over enriched daily records.
//!
//! Days with HDD = 0 count towards the plain averages (they are real mild
//! days) but are excluded from the normalised efficiency average.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::models::efficiency::{ChangeGroup, ComparisonResult, EnrichedRecord, PeriodSummary};

pub const BASELINE_LABEL: &str = "Baseline";
pub const CHANGE_LABEL: &str = "Change Period";
pub const NO_CHANGE_LABEL: &str = "(no change)";

/// Below this many analysable days a period is flagged as unreliable
pub const MIN_ANALYSABLE_RECORDS: usize = 3;

/// Outdoor average divergence (°C) beyond which HDD normalisation is suspect
pub const MAX_OUTDOOR_DIVERGENCE_C: Decimal = dec!(3.0);

/// Grouping key for change descriptions.
///
/// Undescribed records only become `"(no change)"` when rendered, so a real
/// description with that text never merges into the undescribed group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Described(String),
    Undescribed,
}

impl GroupKey {
    pub fn from_description(description: Option<&str>) -> Self {
        match description {
            Some(d) if !d.trim().is_empty() => GroupKey::Described(d.to_string()),
            _ => GroupKey::Undescribed,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GroupKey::Described(d) => d,
            GroupKey::Undescribed => NO_CHANGE_LABEL,
        }
    }
}

fn mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}

pub fn summarise(label: &str, records: &[EnrichedRecord]) -> PeriodSummary {
    if records.is_empty() {
        return PeriodSummary {
            label: label.to_string(),
            record_count: 0,
            avg_electricity_kwh: None,
            avg_outdoor_avg_c: None,
            avg_hdd: None,
            avg_normalised_efficiency: None,
            analysable_records: 0,
        };
    }

    let analysable: Vec<Decimal> = records
        .iter()
        .filter(|r| r.heating_degree_days > Decimal::ZERO)
        .filter_map(|r| r.normalised_efficiency)
        .collect();

    PeriodSummary {
        label: label.to_string(),
        record_count: records.len(),
        avg_electricity_kwh: mean(records.iter().map(|r| r.record.electricity_kwh)),
        avg_outdoor_avg_c: mean(records.iter().map(|r| r.record.outdoor_avg_c)),
        avg_hdd: mean(records.iter().map(|r| r.heating_degree_days)),
        analysable_records: analysable.len(),
        avg_normalised_efficiency: mean(analysable),
    }
}

/// Split records into (baseline, change period) on the `change_active` flag.
pub fn split_by_change_active(
    records: Vec<EnrichedRecord>,
) -> (Vec<EnrichedRecord>, Vec<EnrichedRecord>) {
    let (change, baseline): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|r| r.record.change_active);
    (baseline, change)
}

pub fn compare(baseline: &[EnrichedRecord], change: &[EnrichedRecord]) -> ComparisonResult {
    let baseline_summary = summarise(BASELINE_LABEL, baseline);
    let change_summary = summarise(CHANGE_LABEL, change);

    let mut warnings = Vec::new();
    let mut improved = None;
    let mut change_pct = None;

    if baseline_summary.analysable_records < MIN_ANALYSABLE_RECORDS {
        warnings.push(format!(
            "Baseline has fewer than {} analysable days (HDD > 0). Results may be unreliable.",
            MIN_ANALYSABLE_RECORDS
        ));
    }

    if change_summary.analysable_records < MIN_ANALYSABLE_RECORDS {
        warnings.push(format!(
            "Change period has fewer than {} analysable days (HDD > 0). Results may be unreliable.",
            MIN_ANALYSABLE_RECORDS
        ));
    }

    match (
        baseline_summary.avg_normalised_efficiency,
        change_summary.avg_normalised_efficiency,
    ) {
        (Some(base_eff), Some(change_eff)) => {
            // Lower kWh/HDD is more efficient
            improved = Some(change_eff < base_eff);

            if !base_eff.is_zero() {
                // round_dp is banker's rounding
                change_pct = Some(((change_eff - base_eff) / base_eff * dec!(100)).round_dp(2));
            }

            if let (Some(base_outdoor), Some(change_outdoor)) = (
                baseline_summary.avg_outdoor_avg_c,
                change_summary.avg_outdoor_avg_c,
            ) {
                let outdoor_diff = (base_outdoor - change_outdoor).abs();
                if outdoor_diff > MAX_OUTDOOR_DIVERGENCE_C {
                    warnings.push(format!(
                        "Average outdoor temperature differs by {}°C between periods. HDD normalisation may not fully compensate.",
                        format_one_dp(outdoor_diff)
                    ));
                }
            }
        }
        _ => {
            warnings.push("Insufficient data to compare efficiency between periods.".to_string());
        }
    }

    tracing::debug!(
        baseline_records = baseline_summary.record_count,
        change_records = change_summary.record_count,
        improved = ?improved,
        change_pct = ?change_pct,
        warnings = warnings.len(),
        "Compared efficiency periods"
    );

    ComparisonResult {
        baseline: baseline_summary,
        change: change_summary,
        efficiency_improved: improved,
        efficiency_change_pct: change_pct,
        warnings,
    }
}

fn format_one_dp(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded.to_string()
}

/// Partition records by change description, in first-seen order.
pub fn group_by_change(records: &[EnrichedRecord]) -> Vec<ChangeGroup> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut buckets: Vec<(GroupKey, Vec<EnrichedRecord>)> = Vec::new();

    for record in records {
        let key = GroupKey::from_description(record.record.change_description.as_deref());
        match index.get(&key) {
            Some(&i) => buckets[i].1.push(record.clone()),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![record.clone()]));
            }
        }
    }

    buckets
        .into_iter()
        .map(|(key, members)| {
            let label = key.label().to_string();
            ChangeGroup {
                summary: summarise(&label, &members),
                change_description: label,
                records: members,
            }
        })
        .collect()
}

/// Records whose outdoor average lies within `[min_c, max_c]`.
///
/// An inverted range matches nothing.
pub fn filter_by_temperature_range(
    records: &[EnrichedRecord],
    min_c: Decimal,
    max_c: Decimal,
) -> Vec<EnrichedRecord> {
    records
        .iter()
        .filter(|r| r.record.outdoor_avg_c >= min_c && r.record.outdoor_avg_c <= max_c)
        .cloned()
        .collect()
}
