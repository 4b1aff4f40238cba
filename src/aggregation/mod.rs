//! Absence hour aggregation.
//!
//! Folds a snapshot of absence records into per-type totals grouped three
//! ways (all time, by month, by year) and derives the display metrics the
//! summary views need. Everything here is pure: no I/O, no shared state,
//! and the result is rebuilt from scratch for every snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::{AbsenceRecord, AbsenceStatus};

pub mod keys;
pub mod metrics;

pub use keys::{MonthKey, ParseKeyError, YearKey};
pub use metrics::{
    DerivedMetrics, HOURS_PER_WORKDAY, compute_derived_metrics, hours_to_days, round_to,
};

/// Hours per absence type id.
pub type TypeHours = BTreeMap<String, f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub total: TypeHours,
    pub by_month: BTreeMap<MonthKey, TypeHours>,
    pub by_year: BTreeMap<YearKey, TypeHours>,
}

impl AggregationResult {
    /// Years newest first, as the summary tables list them.
    pub fn years_descending(&self) -> Vec<(YearKey, &TypeHours)> {
        self.by_year.iter().rev().map(|(k, v)| (*k, v)).collect()
    }

    /// Months in calendar order.
    pub fn months_chronological(&self) -> Vec<(MonthKey, &TypeHours)> {
        self.by_month.iter().map(|(k, v)| (*k, v)).collect()
    }
}

/// Groups approved records by absence type, month and year.
///
/// Records with any other status are skipped. Two records for the same
/// employee and day are both counted; uniqueness is the store's job.
pub fn aggregate(records: &[AbsenceRecord]) -> AggregationResult {
    records
        .iter()
        .filter(|record| record.status == AbsenceStatus::Approved)
        .fold(AggregationResult::default(), |mut acc, record| {
            let month = MonthKey::of(record.date);
            let year = month.year_key();
            let type_id = &record.absence_type_id;

            add_hours(&mut acc.total, type_id, record.hours);
            add_hours(acc.by_month.entry(month).or_default(), type_id, record.hours);
            add_hours(acc.by_year.entry(year).or_default(), type_id, record.hours);
            acc
        })
}

fn add_hours(bucket: &mut TypeHours, type_id: &str, hours: f64) {
    *bucket.entry(type_id.to_string()).or_insert(0.0) += hours;
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid period '{0}', expected one of: month, year, all")]
pub struct ParsePeriodError(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
    All,
}

impl Period {
    pub fn label(&self, reference_date: NaiveDate) -> String {
        match self {
            Period::Month => MonthKey::of(reference_date).to_string(),
            Period::Year => YearKey::of(reference_date).to_string(),
            Period::All => "all time".to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        })
    }
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// Slices an aggregation down to one period around `reference_date`.
///
/// A period with no records yields an empty map, never an error.
pub fn select_period(
    result: &AggregationResult,
    period: Period,
    reference_date: NaiveDate,
) -> TypeHours {
    match period {
        Period::Month => result
            .by_month
            .get(&MonthKey::of(reference_date))
            .cloned()
            .unwrap_or_default(),
        Period::Year => result
            .by_year
            .get(&YearKey::of(reference_date))
            .cloned()
            .unwrap_or_default(),
        Period::All => result.total.clone(),
    }
}
