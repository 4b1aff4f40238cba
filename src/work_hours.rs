//! Daily worked-hours helpers.
//!
//! Worked hours are tracked separately from absences and never folded into
//! the absence aggregation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use thiserror::Error;

use crate::aggregation::{MonthKey, round_to};
use crate::database::models::WorkHoursEntry;

pub const MAX_HOURS_PER_DAY: f64 = 24.0;

static HOURS_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("valid hours regex"));

#[derive(Debug, Error, PartialEq)]
pub enum WorkHoursError {
    #[error("Invalid hours input '{0}', expected HH:MM")]
    Format(String),

    #[error("Minutes must be below 60, got {0}")]
    Minutes(u32),

    #[error("At most 24 hours can be recorded for one day, got {0}")]
    TooManyHours(f64),
}

/// Converts a typed `HH:MM` value into decimal hours, e.g. `"07:30"` is 7.5.
pub fn parse_hours_input(input: &str) -> Result<f64, WorkHoursError> {
    let caps = HOURS_INPUT
        .captures(input)
        .ok_or_else(|| WorkHoursError::Format(input.to_string()))?;

    let hours: u32 = caps[1]
        .parse()
        .map_err(|_| WorkHoursError::Format(input.to_string()))?;
    let minutes: u32 = caps[2]
        .parse()
        .map_err(|_| WorkHoursError::Format(input.to_string()))?;

    if minutes >= 60 {
        return Err(WorkHoursError::Minutes(minutes));
    }

    let total = round_to(f64::from(hours) + f64::from(minutes) / 60.0, 2);
    if total > MAX_HOURS_PER_DAY {
        return Err(WorkHoursError::TooManyHours(total));
    }

    Ok(total)
}

/// Length of a shift in hours. Shifts ending before they start count as 0.
pub fn shift_length(start: NaiveTime, end: NaiveTime) -> f64 {
    let minutes = (end - start).num_minutes();
    (minutes as f64 / 60.0).max(0.0)
}

/// Worked hours per calendar month.
pub fn monthly_work_totals(entries: &[WorkHoursEntry]) -> BTreeMap<MonthKey, f64> {
    entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
        *acc.entry(MonthKey::of(entry.work_date)).or_insert(0.0) += entry.hours_worked;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn entry(day: &str, hours_input: &str) -> WorkHoursEntry {
        WorkHoursEntry {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            work_date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
            hours_input: hours_input.to_string(),
            hours_worked: parse_hours_input(hours_input).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn parses_hours_and_minutes() {
        assert_eq!(parse_hours_input("08:00"), Ok(8.0));
        assert_eq!(parse_hours_input("7:30"), Ok(7.5));
        assert_eq!(parse_hours_input(" 00:20 "), Ok(0.33));
        assert_eq!(parse_hours_input("24:00"), Ok(24.0));
    }

    #[test]
    fn rejects_bad_hours_input() {
        assert_eq!(
            parse_hours_input("8h"),
            Err(WorkHoursError::Format("8h".to_string()))
        );
        assert_eq!(parse_hours_input("08:75"), Err(WorkHoursError::Minutes(75)));
        assert_eq!(
            parse_hours_input("24:30"),
            Err(WorkHoursError::TooManyHours(24.5))
        );
    }

    #[test]
    fn measures_shift_length() {
        assert_eq!(shift_length(time("07:00"), time("15:00")), 8.0);
        assert_eq!(shift_length(time("07:00"), time("15:30")), 8.5);
        assert_eq!(shift_length(time("22:00"), time("06:00")), 0.0);
    }

    #[test]
    fn totals_worked_hours_per_month() {
        let entries = vec![
            entry("2024-03-01", "08:00"),
            entry("2024-03-02", "07:30"),
            entry("2024-04-01", "09:15"),
        ];
        let totals = monthly_work_totals(&entries);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&"2024-03".parse::<MonthKey>().unwrap()], 15.5);
        assert_eq!(totals[&"2024-04".parse::<MonthKey>().unwrap()], 9.25);
    }
}
