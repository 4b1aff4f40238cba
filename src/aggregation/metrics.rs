use serde::{Deserialize, Serialize};

use super::TypeHours;

/// One standard workday, used to express hours as days.
pub const HOURS_PER_WORKDAY: f64 = 8.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub total_hours: f64,
    pub total_days: f64,
    pub per_type_percentage: TypeHours,
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn hours_to_days(hours: f64) -> f64 {
    round_to(hours / HOURS_PER_WORKDAY, 1)
}

/// Totals and per-type shares for one period slice.
///
/// Percentages are 0 rather than NaN when the slice holds no hours.
pub fn compute_derived_metrics(period_data: &TypeHours) -> DerivedMetrics {
    let total_hours: f64 = period_data.values().sum();

    let per_type_percentage = period_data
        .iter()
        .map(|(type_id, hours)| {
            let share = if total_hours > 0.0 {
                round_to(hours / total_hours * 100.0, 1)
            } else {
                0.0
            };
            (type_id.clone(), share)
        })
        .collect();

    DerivedMetrics {
        total_hours,
        total_days: hours_to_days(total_hours),
        per_type_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hours(pairs: &[(&str, f64)]) -> TypeHours {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn derives_totals_days_and_shares() {
        let metrics = compute_derived_metrics(&hours(&[("V", 16.0), ("B", 4.0)]));

        assert_eq!(metrics.total_hours, 20.0);
        assert_eq!(metrics.total_days, 2.5);
        assert_eq!(
            metrics.per_type_percentage,
            hours(&[("V", 80.0), ("B", 20.0)])
        );
    }

    #[test]
    fn empty_slice_is_all_zero() {
        assert_eq!(
            compute_derived_metrics(&TypeHours::new()),
            DerivedMetrics {
                total_hours: 0.0,
                total_days: 0.0,
                per_type_percentage: TypeHours::new(),
            }
        );
    }

    #[test]
    fn zero_hour_types_get_zero_share() {
        let metrics = compute_derived_metrics(&hours(&[("V", 0.0)]));
        assert_eq!(metrics.per_type_percentage["V"], 0.0);
        assert_eq!(metrics.total_days, 0.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        let metrics = compute_derived_metrics(&hours(&[("V", 8.0), ("S", 8.0), ("B", 8.0)]));
        assert_eq!(metrics.per_type_percentage["V"], 33.3);
        assert_eq!(metrics.total_days, 3.0);
        assert_eq!(hours_to_days(12.0), 1.5);
        assert_eq!(hours_to_days(3.0), 0.4);
    }
}
