//! Per-employee absence summary: the selected period as display rows plus
//! the yearly and monthly breakdowns.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregation::{
    MonthKey, Period, TypeHours, YearKey, aggregate, compute_derived_metrics, hours_to_days,
    select_period,
};
use crate::database::models::{AbsenceRecord, AbsenceType, Employee, WorkGroup, WorkGroupView};

/// Color shown for absence types that are no longer defined.
pub const FALLBACK_COLOR: &str = "#9e9e9e";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub absence_type_id: String,
    pub name: String,
    pub color: String,
    pub hours: f64,
    pub days: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBreakdown<K> {
    pub period: K,
    pub hours: TypeHours,
    pub total_hours: f64,
    pub total_days: f64,
}

impl<K> PeriodBreakdown<K> {
    fn new(period: K, hours: &TypeHours) -> Self {
        let total_hours = hours.values().sum();
        Self {
            period,
            hours: hours.clone(),
            total_hours,
            total_days: hours_to_days(total_hours),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee: Employee,
    pub work_group: Option<WorkGroupView>,
    pub period: Period,
    pub reference_date: NaiveDate,
    pub period_label: String,
    pub rows: Vec<SummaryRow>,
    pub total_hours: f64,
    pub total_days: f64,
    pub by_year: Vec<PeriodBreakdown<YearKey>>,
    pub by_month: Vec<PeriodBreakdown<MonthKey>>,
}

pub fn build_summary(
    employee: Employee,
    work_group: Option<WorkGroup>,
    records: &[AbsenceRecord],
    absence_types: &[AbsenceType],
    period: Period,
    reference_date: NaiveDate,
) -> EmployeeSummary {
    let result = aggregate(records);
    let selected = select_period(&result, period, reference_date);
    let metrics = compute_derived_metrics(&selected);

    let types: HashMap<&str, &AbsenceType> =
        absence_types.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut rows: Vec<SummaryRow> = selected
        .iter()
        .map(|(type_id, hours)| {
            let known = types.get(type_id.as_str());
            SummaryRow {
                absence_type_id: type_id.clone(),
                name: known.map_or_else(|| type_id.clone(), |t| t.name.clone()),
                color: known.map_or_else(|| FALLBACK_COLOR.to_string(), |t| t.color.clone()),
                hours: *hours,
                days: hours_to_days(*hours),
                percentage: metrics
                    .per_type_percentage
                    .get(type_id)
                    .copied()
                    .unwrap_or(0.0),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.hours.total_cmp(&a.hours).then_with(|| a.name.cmp(&b.name)));

    EmployeeSummary {
        employee,
        work_group: work_group.map(WorkGroupView::from),
        period,
        reference_date,
        period_label: period.label(reference_date),
        rows,
        total_hours: metrics.total_hours,
        total_days: metrics.total_days,
        by_year: result
            .years_descending()
            .into_iter()
            .map(|(year, hours)| PeriodBreakdown::new(year, hours))
            .collect(),
        by_month: result
            .months_chronological()
            .into_iter()
            .map(|(month, hours)| PeriodBreakdown::new(month, hours))
            .collect(),
    }
}
