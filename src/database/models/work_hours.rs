use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate, // one row per (employee_id, work_date)
    pub hours_input: String,  // "HH:MM" as typed by the user
    pub hours_worked: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursInput {
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub hours_input: String,
}

/// Per-month totals kept in `monthly_hours_summary`. Only read here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHoursSummary {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub total_normal_hours: f64,
    pub total_redistribution_hours: f64,
    pub total_overtime_hours: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
