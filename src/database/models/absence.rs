use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// Hours booked for a full-day absence when the caller does not say otherwise.
pub const DEFAULT_ABSENCE_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub absence_type_id: String,
    pub date: NaiveDate, // DATE, one row per (employee_id, date)
    pub hours: f64,
    pub status: AbsenceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceType {
    pub id: String, // short code such as "V" or "B"
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub company_id: Option<Uuid>,
}

/// Body of a calendar cell edit. Upserted on (employee_id, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAbsenceInput {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub absence_type_id: String,
    pub hours: Option<f64>,
    pub status: Option<AbsenceStatus>,
}

impl UpsertAbsenceInput {
    pub fn hours(&self) -> f64 {
        self.hours.unwrap_or(DEFAULT_ABSENCE_HOURS)
    }

    pub fn status(&self) -> AbsenceStatus {
        self.status.clone().unwrap_or(AbsenceStatus::Approved)
    }
}

/// Filters accepted by the absence record listing.
#[derive(Debug, Clone, Default)]
pub struct AbsenceFilter {
    pub employee_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub status: Option<AbsenceStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum AbsenceStatus {
        Approved => "approved",
        Pending => "pending",
        Rejected => "rejected",
    }
}
