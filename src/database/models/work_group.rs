use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::work_hours::shift_length;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkGroup {
    pub id: i32,
    pub name: String,
    pub start_time: NaiveTime, // TIME
    pub end_time: NaiveTime,   // TIME
    pub has_rest_day: bool,
    pub company_id: Option<Uuid>,
}

impl WorkGroup {
    pub fn shift_hours(&self) -> f64 {
        shift_length(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkGroupInput {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub has_rest_day: bool,
    pub company_id: Option<Uuid>,
}

/// Work group as served over HTTP, with its derived shift length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkGroupView {
    #[serde(flatten)]
    pub group: WorkGroup,
    pub shift_hours: f64,
}

impl From<WorkGroup> for WorkGroupView {
    fn from(group: WorkGroup) -> Self {
        let shift_hours = group.shift_hours();
        Self { group, shift_hours }
    }
}
