use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregation::MonthKey;
use crate::database::models::{WorkHoursEntry, WorkHoursInput};
use crate::database::repositories::{EmployeeRepository, WorkHoursRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::Session;
use crate::work_hours::{monthly_work_totals, parse_hours_input};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursQuery {
    pub employee_id: Uuid,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursListing {
    pub entries: Vec<WorkHoursEntry>,
    pub monthly_totals: BTreeMap<MonthKey, f64>,
}

/// Record the hours an employee worked on one day
pub async fn upsert_work_hours(
    req: HttpRequest,
    session: Session,
    repo: web::Data<WorkHoursRepository>,
    employee_repo: web::Data<EmployeeRepository>,
    input: web::Json<WorkHoursInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    let hours_worked = parse_hours_input(&input.hours_input)?;

    let employee = employee_repo
        .find_by_id(input.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    session.ensure_company_access(employee.company_id)?;

    let entry = repo.upsert(&input, hours_worked).await.map_err(|e| {
        log::error!(
            "Failed to save work hours for employee {} on {}: {}",
            input.employee_id,
            input.work_date,
            e
        );
        AppError::from(e)
    })?;

    log::info!(
        "User {} recorded {}h worked for employee {} on {} correlation_id={}",
        session.user_id(),
        entry.hours_worked,
        entry.employee_id,
        entry.work_date,
        req.correlation_id().unwrap_or_default()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(entry)))
}

pub async fn list_work_hours(
    session: Session,
    repo: web::Data<WorkHoursRepository>,
    employee_repo: web::Data<EmployeeRepository>,
    query: web::Query<WorkHoursQuery>,
) -> Result<HttpResponse, AppError> {
    let employee = employee_repo
        .find_by_id(query.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    session.ensure_company_access(employee.company_id)?;

    let entries = repo.list(employee.id, query.start, query.end).await?;
    let monthly_totals = monthly_work_totals(&entries);

    Ok(HttpResponse::Ok().json(ApiResponse::success(WorkHoursListing {
        entries,
        monthly_totals,
    })))
}
