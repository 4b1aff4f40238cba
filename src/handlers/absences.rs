use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{AbsenceFilter, AbsenceStatus, UpsertAbsenceInput};
use crate::database::repositories::{
    AbsenceRepository, AbsenceTypeRepository, EmployeeRepository,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::Session;
use crate::work_hours::MAX_HOURS_PER_DAY;

/// Width of `absence_types.id`.
const MAX_ABSENCE_TYPE_ID_LEN: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceQuery {
    pub employee_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub status: Option<AbsenceStatus>,
}

/// List absence records visible to the caller
pub async fn list_absences(
    session: Session,
    repo: web::Data<AbsenceRepository>,
    query: web::Query<AbsenceQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = AbsenceFilter {
        employee_id: query.employee_id,
        company_id: session.company_scope(query.company_id)?,
        status: query.status,
        start_date: query.start,
        end_date: query.end,
    };

    let records = repo.list(&filter).await.map_err(|e| {
        log::error!("Failed to list absence records: {}", e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
}

/// Set the absence for one employee and day
pub async fn upsert_absence(
    req: HttpRequest,
    session: Session,
    repo: web::Data<AbsenceRepository>,
    employee_repo: web::Data<EmployeeRepository>,
    type_repo: web::Data<AbsenceTypeRepository>,
    input: web::Json<UpsertAbsenceInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    let hours = input.hours();
    if !(0.0..=MAX_HOURS_PER_DAY).contains(&hours) {
        return Err(AppError::BadRequest(format!(
            "Hours must be between 0 and {}, got {}",
            MAX_HOURS_PER_DAY, hours
        )));
    }
    if input.absence_type_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Absence type is required".to_string(),
        ));
    }
    if input.absence_type_id.chars().count() > MAX_ABSENCE_TYPE_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "Absence type id is longer than {} characters",
            MAX_ABSENCE_TYPE_ID_LEN
        )));
    }

    let employee = employee_repo
        .find_by_id(input.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    session.ensure_company_access(employee.company_id)?;

    if type_repo.find_active(&input.absence_type_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown or inactive absence type '{}'",
            input.absence_type_id
        )));
    }

    let record = repo.upsert(&input).await.map_err(|e| {
        log::error!(
            "Failed to save absence for employee {} on {}: {}",
            input.employee_id,
            input.date,
            e
        );
        AppError::from(e)
    })?;

    log::info!(
        "User {} set absence {} ({}h) for employee {} on {} correlation_id={}",
        session.user_id(),
        record.absence_type_id,
        record.hours,
        record.employee_id,
        record.date,
        req.correlation_id().unwrap_or_default()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

/// Clear the absence for one employee and day
pub async fn delete_absence(
    session: Session,
    repo: web::Data<AbsenceRepository>,
    employee_repo: web::Data<EmployeeRepository>,
    path: web::Path<(Uuid, NaiveDate)>,
) -> Result<HttpResponse, AppError> {
    let (employee_id, date) = path.into_inner();

    let employee = employee_repo
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    session.ensure_company_access(employee.company_id)?;

    if !repo.delete_day(employee_id, date).await? {
        return Err(AppError::NotFound(format!(
            "No absence recorded on {}",
            date
        )));
    }

    log::info!(
        "User {} cleared absence for employee {} on {}",
        session.user_id(),
        employee_id,
        date
    );

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Absence removed",
    )))
}
