use std::sync::LazyLock;

use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::aggregation::Period;
use crate::database::models::{Employee, EmployeeInput};
use crate::database::repositories::{
    AbsenceRepository, AbsenceTypeRepository, EmployeeRepository, WorkGroupRepository,
    WorkHoursRepository,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Session;
use crate::summary::build_summary;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    pub company_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub period: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlySummaryQuery {
    pub year: i32,
    pub month: u32,
}

async fn load_employee(
    session: &Session,
    repo: &EmployeeRepository,
    employee_id: Uuid,
) -> Result<Employee, AppError> {
    let employee = repo
        .find_by_id(employee_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load employee {}: {}", employee_id, e);
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    session.ensure_company_access(employee.company_id)?;

    Ok(employee)
}

pub async fn list_employees(
    session: Session,
    repo: web::Data<EmployeeRepository>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let company_id = session.company_scope(query.company_id)?;
    let employees = repo.list(company_id, query.search.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employees)))
}

fn validate(input: &EmployeeInput) -> Result<(), AppError> {
    if input.first_name.trim().is_empty() {
        return Err(AppError::BadRequest("First name is required".to_string()));
    }
    if input.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("Last name is required".to_string()));
    }
    if !EMAIL.is_match(input.email.trim()) {
        return Err(AppError::BadRequest(format!(
            "Invalid email address '{}'",
            input.email
        )));
    }
    Ok(())
}

pub async fn create_employee(
    session: Session,
    repo: web::Data<EmployeeRepository>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    let company_id = session
        .company_scope(input.company_id)?
        .ok_or_else(|| AppError::BadRequest("companyId is required".to_string()))?;

    let employee = repo.create(&input, company_id).await.map_err(|e| {
        log::error!("Failed to create employee {}: {}", input.email, e);
        AppError::from(e)
    })?;

    log::info!(
        "User {} created employee {} in company {}",
        session.user_id(),
        employee.id,
        company_id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(employee)))
}

pub async fn update_employee(
    session: Session,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<Uuid>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    let existing = load_employee(&session, &repo, path.into_inner()).await?;
    let company_id = session
        .company_scope(input.company_id.or(Some(existing.company_id)))?
        .unwrap_or(existing.company_id);

    let employee = repo
        .update(existing.id, &input, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    log::info!("User {} updated employee {}", session.user_id(), employee.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

pub async fn delete_employee(
    session: Session,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&session, &repo, path.into_inner()).await?;

    if !repo.delete(employee.id).await? {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    log::info!("User {} deleted employee {}", session.user_id(), employee.id);

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Employee deleted",
    )))
}

pub async fn get_employee(
    session: Session,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&session, &repo, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

/// Absence totals for one employee over a month, a year or all time
pub async fn get_employee_summary(
    session: Session,
    employee_repo: web::Data<EmployeeRepository>,
    absence_repo: web::Data<AbsenceRepository>,
    type_repo: web::Data<AbsenceTypeRepository>,
    work_group_repo: web::Data<WorkGroupRepository>,
    path: web::Path<Uuid>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let period = match query.period.as_deref() {
        Some(period) => period.parse::<Period>()?,
        None => Period::default(),
    };
    let reference_date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let employee = load_employee(&session, &employee_repo, path.into_inner()).await?;

    let work_group = match employee.work_group {
        Some(group_id) => work_group_repo.find_by_id(group_id).await?,
        None => None,
    };
    let records = absence_repo.approved_for_employee(employee.id).await?;
    let absence_types = type_repo.list_active().await?;

    let summary = build_summary(
        employee,
        work_group,
        &records,
        &absence_types,
        period,
        reference_date,
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

/// Stored monthly worked-hours totals for one employee
pub async fn get_monthly_summary(
    session: Session,
    employee_repo: web::Data<EmployeeRepository>,
    work_hours_repo: web::Data<WorkHoursRepository>,
    path: web::Path<Uuid>,
    query: web::Query<MonthlySummaryQuery>,
) -> Result<HttpResponse, AppError> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::BadRequest(format!(
            "Month must be between 1 and 12, got {}",
            query.month
        )));
    }

    let employee = load_employee(&session, &employee_repo, path.into_inner()).await?;

    let summary = work_hours_repo
        .monthly_summary(employee.id, query.year, query.month as i32)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No monthly summary for {:04}-{:02}",
                query.year, query.month
            ))
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
