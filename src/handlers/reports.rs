use actix_web::{HttpResponse, web};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{AbsenceFilter, AbsenceStatus};
use crate::database::repositories::{
    AbsenceRepository, AbsenceTypeRepository, CompanyRepository, EmployeeRepository,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::reports::{ReportFilter, ReportInput, ReportKind, generate};
use crate::services::Session;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub company_id: Option<Uuid>,
    pub status: Option<AbsenceStatus>,
}

impl ReportQuery {
    /// Defaults to the current month up to today.
    fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.start.unwrap_or_else(|| today.with_day(1).unwrap_or(today));
        let end = self.end.unwrap_or(today);
        (start, end)
    }
}

pub async fn get_report(
    session: Session,
    employee_repo: web::Data<EmployeeRepository>,
    absence_repo: web::Data<AbsenceRepository>,
    type_repo: web::Data<AbsenceTypeRepository>,
    company_repo: web::Data<CompanyRepository>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let kind = path.parse::<ReportKind>()?;
    let (start, end) = query.date_range(Utc::now().date_naive());
    if start > end {
        return Err(AppError::BadRequest(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }
    let company_id = session.company_scope(query.company_id)?;

    let filter = ReportFilter {
        start,
        end,
        company_id,
        status: query.status.clone(),
    };

    let employees = employee_repo.list(company_id, None).await?;
    let records = absence_repo
        .list(&AbsenceFilter {
            employee_id: None,
            company_id,
            status: filter.status.clone(),
            start_date: Some(start),
            end_date: Some(end),
        })
        .await?;
    let absence_types = type_repo.list_active().await?;
    let companies = company_repo.list_active(company_id).await?;
    let departments = company_repo.list_departments(company_id).await?;

    let input = ReportInput {
        employees: &employees,
        records: &records,
        absence_types: &absence_types,
        companies: &companies,
        departments: &departments,
    };
    let report = generate(kind, input, &filter);

    log::debug!(
        "Generated {} report with {} rows for user {}",
        kind,
        report.rows.len(),
        session.user_id()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}
