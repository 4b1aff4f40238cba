use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::repositories::{AbsenceTypeRepository, CompanyRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Session;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    pub company_id: Option<Uuid>,
}

pub async fn list_absence_types(
    _session: Session,
    repo: web::Data<AbsenceTypeRepository>,
) -> Result<HttpResponse, AppError> {
    let types = repo.list_active().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(types)))
}

pub async fn list_companies(
    session: Session,
    repo: web::Data<CompanyRepository>,
) -> Result<HttpResponse, AppError> {
    let company_id = session.company_scope(None)?;
    let companies = repo.list_active(company_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(companies)))
}

pub async fn list_departments(
    session: Session,
    repo: web::Data<CompanyRepository>,
    query: web::Query<CompanyQuery>,
) -> Result<HttpResponse, AppError> {
    let company_id = session.company_scope(query.company_id)?;
    let departments = repo.list_departments(company_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(departments)))
}
