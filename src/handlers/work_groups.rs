use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{WorkGroupInput, WorkGroupView};
use crate::database::repositories::WorkGroupRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Session;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkGroupQuery {
    pub company_id: Option<Uuid>,
}

fn validate(input: &WorkGroupInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Work group name is required".to_string(),
        ));
    }
    if input.end_time <= input.start_time {
        return Err(AppError::BadRequest(
            "Shift must end after it starts".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_work_groups(
    session: Session,
    repo: web::Data<WorkGroupRepository>,
    query: web::Query<WorkGroupQuery>,
) -> Result<HttpResponse, AppError> {
    let company_id = session.company_scope(query.company_id)?;
    let groups: Vec<WorkGroupView> = repo
        .list(company_id)
        .await?
        .into_iter()
        .map(WorkGroupView::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(groups)))
}

pub async fn create_work_group(
    session: Session,
    repo: web::Data<WorkGroupRepository>,
    input: web::Json<WorkGroupInput>,
) -> Result<HttpResponse, AppError> {
    session.require_admin()?;
    validate(&input)?;

    let group = repo.create(&input).await.map_err(|e| {
        log::error!("Failed to create work group {}: {}", input.name, e);
        AppError::from(e)
    })?;

    log::info!(
        "User {} created work group {} ({})",
        session.user_id(),
        group.id,
        group.name
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(WorkGroupView::from(group))))
}

pub async fn update_work_group(
    session: Session,
    repo: web::Data<WorkGroupRepository>,
    path: web::Path<i32>,
    input: web::Json<WorkGroupInput>,
) -> Result<HttpResponse, AppError> {
    session.require_admin()?;
    validate(&input)?;
    let id = path.into_inner();

    let group = repo
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Work group not found".to_string()))?;

    log::info!("User {} updated work group {}", session.user_id(), id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(WorkGroupView::from(group))))
}

pub async fn delete_work_group(
    session: Session,
    repo: web::Data<WorkGroupRepository>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    session.require_admin()?;
    let id = path.into_inner();

    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Work group not found".to_string()));
    }

    log::info!("User {} deleted work group {}", session.user_id(), id);

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Work group deleted",
    )))
}
