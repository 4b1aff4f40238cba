pub mod aggregation;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reports;
pub mod services;
pub mod summary;
pub mod work_hours;

use actix_web::web;
use sqlx::PgPool;

pub use config::Config;
use error::AppError;
use database::repositories::{
    AbsenceRepository, AbsenceTypeRepository, CompanyRepository, EmployeeRepository,
    WorkGroupRepository, WorkHoursRepository,
};
use handlers::{absences, employees, reference, reports as report_handlers, work_groups};

/// Registers one repository of each kind as app data.
pub fn repositories(pool: PgPool) -> impl Fn(&mut web::ServiceConfig) + Clone {
    let absence_repo = web::Data::new(AbsenceRepository::new(pool.clone()));
    let absence_type_repo = web::Data::new(AbsenceTypeRepository::new(pool.clone()));
    let company_repo = web::Data::new(CompanyRepository::new(pool.clone()));
    let employee_repo = web::Data::new(EmployeeRepository::new(pool.clone()));
    let work_group_repo = web::Data::new(WorkGroupRepository::new(pool.clone()));
    let work_hours_repo = web::Data::new(WorkHoursRepository::new(pool));

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(absence_repo.clone())
            .app_data(absence_type_repo.clone())
            .app_data(company_repo.clone())
            .app_data(employee_repo.clone())
            .app_data(work_group_repo.clone())
            .app_data(work_hours_repo.clone());
    }
}

/// Routes mounted under `/api/v1`.
///
/// Extractor failures (bad query strings, bodies or path segments) are
/// reported as `AppError::BadRequest` so they carry the usual envelope.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/employees")
            .route("", web::get().to(employees::list_employees))
            .route("", web::post().to(employees::create_employee))
            .route("/{id}", web::get().to(employees::get_employee))
            .route("/{id}", web::put().to(employees::update_employee))
            .route("/{id}", web::delete().to(employees::delete_employee))
            .route("/{id}/summary", web::get().to(employees::get_employee_summary))
            .route(
                "/{id}/monthly-summary",
                web::get().to(employees::get_monthly_summary),
            ),
    )
    .service(
        web::scope("/absences")
            .route("", web::get().to(absences::list_absences))
            .route("", web::put().to(absences::upsert_absence))
            .route(
                "/{employee_id}/{date}",
                web::delete().to(absences::delete_absence),
            ),
    )
    .service(
        web::scope("/work-hours")
            .route("", web::get().to(handlers::work_hours::list_work_hours))
            .route("", web::put().to(handlers::work_hours::upsert_work_hours)),
    )
    .service(
        web::scope("/work-groups")
            .route("", web::get().to(work_groups::list_work_groups))
            .route("", web::post().to(work_groups::create_work_group))
            .route("/{id}", web::put().to(work_groups::update_work_group))
            .route("/{id}", web::delete().to(work_groups::delete_work_group)),
    )
    .route("/reports/{kind}", web::get().to(report_handlers::get_report))
    .route("/absence-types", web::get().to(reference::list_absence_types))
    .route("/companies", web::get().to(reference::list_companies))
    .route("/departments", web::get().to(reference::list_departments));
}
