//! Repository tests against a real Postgres database.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`
//! and applies `./migrations` before handing over the pool.

use absence_tracker::database::models::{
    AbsenceFilter, AbsenceStatus, EmployeeInput, UpsertAbsenceInput, WorkHoursInput,
};
use absence_tracker::database::repositories::{
    AbsenceRepository, AbsenceTypeRepository, EmployeeRepository, WorkHoursRepository,
};
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_company(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_absence_types(pool: &PgPool) {
    sqlx::query(
        r#"
        INSERT INTO
            absence_types (id, name, color, is_active)
        VALUES
            ('V', 'Vacation', '#4caf50', TRUE),
            ('B', 'Sick leave', '#f44336', TRUE),
            ('X', 'Retired code', '#607d8b', FALSE)
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

fn employee_input(first: &str, last: &str) -> EmployeeInput {
    EmployeeInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: SafeEmail().fake(),
        work_group: None,
        company_id: None,
        department_id: None,
    }
}

async fn seed_employee(pool: &PgPool, company_id: Uuid, first: &str, last: &str) -> Uuid {
    EmployeeRepository::new(pool.clone())
        .create(&employee_input(first, last), company_id)
        .await
        .unwrap()
        .id
}

fn absence(employee_id: Uuid, date: NaiveDate, type_id: &str) -> UpsertAbsenceInput {
    UpsertAbsenceInput {
        employee_id,
        date,
        absence_type_id: type_id.to_string(),
        hours: None,
        status: None,
    }
}

#[sqlx::test]
async fn second_upsert_replaces_the_day(pool: PgPool) {
    seed_absence_types(&pool).await;
    let company = seed_company(&pool, "Acme").await;
    let employee = seed_employee(&pool, company, "Ada", "Byron").await;
    let repo = AbsenceRepository::new(pool.clone());

    let first = repo.upsert(&absence(employee, day(2024, 3, 5), "V")).await.unwrap();
    let mut edit = absence(employee, day(2024, 3, 5), "B");
    edit.hours = Some(4.0);
    let second = repo.upsert(&edit).await.unwrap();

    assert_eq!(second.id, first.id);

    let rows = repo
        .list(&AbsenceFilter {
            employee_id: Some(employee),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].absence_type_id, "B");
    assert_eq!(rows[0].hours, 4.0);
    assert_eq!(rows[0].status, AbsenceStatus::Approved);
}

#[sqlx::test]
async fn list_applies_every_filter(pool: PgPool) {
    seed_absence_types(&pool).await;
    let company = seed_company(&pool, "Acme").await;
    let ada = seed_employee(&pool, company, "Ada", "Byron").await;
    let alan = seed_employee(&pool, company, "Alan", "Turing").await;
    let repo = AbsenceRepository::new(pool.clone());

    repo.upsert(&absence(ada, day(2024, 3, 4), "V")).await.unwrap();
    repo.upsert(&absence(ada, day(2024, 3, 20), "V")).await.unwrap();
    repo.upsert(&absence(ada, day(2024, 4, 2), "B")).await.unwrap();
    let mut pending = absence(alan, day(2024, 3, 11), "V");
    pending.status = Some(AbsenceStatus::Pending);
    repo.upsert(&pending).await.unwrap();

    let march = repo
        .list(&AbsenceFilter {
            start_date: Some(day(2024, 3, 1)),
            end_date: Some(day(2024, 3, 31)),
            ..Default::default()
        })
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = march.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(2024, 3, 20), day(2024, 3, 11), day(2024, 3, 4)]);

    let ada_only = repo
        .list(&AbsenceFilter {
            employee_id: Some(ada),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ada_only.len(), 3);
    assert!(ada_only.iter().all(|r| r.employee_id == ada));

    let waiting = repo
        .list(&AbsenceFilter {
            status: Some(AbsenceStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].employee_id, alan);

    let approved = repo.approved_for_employee(alan).await.unwrap();
    assert!(approved.is_empty());
}

#[sqlx::test]
async fn company_scope_hides_other_companies(pool: PgPool) {
    seed_absence_types(&pool).await;
    let acme = seed_company(&pool, "Acme").await;
    let globex = seed_company(&pool, "Globex").await;
    let ada = seed_employee(&pool, acme, "Ada", "Byron").await;
    let hank = seed_employee(&pool, globex, "Hank", "Scorpio").await;
    let repo = AbsenceRepository::new(pool.clone());

    repo.upsert(&absence(ada, day(2024, 3, 4), "V")).await.unwrap();
    repo.upsert(&absence(hank, day(2024, 3, 4), "B")).await.unwrap();

    let scoped = repo
        .list(&AbsenceFilter {
            company_id: Some(acme),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].employee_id, ada);

    let employees = EmployeeRepository::new(pool.clone());
    let acme_staff = employees.list(Some(acme), None).await.unwrap();
    assert_eq!(acme_staff.len(), 1);
    assert_eq!(acme_staff[0].id, ada);
    assert_eq!(employees.list(None, None).await.unwrap().len(), 2);
}

#[sqlx::test]
async fn delete_day_reports_whether_a_row_went(pool: PgPool) {
    seed_absence_types(&pool).await;
    let company = seed_company(&pool, "Acme").await;
    let employee = seed_employee(&pool, company, "Ada", "Byron").await;
    let repo = AbsenceRepository::new(pool.clone());

    repo.upsert(&absence(employee, day(2024, 3, 5), "V")).await.unwrap();

    assert!(repo.delete_day(employee, day(2024, 3, 5)).await.unwrap());
    assert!(!repo.delete_day(employee, day(2024, 3, 5)).await.unwrap());
}

#[sqlx::test]
async fn find_active_skips_unknown_and_retired_types(pool: PgPool) {
    seed_absence_types(&pool).await;
    let repo = AbsenceTypeRepository::new(pool.clone());

    let vacation = repo.find_active("V").await.unwrap();
    assert_eq!(vacation.map(|t| t.name), Some("Vacation".to_string()));
    assert_eq!(repo.find_active("X").await.unwrap(), None);
    assert_eq!(repo.find_active("Q").await.unwrap(), None);

    let ids: Vec<String> = repo
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert!(!ids.contains(&"X".to_string()));
}

#[sqlx::test]
async fn monthly_summary_is_none_until_stored(pool: PgPool) {
    let company = seed_company(&pool, "Acme").await;
    let employee = seed_employee(&pool, company, "Ada", "Byron").await;
    let repo = WorkHoursRepository::new(pool.clone());

    assert_eq!(repo.monthly_summary(employee, 2024, 3).await.unwrap(), None);

    sqlx::query(
        r#"
        INSERT INTO
            monthly_hours_summary (employee_id, year, month, total_normal_hours, total_overtime_hours)
        VALUES
            ($1, 2024, 3, 160, 6.5)
        "#,
    )
    .bind(employee)
    .execute(&pool)
    .await
    .unwrap();

    let stored = repo.monthly_summary(employee, 2024, 3).await.unwrap().unwrap();
    assert_eq!(stored.total_normal_hours, 160.0);
    assert_eq!(stored.total_overtime_hours, 6.5);
    assert_eq!(repo.monthly_summary(employee, 2024, 4).await.unwrap(), None);
}

#[sqlx::test]
async fn work_hours_upsert_keeps_one_row_per_day(pool: PgPool) {
    let company = seed_company(&pool, "Acme").await;
    let employee = seed_employee(&pool, company, "Ada", "Byron").await;
    let repo = WorkHoursRepository::new(pool.clone());

    let mut input = WorkHoursInput {
        employee_id: employee,
        work_date: day(2024, 3, 5),
        hours_input: "07:30".to_string(),
    };
    repo.upsert(&input, 7.5).await.unwrap();
    input.hours_input = "08:00".to_string();
    repo.upsert(&input, 8.0).await.unwrap();

    let entries = repo
        .list(employee, Some(day(2024, 3, 1)), Some(day(2024, 3, 31)))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].hours_input, "08:00");
    assert_eq!(entries[0].hours_worked, 8.0);
}

#[sqlx::test]
async fn employees_can_be_created_edited_and_removed(pool: PgPool) {
    seed_absence_types(&pool).await;
    let company = seed_company(&pool, "Acme").await;
    let repo = EmployeeRepository::new(pool.clone());

    let mut input = employee_input("  Ada ", "Byron");
    let created = repo.create(&input, company).await.unwrap();
    assert_eq!(created.full_name(), "Ada Byron");
    assert_eq!(created.company_id, company);

    input.last_name = "Lovelace".to_string();
    let updated = repo.update(created.id, &input, company).await.unwrap().unwrap();
    assert_eq!(updated.last_name, "Lovelace");
    assert!(updated.updated_at >= created.updated_at);

    AbsenceRepository::new(pool.clone())
        .upsert(&absence(created.id, day(2024, 3, 5), "V"))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
    assert_eq!(repo.update(created.id, &input, company).await.unwrap(), None);
    assert!(!repo.delete(created.id).await.unwrap());

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM absence_records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[sqlx::test]
async fn employee_search_matches_name_email_and_work_group(pool: PgPool) {
    let company = seed_company(&pool, "Acme").await;
    let group: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO
            work_groups (name, start_time, end_time, company_id)
        VALUES
            ('Night desk', '14:00', '22:00', $1)
        RETURNING
            id
        "#,
    )
    .bind(company)
    .fetch_one(&pool)
    .await
    .unwrap();

    let repo = EmployeeRepository::new(pool.clone());
    let mut ada = employee_input("Ada", "Byron");
    ada.email = "countess@analytical.example".to_string();
    let ada = repo.create(&ada, company).await.unwrap();
    let mut alan = employee_input("Alan", "Turing");
    alan.work_group = Some(group);
    let alan = repo.create(&alan, company).await.unwrap();
    let mut grace = employee_input("Grace", "Hopper");
    grace.email = "grace_h@navy.example".to_string();
    let grace = repo.create(&grace, company).await.unwrap();

    let found = |term: &'static str| {
        let repo = repo.clone();
        async move {
            repo.list(Some(company), Some(term))
                .await
                .unwrap()
                .into_iter()
                .map(|e| e.id)
                .collect::<Vec<Uuid>>()
        }
    };

    assert_eq!(found("ada byron").await, vec![ada.id]);
    assert_eq!(found("ANALYTICAL").await, vec![ada.id]);
    assert_eq!(found("night").await, vec![alan.id]);
    assert_eq!(found("_h@").await, vec![grace.id]);
    assert_eq!(found("%").await, Vec::<Uuid>::new());
    assert_eq!(found("  ").await.len(), 3);
}
