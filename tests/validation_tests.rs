use actix_web::{http::StatusCode, test};
use absence_tracker::services::UserRole;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

#[macro_use]
mod common;

const EMPLOYEE: &str = "6f1c1b8e-2f43-4a8e-9d63-0d6c3c0f7b11";

fn admin() -> String {
    common::token(UserRole::Admin, None)
}

async fn message(resp: actix_web::dev::ServiceResponse) -> String {
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    body["message"].as_str().unwrap_or_default().to_string()
}

#[actix_web::test]
async fn rejects_unknown_summary_period() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/employees/{EMPLOYEE}/summary?period=week"))
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message(resp).await.contains("Invalid period 'week'"));
}

#[actix_web::test]
async fn rejects_malformed_reference_date() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/employees/{EMPLOYEE}/summary?period=month&date=2024-13-01"
        ))
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
}

#[actix_web::test]
async fn rejects_malformed_json_body() {
    let app = init_app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/absences")
        .insert_header(common::bearer(&admin()))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"employeeId\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
}

#[actix_web::test]
async fn rejects_malformed_path_id() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/employees/not-a-uuid")
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
}

#[actix_web::test]
async fn rejects_unknown_report_kind() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/payroll")
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message(resp).await.contains("Unknown report 'payroll'"));
}

#[actix_web::test]
async fn rejects_inverted_report_range() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/absence-summary?start=2024-05-01&end=2024-04-01")
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rejects_unknown_status_filter() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/employee-absence?status=maybe")
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rejects_absence_hours_out_of_range() {
    let app = init_app!();

    for hours in [30.0, -1.0] {
        let req = test::TestRequest::put()
            .uri("/api/v1/absences")
            .insert_header(common::bearer(&admin()))
            .set_json(json!({
                "employeeId": EMPLOYEE,
                "date": "2024-03-05",
                "absenceTypeId": "V",
                "hours": hours
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{hours}");
    }
}

#[actix_web::test]
async fn rejects_absence_without_type() {
    let app = init_app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/absences")
        .insert_header(common::bearer(&admin()))
        .set_json(json!({
            "employeeId": EMPLOYEE,
            "date": "2024-03-05",
            "absenceTypeId": "  "
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rejects_absence_type_id_wider_than_column() {
    let app = init_app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/absences")
        .insert_header(common::bearer(&admin()))
        .set_json(json!({
            "employeeId": EMPLOYEE,
            "date": "2024-03-05",
            "absenceTypeId": "SICK_LEAVE_EXTENDED"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message(resp).await.contains("longer than 16 characters"));
}

#[actix_web::test]
async fn rejects_employee_without_valid_email() {
    let app = init_app!();

    for (first, last, email, expected) in [
        ("Ada", "Byron", "ada.example.com", "Invalid email address"),
        ("Ada", "Byron", "ada@example", "Invalid email address"),
        (" ", "Byron", "ada@example.com", "First name is required"),
        ("Ada", "", "ada@example.com", "Last name is required"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .insert_header(common::bearer(&admin()))
            .set_json(json!({
                "firstName": first,
                "lastName": last,
                "email": email,
                "companyId": Uuid::new_v4()
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{email}");
        assert!(message(resp).await.contains(expected), "{email}");
    }
}

#[actix_web::test]
async fn admin_must_name_company_for_new_employee() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .insert_header(common::bearer(&admin()))
        .set_json(json!({
            "firstName": "Ada",
            "lastName": "Byron",
            "email": "ada@example.com"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message(resp).await.contains("companyId is required"));
}

#[actix_web::test]
async fn rejects_bad_work_hours_input() {
    let app = init_app!();

    for (input, expected) in [
        ("8h", "Invalid hours input '8h'"),
        ("07:75", "Minutes must be below 60"),
        ("25:00", "At most 24 hours"),
    ] {
        let req = test::TestRequest::put()
            .uri("/api/v1/work-hours")
            .insert_header(common::bearer(&admin()))
            .set_json(json!({
                "employeeId": EMPLOYEE,
                "workDate": "2024-03-05",
                "hoursInput": input
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{input}");
        assert!(message(resp).await.contains(expected), "{input}");
    }
}

#[actix_web::test]
async fn rejects_month_outside_calendar() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/employees/{EMPLOYEE}/monthly-summary?year=2024&month=13"
        ))
        .insert_header(common::bearer(&admin()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rejects_work_group_ending_before_start() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/work-groups")
        .insert_header(common::bearer(&admin()))
        .set_json(json!({
            "name": "Night",
            "startTime": "22:00:00",
            "endTime": "06:00:00",
            "hasRestDay": true,
            "companyId": Uuid::new_v4()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message(resp).await.contains("Shift must end after it starts"));
}
