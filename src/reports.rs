//! Tabular absence reports.
//!
//! Each generator works on an in-memory snapshot handed in through
//! [`ReportInput`] and narrowed by a [`ReportFilter`]. Rows come back
//! already sorted for display.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use crate::aggregation::{HOURS_PER_WORKDAY, MonthKey, round_to};
use crate::database::models::{
    AbsenceRecord, AbsenceStatus, AbsenceType, Company, Department, Employee,
};

#[derive(Debug, Error, PartialEq)]
#[error("Unknown report '{0}'")]
pub struct UnknownReportError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    AbsenceSummary,
    EmployeeAbsence,
    AbsenceByType,
    MonthlyHours,
    CompanyOverview,
    DepartmentSummary,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::AbsenceSummary => "absence-summary",
            ReportKind::EmployeeAbsence => "employee-absence",
            ReportKind::AbsenceByType => "absence-by-type",
            ReportKind::MonthlyHours => "monthly-hours",
            ReportKind::CompanyOverview => "company-overview",
            ReportKind::DepartmentSummary => "department-summary",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = UnknownReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absence-summary" => Ok(ReportKind::AbsenceSummary),
            "employee-absence" => Ok(ReportKind::EmployeeAbsence),
            "absence-by-type" => Ok(ReportKind::AbsenceByType),
            "monthly-hours" => Ok(ReportKind::MonthlyHours),
            "company-overview" => Ok(ReportKind::CompanyOverview),
            "department-summary" => Ok(ReportKind::DepartmentSummary),
            _ => Err(UnknownReportError(s.to_string())),
        }
    }
}

/// Department column value. Missing and dangling references stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepartmentName {
    Unassigned,
    Unknown,
    Named(String),
}

impl fmt::Display for DepartmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentName::Unassigned => f.write_str("Unassigned"),
            DepartmentName::Unknown => f.write_str("Unknown"),
            DepartmentName::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for DepartmentName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Snapshot the reports are computed from.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub employees: &'a [Employee],
    pub records: &'a [AbsenceRecord],
    pub absence_types: &'a [AbsenceType],
    pub companies: &'a [Company],
    pub departments: &'a [Department],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilter {
    pub start: NaiveDate,
    pub end: NaiveDate, // inclusive
    pub company_id: Option<Uuid>,
    pub status: Option<AbsenceStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceSummaryRow {
    pub employee: String,
    pub department: DepartmentName,
    pub total_hours: f64,
    pub absence_days: usize,
    pub average_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAbsenceRow {
    pub date: NaiveDate,
    pub employee: String,
    pub department: DepartmentName,
    pub absence_type: String,
    pub hours: f64,
    pub status: AbsenceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceByTypeRow {
    pub absence_type: String,
    pub total_cases: usize,
    pub total_hours: f64,
    pub unique_employees: usize,
    pub average_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHoursRow {
    pub month: MonthKey,
    pub employee: String,
    pub department: DepartmentName,
    pub total_hours: f64,
    pub working_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverviewRow {
    pub company: String,
    pub total_employees: usize,
    pub total_absences: usize,
    pub total_absence_hours: f64,
    pub employees_with_absence: usize,
    pub absence_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummaryRow {
    pub department: DepartmentName,
    pub total_employees: usize,
    pub total_absences: usize,
    pub total_hours: f64,
    pub average_per_employee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    AbsenceSummary(Vec<AbsenceSummaryRow>),
    EmployeeAbsence(Vec<EmployeeAbsenceRow>),
    AbsenceByType(Vec<AbsenceByTypeRow>),
    MonthlyHours(Vec<MonthlyHoursRow>),
    CompanyOverview(Vec<CompanyOverviewRow>),
    DepartmentSummary(Vec<DepartmentSummaryRow>),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            ReportRows::AbsenceSummary(rows) => rows.len(),
            ReportRows::EmployeeAbsence(rows) => rows.len(),
            ReportRows::AbsenceByType(rows) => rows.len(),
            ReportRows::MonthlyHours(rows) => rows.len(),
            ReportRows::CompanyOverview(rows) => rows.len(),
            ReportRows::DepartmentSummary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    pub columns: Vec<&'static str>,
    pub rows: ReportRows,
}

/// Lookup tables shared by the generators.
struct Scope<'a> {
    input: ReportInput<'a>,
    filter: &'a ReportFilter,
    employees: Vec<&'a Employee>,
    records: Vec<&'a AbsenceRecord>,
    employee_index: HashMap<Uuid, &'a Employee>,
}

impl<'a> Scope<'a> {
    fn new(input: ReportInput<'a>, filter: &'a ReportFilter) -> Self {
        let employee_index: HashMap<Uuid, &Employee> =
            input.employees.iter().map(|e| (e.id, e)).collect();

        let employees = input
            .employees
            .iter()
            .filter(|e| filter.company_id.is_none_or(|c| e.company_id == c))
            .collect();

        let records = input
            .records
            .iter()
            .filter(|r| r.date >= filter.start && r.date <= filter.end)
            .filter(|r| filter.status.as_ref().is_none_or(|s| &r.status == s))
            .filter(|r| match filter.company_id {
                Some(company_id) => employee_index
                    .get(&r.employee_id)
                    .is_some_and(|e| e.company_id == company_id),
                None => true,
            })
            .collect();

        Self {
            input,
            filter,
            employees,
            records,
            employee_index,
        }
    }

    fn period(&self) -> String {
        format!("{} to {}", self.filter.start, self.filter.end)
    }

    fn department(&self, employee: &Employee) -> DepartmentName {
        match employee.department_id {
            None => DepartmentName::Unassigned,
            Some(id) => self
                .input
                .departments
                .iter()
                .find(|d| d.id == id)
                .map(|d| DepartmentName::Named(d.name.clone()))
                .unwrap_or(DepartmentName::Unknown),
        }
    }

    fn absence_type_name(&self, type_id: &str) -> String {
        self.input
            .absence_types
            .iter()
            .find(|t| t.id == type_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| type_id.to_string())
    }

    fn in_scope_employee(&self, employee_id: Uuid) -> Option<&'a Employee> {
        self.employee_index
            .get(&employee_id)
            .copied()
            .filter(|e| self.filter.company_id.is_none_or(|c| e.company_id == c))
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

pub fn generate(kind: ReportKind, input: ReportInput<'_>, filter: &ReportFilter) -> Report {
    let scope = Scope::new(input, filter);
    match kind {
        ReportKind::AbsenceSummary => absence_summary(&scope),
        ReportKind::EmployeeAbsence => employee_absence(&scope),
        ReportKind::AbsenceByType => absence_by_type(&scope),
        ReportKind::MonthlyHours => monthly_hours(&scope),
        ReportKind::CompanyOverview => company_overview(&scope),
        ReportKind::DepartmentSummary => department_summary(&scope),
    }
}

fn absence_summary(scope: &Scope<'_>) -> Report {
    let mut rows: Vec<AbsenceSummaryRow> = scope
        .employees
        .iter()
        .map(|employee| {
            let (total_hours, absence_days) = scope
                .records
                .iter()
                .filter(|r| r.employee_id == employee.id)
                .fold((0.0, 0usize), |(hours, days), r| (hours + r.hours, days + 1));

            let average_hours = if absence_days > 0 {
                round_to(total_hours / absence_days as f64, 2)
            } else {
                0.0
            };

            AbsenceSummaryRow {
                employee: employee.full_name(),
                department: scope.department(employee),
                total_hours,
                absence_days,
                average_hours,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        descending(a.total_hours, b.total_hours).then_with(|| a.employee.cmp(&b.employee))
    });

    let company = match scope.filter.company_id {
        Some(id) => scope
            .input
            .companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        None => "All companies".to_string(),
    };

    Report {
        kind: ReportKind::AbsenceSummary,
        title: format!("Absence summary - {}", company),
        description: format!("Employee absence totals for {}", scope.period()),
        columns: vec![
            "Employee",
            "Department",
            "Total hours",
            "Absence days",
            "Average hours/day",
        ],
        rows: ReportRows::AbsenceSummary(rows),
    }
}

fn employee_absence(scope: &Scope<'_>) -> Report {
    let mut rows: Vec<EmployeeAbsenceRow> = scope
        .records
        .iter()
        .filter_map(|record| {
            let employee = scope.in_scope_employee(record.employee_id)?;
            Some(EmployeeAbsenceRow {
                date: record.date,
                employee: employee.full_name(),
                department: scope.department(employee),
                absence_type: scope.absence_type_name(&record.absence_type_id),
                hours: record.hours,
                status: record.status.clone(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.employee.cmp(&b.employee)));

    Report {
        kind: ReportKind::EmployeeAbsence,
        title: "Absence details".to_string(),
        description: format!("Every recorded absence for {}", scope.period()),
        columns: vec![
            "Date",
            "Employee",
            "Department",
            "Absence type",
            "Hours",
            "Status",
        ],
        rows: ReportRows::EmployeeAbsence(rows),
    }
}

fn absence_by_type(scope: &Scope<'_>) -> Report {
    #[derive(Default)]
    struct TypeStats {
        cases: usize,
        hours: f64,
        employees: HashSet<Uuid>,
    }

    let mut by_type: BTreeMap<String, TypeStats> = BTreeMap::new();
    for record in &scope.records {
        let stats = by_type
            .entry(scope.absence_type_name(&record.absence_type_id))
            .or_default();
        stats.cases += 1;
        stats.hours += record.hours;
        stats.employees.insert(record.employee_id);
    }

    let mut rows: Vec<AbsenceByTypeRow> = by_type
        .into_iter()
        .map(|(absence_type, stats)| AbsenceByTypeRow {
            absence_type,
            total_cases: stats.cases,
            total_hours: stats.hours,
            unique_employees: stats.employees.len(),
            average_hours: if stats.cases > 0 {
                round_to(stats.hours / stats.cases as f64, 2)
            } else {
                0.0
            },
        })
        .collect();

    rows.sort_by(|a, b| b.total_cases.cmp(&a.total_cases));

    Report {
        kind: ReportKind::AbsenceByType,
        title: "Absences by type".to_string(),
        description: format!("Absences grouped by type for {}", scope.period()),
        columns: vec![
            "Absence type",
            "Cases",
            "Total hours",
            "Unique employees",
            "Average hours",
        ],
        rows: ReportRows::AbsenceByType(rows),
    }
}

fn monthly_hours(scope: &Scope<'_>) -> Report {
    let mut by_month: BTreeMap<(MonthKey, Uuid), f64> = BTreeMap::new();
    for record in &scope.records {
        *by_month
            .entry((MonthKey::of(record.date), record.employee_id))
            .or_insert(0.0) += record.hours;
    }

    let mut rows: Vec<MonthlyHoursRow> = by_month
        .into_iter()
        .filter_map(|((month, employee_id), total_hours)| {
            let employee = scope.in_scope_employee(employee_id)?;
            Some(MonthlyHoursRow {
                month,
                employee: employee.full_name(),
                department: scope.department(employee),
                total_hours,
                working_days: (total_hours / HOURS_PER_WORKDAY).ceil() as u32,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.employee.cmp(&b.employee)));

    Report {
        kind: ReportKind::MonthlyHours,
        title: "Monthly absence hours".to_string(),
        description: format!("Absence hours per employee and month for {}", scope.period()),
        columns: vec![
            "Month",
            "Employee",
            "Department",
            "Total hours",
            "Working days (8h)",
        ],
        rows: ReportRows::MonthlyHours(rows),
    }
}

fn company_overview(scope: &Scope<'_>) -> Report {
    let mut rows: Vec<CompanyOverviewRow> = scope
        .input
        .companies
        .iter()
        .filter(|c| scope.filter.company_id.is_none_or(|id| c.id == id))
        .map(|company| {
            let total_employees = scope
                .input
                .employees
                .iter()
                .filter(|e| e.company_id == company.id)
                .count();

            let company_records: Vec<&AbsenceRecord> = scope
                .records
                .iter()
                .copied()
                .filter(|r| {
                    scope
                        .employee_index
                        .get(&r.employee_id)
                        .is_some_and(|e| e.company_id == company.id)
                })
                .collect();

            let total_absence_hours: f64 = company_records.iter().map(|r| r.hours).sum();
            let employees_with_absence = company_records
                .iter()
                .map(|r| r.employee_id)
                .collect::<HashSet<_>>()
                .len();

            let absence_rate = if total_employees > 0 {
                round_to(
                    employees_with_absence as f64 / total_employees as f64 * 100.0,
                    2,
                )
            } else {
                0.0
            };

            CompanyOverviewRow {
                company: company.name.clone(),
                total_employees,
                total_absences: company_records.len(),
                total_absence_hours,
                employees_with_absence,
                absence_rate,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        descending(a.absence_rate, b.absence_rate).then_with(|| a.company.cmp(&b.company))
    });

    Report {
        kind: ReportKind::CompanyOverview,
        title: "Company overview".to_string(),
        description: format!("Absences compared across companies for {}", scope.period()),
        columns: vec![
            "Company",
            "Total employees",
            "Total absences",
            "Total hours",
            "Employees with absence",
            "Absence rate",
        ],
        rows: ReportRows::CompanyOverview(rows),
    }
}

fn department_summary(scope: &Scope<'_>) -> Report {
    #[derive(Default)]
    struct DepartmentStats {
        employees: usize,
        absences: usize,
        hours: f64,
    }

    let mut by_department: BTreeMap<DepartmentName, DepartmentStats> = BTreeMap::new();
    for employee in &scope.employees {
        by_department
            .entry(scope.department(employee))
            .or_default()
            .employees += 1;
    }

    for record in &scope.records {
        let Some(employee) = scope.in_scope_employee(record.employee_id) else {
            continue;
        };
        if let Some(stats) = by_department.get_mut(&scope.department(employee)) {
            stats.absences += 1;
            stats.hours += record.hours;
        }
    }

    let mut rows: Vec<DepartmentSummaryRow> = by_department
        .into_iter()
        .map(|(department, stats)| DepartmentSummaryRow {
            department,
            total_employees: stats.employees,
            total_absences: stats.absences,
            total_hours: stats.hours,
            average_per_employee: if stats.employees > 0 {
                round_to(stats.hours / stats.employees as f64, 2)
            } else {
                0.0
            },
        })
        .collect();

    rows.sort_by(|a, b| descending(a.total_hours, b.total_hours));

    Report {
        kind: ReportKind::DepartmentSummary,
        title: "Department summary".to_string(),
        description: format!("Absences per department for {}", scope.period()),
        columns: vec![
            "Department",
            "Total employees",
            "Total absences",
            "Total hours",
            "Average hours per employee",
        ],
        rows: ReportRows::DepartmentSummary(rows),
    }
}
