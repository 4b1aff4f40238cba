use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{AbsenceFilter, AbsenceRecord, AbsenceStatus, UpsertAbsenceInput},
    utils::{Conditions, sql},
};

#[derive(Clone)]
pub struct AbsenceRepository {
    pool: PgPool,
}

impl AbsenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List absence records matching every filter that is set, newest first
    pub async fn list(&self, filter: &AbsenceFilter) -> Result<Vec<AbsenceRecord>> {
        let mut conditions = Conditions::new();
        if filter.employee_id.is_some() {
            conditions.push("employee_id = ?");
        }
        if filter.company_id.is_some() {
            conditions.push("employee_id IN (SELECT id FROM employees WHERE company_id = ?)");
        }
        if filter.status.is_some() {
            conditions.push("status = ?");
        }
        if filter.start_date.is_some() {
            conditions.push("date >= ?");
        }
        if filter.end_date.is_some() {
            conditions.push("date <= ?");
        }

        let query = sql(&format!(
            r#"
            SELECT
                id,
                employee_id,
                absence_type_id,
                date,
                hours,
                status,
                created_at
            FROM
                absence_records
            {}
            ORDER BY
                date DESC
            "#,
            conditions.where_clause()
        ));

        let mut prepared = sqlx::query_as::<_, AbsenceRecord>(&query);
        if let Some(employee_id) = filter.employee_id {
            prepared = prepared.bind(employee_id);
        }
        if let Some(company_id) = filter.company_id {
            prepared = prepared.bind(company_id);
        }
        if let Some(status) = &filter.status {
            prepared = prepared.bind(status.clone());
        }
        if let Some(start_date) = filter.start_date {
            prepared = prepared.bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            prepared = prepared.bind(end_date);
        }

        let records = prepared.fetch_all(&self.pool).await?;

        Ok(records)
    }

    /// Approved records for one employee, the input of the summary aggregation
    pub async fn approved_for_employee(&self, employee_id: Uuid) -> Result<Vec<AbsenceRecord>> {
        self.list(&AbsenceFilter {
            employee_id: Some(employee_id),
            status: Some(AbsenceStatus::Approved),
            ..AbsenceFilter::default()
        })
        .await
    }

    /// Set the absence for one employee and day, replacing any existing entry
    pub async fn upsert(&self, input: &UpsertAbsenceInput) -> Result<AbsenceRecord> {
        let record = sqlx::query_as::<_, AbsenceRecord>(
            r#"
            INSERT INTO
                absence_records (
                    employee_id,
                    absence_type_id,
                    date,
                    hours,
                    status
                )
            VALUES
                ($1, $2, $3, $4, $5)
            ON CONFLICT (employee_id, date) DO UPDATE
            SET
                absence_type_id = EXCLUDED.absence_type_id,
                hours = EXCLUDED.hours,
                status = EXCLUDED.status
            RETURNING
                id,
                employee_id,
                absence_type_id,
                date,
                hours,
                status,
                created_at
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.absence_type_id)
        .bind(input.date)
        .bind(input.hours())
        .bind(input.status())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Clear the absence for one employee and day. Returns false when nothing was set
    pub async fn delete_day(&self, employee_id: Uuid, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query("DELETE FROM absence_records WHERE employee_id = $1 AND date = $2")
            .bind(employee_id)
            .bind(date)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
