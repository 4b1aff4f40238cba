use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{MonthlyHoursSummary, WorkHoursEntry, WorkHoursInput};

#[derive(Clone)]
pub struct WorkHoursRepository {
    pool: PgPool,
}

impl WorkHoursRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store the hours worked on one day, replacing an earlier entry for that day
    pub async fn upsert(&self, input: &WorkHoursInput, hours_worked: f64) -> Result<WorkHoursEntry> {
        let entry = sqlx::query_as::<_, WorkHoursEntry>(
            r#"
            INSERT INTO
                work_hours (employee_id, work_date, hours_input, hours_worked)
            VALUES
                ($1, $2, $3, $4)
            ON CONFLICT (employee_id, work_date) DO UPDATE
            SET
                hours_input = EXCLUDED.hours_input,
                hours_worked = EXCLUDED.hours_worked,
                updated_at = NOW()
            RETURNING
                *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.work_date)
        .bind(input.hours_input.trim())
        .bind(hours_worked)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn list(
        &self,
        employee_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<WorkHoursEntry>> {
        let entries = sqlx::query_as::<_, WorkHoursEntry>(
            r#"
            SELECT
                *
            FROM
                work_hours
            WHERE
                employee_id = $1
                AND ($2::DATE IS NULL OR work_date >= $2)
                AND ($3::DATE IS NULL OR work_date <= $3)
            ORDER BY
                work_date
            "#,
        )
        .bind(employee_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn monthly_summary(
        &self,
        employee_id: Uuid,
        year: i32,
        month: i32,
    ) -> Result<Option<MonthlyHoursSummary>> {
        let summary = sqlx::query_as::<_, MonthlyHoursSummary>(
            r#"
            SELECT
                *
            FROM
                monthly_hours_summary
            WHERE
                employee_id = $1
                AND year = $2
                AND month = $3
            "#,
        )
        .bind(employee_id)
        .bind(year)
        .bind(month)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }
}
