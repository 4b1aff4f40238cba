use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Employee, EmployeeInput},
    utils::like_pattern,
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List employees ordered by name, optionally limited to one company.
    ///
    /// `search` matches the full name, the email or the work group name.
    pub async fn list(
        &self,
        company_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<Employee>> {
        let pattern = search
            .filter(|term| !term.trim().is_empty())
            .map(like_pattern);

        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT
                e.*
            FROM
                employees e
                LEFT JOIN work_groups g ON g.id = e.work_group
            WHERE
                ($1::UUID IS NULL OR e.company_id = $1)
                AND (
                    $2::TEXT IS NULL
                    OR (e.first_name || ' ' || e.last_name) ILIKE $2
                    OR e.email ILIKE $2
                    OR g.name ILIKE $2
                )
            ORDER BY
                e.first_name,
                e.last_name
            "#,
        )
        .bind(company_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    pub async fn create(&self, input: &EmployeeInput, company_id: Uuid) -> Result<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO
                employees (first_name, last_name, email, work_group, company_id, department_id)
            VALUES
                ($1, $2, $3, $4, $5, $6)
            RETURNING
                *
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.email.trim())
        .bind(input.work_group)
        .bind(company_id)
        .bind(input.department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &EmployeeInput,
        company_id: Uuid,
    ) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE
                employees
            SET
                first_name = $1,
                last_name = $2,
                email = $3,
                work_group = $4,
                company_id = $5,
                department_id = $6,
                updated_at = NOW()
            WHERE
                id = $7
            RETURNING
                *
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.email.trim())
        .bind(input.work_group)
        .bind(company_id)
        .bind(input.department_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Removes the employee together with their absences and worked hours.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
