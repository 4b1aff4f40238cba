use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Company, Department};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active companies, or just the given one when `company_id` is set
    pub async fn list_active(&self, company_id: Option<Uuid>) -> Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT
                *
            FROM
                companies
            WHERE
                is_active = TRUE
                AND ($1::UUID IS NULL OR id = $1)
            ORDER BY
                name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn list_departments(&self, company_id: Option<Uuid>) -> Result<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT
                *
            FROM
                departments
            WHERE
                is_active = TRUE
                AND ($1::UUID IS NULL OR company_id = $1)
            ORDER BY
                name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }
}
