use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{WorkGroup, WorkGroupInput};

#[derive(Clone)]
pub struct WorkGroupRepository {
    pool: PgPool,
}

impl WorkGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, company_id: Option<Uuid>) -> Result<Vec<WorkGroup>> {
        let groups = sqlx::query_as::<_, WorkGroup>(
            r#"
            SELECT
                *
            FROM
                work_groups
            WHERE
                $1::UUID IS NULL OR company_id = $1 OR company_id IS NULL
            ORDER BY
                name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<WorkGroup>> {
        let group = sqlx::query_as::<_, WorkGroup>("SELECT * FROM work_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(group)
    }

    pub async fn create(&self, input: &WorkGroupInput) -> Result<WorkGroup> {
        let group = sqlx::query_as::<_, WorkGroup>(
            r#"
            INSERT INTO
                work_groups (name, start_time, end_time, has_rest_day, company_id)
            VALUES
                ($1, $2, $3, $4, $5)
            RETURNING
                *
            "#,
        )
        .bind(&input.name)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.has_rest_day)
        .bind(input.company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    pub async fn update(&self, id: i32, input: &WorkGroupInput) -> Result<Option<WorkGroup>> {
        let group = sqlx::query_as::<_, WorkGroup>(
            r#"
            UPDATE
                work_groups
            SET
                name = $1,
                start_time = $2,
                end_time = $3,
                has_rest_day = $4,
                company_id = $5
            WHERE
                id = $6
            RETURNING
                *
            "#,
        )
        .bind(&input.name)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.has_rest_day)
        .bind(input.company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM work_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
