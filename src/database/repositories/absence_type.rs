use anyhow::Result;
use sqlx::PgPool;

use crate::database::models::AbsenceType;

#[derive(Clone)]
pub struct AbsenceTypeRepository {
    pool: PgPool,
}

impl AbsenceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<AbsenceType>> {
        let types = sqlx::query_as::<_, AbsenceType>(
            r#"
            SELECT
                id,
                name,
                color,
                is_active,
                company_id
            FROM
                absence_types
            WHERE
                is_active = TRUE
            ORDER BY
                name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    /// The active absence type with this id, if any.
    pub async fn find_active(&self, id: &str) -> Result<Option<AbsenceType>> {
        let absence_type = sqlx::query_as::<_, AbsenceType>(
            r#"
            SELECT
                id,
                name,
                color,
                is_active,
                company_id
            FROM
                absence_types
            WHERE
                id = $1
                AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(absence_type)
    }
}
