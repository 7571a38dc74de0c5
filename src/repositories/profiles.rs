use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    models::profile::{RacerProfile, RacerProfileInput},
    repositories::DbResult,
};

#[derive(Clone, Debug)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn upsert(&self, input: &RacerProfileInput) -> DbResult<RacerProfile> {
        let profile = sqlx::query_as::<_, RacerProfile>(
            r#"
            INSERT INTO racer_profiles (iracing_id, display_name, first_name, last_name, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (iracing_id)
            DO UPDATE SET
                display_name = EXCLUDED.display_name,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                updated_at = now()
            RETURNING iracing_id, display_name, first_name, last_name, updated_at
            "#,
        )
        .bind(input.iracing_id)
        .bind(&input.display_name)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn find_by_id(&self, iracing_id: i64) -> DbResult<Option<RacerProfile>> {
        let profile =
            sqlx::query_as::<_, RacerProfile>("SELECT * FROM racer_profiles WHERE iracing_id = $1")
                .bind(iracing_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(profile)
    }

    /// Display names for the given participant ids; absent ids are
    /// simply missing from the map.
    pub async fn display_names(&self, ids: &[i64]) -> DbResult<HashMap<i64, String>> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT iracing_id, display_name FROM racer_profiles WHERE iracing_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
