use sqlx::PgPool;

use crate::repositories::DbResult;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Records which wallet authenticated as which participant.
    pub async fn link_wallet(&self, wallet_address: &str, iracing_id: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (wallet_address, iracing_id)
            VALUES ($1, $2)
            ON CONFLICT (wallet_address)
            DO UPDATE SET iracing_id = EXCLUDED.iracing_id
            "#,
        )
        .bind(wallet_address)
        .bind(iracing_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
