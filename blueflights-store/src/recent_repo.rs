use async_trait::async_trait;
use sqlx::PgPool;

use blueflights_core::place::{FieldRole, Place};
use blueflights_core::repository::RecentSelectionsRepository;

/// One JSONB slot per field role. Origin and destination own distinct keys,
/// so concurrent fields never race on the same row.
pub struct PostgresRecentSelectionsRepository {
    pub pool: PgPool,
}

#[async_trait]
impl RecentSelectionsRepository for PostgresRecentSelectionsRepository {
    async fn load(
        &self,
        role: FieldRole,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT places FROM recent_selections WHERE storage_key = $1")
                .bind(role.storage_key())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(
        &self,
        role: FieldRole,
        places: &[Place],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO recent_selections (storage_key, places, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (storage_key)
            DO UPDATE SET places = EXCLUDED.places, updated_at = now()
            "#,
        )
        .bind(role.storage_key())
        .bind(serde_json::to_value(places)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
