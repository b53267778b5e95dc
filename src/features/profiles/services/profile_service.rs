use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::profiles::models::Profile;

/// Service for the mirrored display-name table
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by account id
    pub async fn get(&self, account_id: &str) -> Result<Profile> {
        let profile =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch profile: {:?}", e);
                    AppError::Database(e)
                })?;

        profile.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// Create or update the display name for an account
    pub async fn upsert(&self, account_id: &str, display_name: &str) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (account_id, display_name)
            VALUES ($1, $2)
            ON CONFLICT (account_id)
            DO UPDATE SET display_name = EXCLUDED.display_name, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert profile: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(profile)
    }
}
