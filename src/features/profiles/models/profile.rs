use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Display name mirrored from the identity provider.
///
/// Statistics fall back to a truncated account id when no row exists.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub account_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
