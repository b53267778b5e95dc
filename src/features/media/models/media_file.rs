use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for uploaded media
#[derive(Debug, Clone, FromRow)]
pub struct MediaFile {
    pub id: Uuid,
    pub file_key: String,
    pub filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub caption: Option<String>,
    pub uploaded_by: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
