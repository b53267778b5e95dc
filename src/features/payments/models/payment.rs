use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a cash payment.
///
/// Rows are append-only: created once the document photo is uploaded,
/// never updated or deleted afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub names: String,
    pub surnames: String,
    pub amount: Decimal,
    pub document_photo_url: String,
    pub registering_user: String,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
