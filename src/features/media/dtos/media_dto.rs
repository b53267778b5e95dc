use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Upload media request DTO for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// The image or video to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Caption used to derive the stored filename
    #[schema(example = "Recibo de pago de Juan")]
    pub caption: Option<String>,
}

/// Response DTO for a completed upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaResponseDto {
    pub id: Uuid,
    /// Public URL of the stored object
    pub url: String,
    /// Object path (year/month/filename), used for deletion
    pub path: String,
    pub filename: String,
    /// Size in bytes after processing
    pub size: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for deleting media by path
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteMediaDto {
    #[validate(length(min = 1, message = "path is required"))]
    pub path: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteMediaResponseDto {
    pub deleted: bool,
}
