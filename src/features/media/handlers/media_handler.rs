use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireReporter;
use crate::features::media::dtos::{
    DeleteMediaDto, DeleteMediaResponseDto, MediaResponseDto, UploadMediaDto,
};
use crate::features::media::services::MediaService;
use crate::shared::types::ApiResponse;

/// Upload an image or video
///
/// Accepts multipart/form-data with:
/// - `file`: The media to upload (required)
/// - `caption`: Caption used to derive the stored filename (optional)
///
/// Images are re-encoded; videos are stored as-is. Size limits are enforced
/// before any processing.
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = "media",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "Media upload form with optional caption field",
    ),
    responses(
        (status = 201, description = "Media uploaded successfully", body = ApiResponse<MediaResponseDto>),
        (status = 400, description = "Invalid or oversized file"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "Request body too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_media(
    RequireReporter(user): RequireReporter,
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaResponseDto>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    let mut caption: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                content_type = Some(ct);
            }
            "caption" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read caption field: {}", e))
                })?;
                if !text.is_empty() {
                    caption = Some(text);
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    let response = service
        .upload(file_data, &content_type, caption, &user)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Delete a media object by its path
///
/// Only the uploader (or an admin) can delete it.
#[utoipa::path(
    delete,
    path = "/api/media",
    tag = "media",
    request_body = DeleteMediaDto,
    responses(
        (status = 200, description = "Media deleted successfully", body = ApiResponse<DeleteMediaResponseDto>),
        (status = 400, description = "Invalid path"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not authorized to delete this file"),
        (status = 404, description = "Media not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_media(
    RequireReporter(user): RequireReporter,
    State(service): State<Arc<MediaService>>,
    Json(dto): Json<DeleteMediaDto>,
) -> Result<Json<ApiResponse<DeleteMediaResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete_by_path(&dto.path, &user).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteMediaResponseDto { deleted: true }),
        Some("Media deleted successfully".to_string()),
        None,
    )))
}
