use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::media::dtos::MediaResponseDto;
use crate::features::media::models::MediaFile;
use crate::modules::storage::ObjectStore;

use super::media_pipeline::{classify, object_path, process, validate_size};

/// Service for media upload and deletion
pub struct MediaService {
    pool: PgPool,
    store: Arc<ObjectStore>,
}

impl MediaService {
    pub fn new(pool: PgPool, store: Arc<ObjectStore>) -> Self {
        Self { pool, store }
    }

    /// Run an upload through the pipeline, store the result and record
    /// its metadata.
    ///
    /// Upload failure is not retried here; it propagates so the caller can
    /// surface it and allow a manual re-attempt.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        content_type: &str,
        caption: Option<String>,
        user: &AuthenticatedUser,
    ) -> Result<MediaResponseDto> {
        let kind = classify(content_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported content type '{}'", content_type))
        })?;

        validate_size(kind, data.len())?;

        let processed = process(kind, data, content_type)?;
        let file_size = processed.data.len() as i64;

        let now = Utc::now();
        let (filename, path) =
            object_path(caption.as_deref().unwrap_or(""), &processed.extension, now);
        let file_key = self.store.generate_key(&path);

        self.store
            .upload(&file_key, processed.data, &processed.content_type)
            .await?;

        debug!("Media uploaded to object store: {}", file_key);

        let url = self.store.public_url(&file_key);

        let media = sqlx::query_as::<_, MediaFile>(
            r#"
            INSERT INTO media_files (file_key, filename, content_type, file_size, url, caption, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&file_key)
        .bind(&filename)
        .bind(&processed.content_type)
        .bind(file_size)
        .bind(&url)
        .bind(&caption)
        .bind(&user.account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save media metadata: {:?}", e);
            AppError::Database(e)
        })?;

        info!(
            "Media metadata saved: id={}, key={}, size={}",
            media.id, media.file_key, media.file_size
        );

        Ok(MediaResponseDto {
            id: media.id,
            url: media.url,
            path,
            filename: media.filename,
            size: media.file_size,
            mime_type: media.content_type,
            created_at: media.created_at,
        })
    }

    /// Delete a media object by its path.
    ///
    /// Only the uploader (or an admin) may delete; the metadata row is
    /// soft-deleted.
    pub async fn delete_by_path(&self, path: &str, user: &AuthenticatedUser) -> Result<()> {
        let file_key = self.store.generate_key(path);

        let media = sqlx::query_as::<_, MediaFile>(
            "SELECT * FROM media_files WHERE file_key = $1 AND is_active = TRUE",
        )
        .bind(&file_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch media metadata: {:?}", e);
            AppError::Database(e)
        })?;

        let media = media.ok_or_else(|| AppError::NotFound("Media not found".to_string()))?;

        if media.uploaded_by != user.account_id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this file".to_string(),
            ));
        }

        self.store.delete(&media.file_key).await?;

        debug!("Media deleted from object store: {}", media.file_key);

        sqlx::query(
            "UPDATE media_files SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(media.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to soft delete media metadata: {:?}", e);
            AppError::Database(e)
        })?;

        info!("Media soft deleted: id={}, key={}", media.id, media.file_key);

        Ok(())
    }
}
