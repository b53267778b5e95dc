use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::features::media::handlers::{delete_media, upload_media};
use crate::features::media::services::{MediaService, MAX_VIDEO_BYTES};

/// Create routes for the media feature
pub fn routes(media_service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/media/upload",
            // Allow body size up to the video limit + buffer for multipart overhead
            post(upload_media).layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES + 1024 * 1024)),
        )
        .route("/api/media", delete(delete_media))
        .with_state(media_service)
}
