use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireAdmin;
use crate::features::backup::services::{attachment_filename, BackupService};

/// Export a full backup of the service tables.
///
/// Returns the document as a downloadable JSON attachment. A failing table
/// read leaves that table's entry empty; the export always completes.
#[utoipa::path(
    post,
    path = "/api/admin/backup",
    tag = "admin",
    responses(
        (status = 200, description = "Backup document as a downloadable attachment"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_backup(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<BackupService>>,
) -> Result<Response, AppError> {
    tracing::info!("Backup export requested by {}", user.account_id);

    let document = service.export().await;
    let filename = attachment_filename(document.timestamp);

    let response = (
        StatusCode::OK,
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )],
        Json(document),
    )
        .into_response();

    Ok(response)
}
