use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{ProfileResponseDto, UpsertProfileDto};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::ApiResponse;

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profiles",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "No profile stored for this account"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>, AppError> {
    let profile = service.get(&user.account_id).await?;

    Ok(Json(ApiResponse::success(Some(profile.into()), None, None)))
}

/// Set the caller's display name
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profiles",
    request_body = UpsertProfileDto,
    responses(
        (status = 200, description = "Profile stored", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upsert_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
    Json(dto): Json<UpsertProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.upsert(&user.account_id, &dto.display_name).await?;

    Ok(Json(ApiResponse::success(Some(profile.into()), None, None)))
}
