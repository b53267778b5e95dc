//! Role-based authorization guards.
//!
//! These guards extract the authenticated user and verify they have the
//! required roles.
//!
//! Role hierarchy (from highest to lowest):
//! - admin: full access, including backup export
//! - supervisor: can review incidents and register payments
//! - reporter: can submit incidents and upload media
//!
//! Each higher role includes all permissions of lower roles.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is admin.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Guard for checking if user has supervisor level access.
///
/// Allows users with "admin" or "supervisor" roles. Use this for incident
/// review and payment registration.
pub struct RequireSupervisor(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireSupervisor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_supervisor_access() {
            return Err(AppError::Forbidden(
                "Supervisor access required".to_string(),
            ));
        }

        Ok(RequireSupervisor(user.clone()))
    }
}

/// Guard for checking if user has reporter level access.
///
/// Allows any of the known roles. Use this for incident submission and
/// media upload.
pub struct RequireReporter(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireReporter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_reporter_access() {
            return Err(AppError::Forbidden("Reporter access required".to_string()));
        }

        Ok(RequireReporter(user.clone()))
    }
}
