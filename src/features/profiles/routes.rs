use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::profiles::handlers;
use crate::features::profiles::services::ProfileService;

/// Create routes for the profiles feature
pub fn routes(profile_service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::upsert_profile),
        )
        .with_state(profile_service)
}
