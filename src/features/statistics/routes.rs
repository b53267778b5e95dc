use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::statistics::handlers::{self, StatisticsState};
use crate::features::statistics::services::{SnapshotCache, StatisticsService};

/// Create routes for the statistics feature
pub fn routes(service: Arc<StatisticsService>, cache: Arc<SnapshotCache>) -> Router {
    let state = StatisticsState { service, cache };

    Router::new()
        .route("/api/statistics/summary", get(handlers::get_summary))
        .route(
            "/api/statistics/reporters",
            get(handlers::get_reporter_statistics),
        )
        .route(
            "/api/statistics/refresh",
            post(handlers::refresh_statistics),
        )
        .with_state(state)
}
