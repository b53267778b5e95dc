use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::statistics::dtos::{StatisticsQuery, StatisticsStateDto, StatusSummaryDto};
use crate::features::statistics::services::{SnapshotCache, StatisticsService};
use crate::shared::periods::Quincena;
use crate::shared::types::ApiResponse;

/// State for statistics handlers
#[derive(Clone)]
pub struct StatisticsState {
    pub service: Arc<StatisticsService>,
    pub cache: Arc<SnapshotCache>,
}

/// Status/priority counters for the dashboard cards
#[utoipa::path(
    get,
    path = "/api/statistics/summary",
    tag = "statistics",
    responses(
        (status = 200, description = "Incident counters", body = ApiResponse<StatusSummaryDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_summary(
    _user: AuthenticatedUser,
    State(state): State<StatisticsState>,
) -> Result<Json<ApiResponse<StatusSummaryDto>>, AppError> {
    let summary = state.service.summary().await?;

    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Per-reporter statistics over approved incidents.
///
/// Without a period this serves the cached snapshot (stale-but-available on
/// refresh failure); with an explicit period the aggregation runs directly
/// against the store.
#[utoipa::path(
    get,
    path = "/api/statistics/reporters",
    tag = "statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Reporter statistics", body = ApiResponse<StatisticsStateDto>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_reporter_statistics(
    _user: AuthenticatedUser,
    State(state): State<StatisticsState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<ApiResponse<StatisticsStateDto>>, AppError> {
    if let Some(raw) = &query.period {
        let period = Quincena::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Invalid period '{}', expected YYYY-MM-Q1/Q2", raw))
        })?;

        let reporters = state.service.reporter_statistics(Some(period)).await?;

        return Ok(Json(ApiResponse::success(
            Some(StatisticsStateDto {
                generated_at: Some(Utc::now()),
                period: Some(period.to_string()),
                reporters,
                error: None,
            }),
            None,
            None,
        )));
    }

    let (snapshot, last_error) = state.cache.read().await;

    let dto = match snapshot {
        Some(snapshot) => StatisticsStateDto {
            generated_at: Some(snapshot.generated_at),
            period: None,
            reporters: snapshot.reporters,
            error: last_error,
        },
        None => {
            // Cold cache: compute once and keep it for the next reader
            let reporters = state.service.reporter_statistics(None).await?;
            state.cache.store(reporters.clone()).await;

            StatisticsStateDto {
                generated_at: Some(Utc::now()),
                period: None,
                reporters,
                error: None,
            }
        }
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Manually recompute the statistics snapshot (retry action)
#[utoipa::path(
    post,
    path = "/api/statistics/refresh",
    tag = "statistics",
    responses(
        (status = 200, description = "Snapshot refreshed", body = ApiResponse<StatisticsStateDto>),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Refresh failed; previous snapshot remains served")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn refresh_statistics(
    _user: AuthenticatedUser,
    State(state): State<StatisticsState>,
) -> Result<Json<ApiResponse<StatisticsStateDto>>, AppError> {
    match state.service.reporter_statistics(None).await {
        Ok(reporters) => {
            state.cache.store(reporters.clone()).await;

            Ok(Json(ApiResponse::success(
                Some(StatisticsStateDto {
                    generated_at: Some(Utc::now()),
                    period: None,
                    reporters,
                    error: None,
                }),
                Some("Snapshot refreshed".to_string()),
                None,
            )))
        }
        Err(e) => {
            state.cache.record_error(e.to_string()).await;
            Err(e)
        }
    }
}
