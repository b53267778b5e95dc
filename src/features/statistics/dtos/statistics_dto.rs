use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::incidents::models::IncidentPriority;

/// One entry of the bounded recent-incidents list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecentIncidentDto {
    pub id: Uuid,
    pub title: String,
    pub priority: IncidentPriority,
    pub created_at: DateTime<Utc>,
}

/// Per-reporter summary derived from approved incidents
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReporterStatisticsDto {
    pub account_id: String,
    pub display_name: String,
    pub total: i64,
    pub criticas: i64,
    pub altas: i64,
    pub medias: i64,
    pub bajas: i64,
    /// Most recent incidents, newest first, capped at 5
    pub recent: Vec<RecentIncidentDto>,
}

/// Reporter statistics plus cache metadata.
///
/// When `error` is set the reporters list is the last successful snapshot
/// (stale-but-available), not the current state of the store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatisticsStateDto {
    pub generated_at: Option<DateTime<Utc>>,
    /// Quincena window the aggregation covered, if one was requested
    pub period: Option<String>,
    pub reporters: Vec<ReporterStatisticsDto>,
    pub error: Option<String>,
}

/// Status/priority counters for the dashboard cards
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusSummaryDto {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub criticas: i64,
    pub altas: i64,
    pub medias: i64,
    pub bajas: i64,
}

/// Query parameters for the reporter statistics endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StatisticsQuery {
    /// Quincena window, e.g. "2026-08-Q1"; omitted means all approved history
    pub period: Option<String>,
}
