use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::features::statistics::dtos::ReporterStatisticsDto;

/// One successfully computed aggregation
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub reporters: Vec<ReporterStatisticsDto>,
}

#[derive(Default)]
struct CacheState {
    snapshot: Option<StatsSnapshot>,
    last_error: Option<String>,
}

/// Shared cache for the reporter-statistics snapshot.
///
/// A failed refresh records the error but keeps the previous snapshot in
/// place, so readers always get the last data that was good.
pub struct SnapshotCache {
    state: RwLock<CacheState>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
        }
    }

    pub async fn store(&self, reporters: Vec<ReporterStatisticsDto>) {
        let mut state = self.state.write().await;
        state.snapshot = Some(StatsSnapshot {
            generated_at: Utc::now(),
            reporters,
        });
        state.last_error = None;
    }

    pub async fn record_error(&self, error: String) {
        let mut state = self.state.write().await;
        state.last_error = Some(error);
    }

    pub async fn read(&self) -> (Option<StatsSnapshot>, Option<String>) {
        let state = self.state.read().await;
        (state.snapshot.clone(), state.last_error.clone())
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let cache = SnapshotCache::new();
        cache.store(Vec::new()).await;

        cache.record_error("connection refused".to_string()).await;

        let (snapshot, error) = cache.read().await;
        assert!(snapshot.is_some());
        assert_eq!(error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_error() {
        let cache = SnapshotCache::new();
        cache.record_error("boom".to_string()).await;

        cache.store(Vec::new()).await;

        let (snapshot, error) = cache.read().await;
        assert!(snapshot.is_some());
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn test_empty_cache_reads_as_nothing() {
        let cache = SnapshotCache::new();
        let (snapshot, error) = cache.read().await;
        assert!(snapshot.is_none());
        assert!(error.is_none());
    }
}
