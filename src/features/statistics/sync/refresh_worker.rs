use std::sync::Arc;
use tokio::sync::mpsc;

use crate::features::statistics::services::{SnapshotCache, SnapshotRefresher};

use super::change_feed::{drain_pending, TableChange};

/// Single consumer of the change feed.
///
/// Wakes on the first queued notification, folds the rest of the burst into
/// the same pass and runs one snapshot refresh. Exits when every sender half
/// of the feed has been dropped.
pub struct RefreshWorker {
    rx: mpsc::Receiver<TableChange>,
    refresher: Arc<dyn SnapshotRefresher>,
    cache: Arc<SnapshotCache>,
}

impl RefreshWorker {
    pub fn new(
        rx: mpsc::Receiver<TableChange>,
        refresher: Arc<dyn SnapshotRefresher>,
        cache: Arc<SnapshotCache>,
    ) -> Self {
        Self {
            rx,
            refresher,
            cache,
        }
    }

    /// Run the worker loop until the feed closes
    pub async fn run(mut self) {
        tracing::info!("Starting statistics refresh worker");

        while let Some(first) = self.rx.recv().await {
            let coalesced = drain_pending(&mut self.rx);
            tracing::debug!(
                "Refreshing statistics snapshot ({} notifications, first: {:?})",
                coalesced + 1,
                first
            );

            match self.refresher.refresh().await {
                Ok(reporters) => self.cache.store(reporters).await,
                Err(e) => {
                    tracing::error!("Statistics refresh failed: {:?}", e);
                    self.cache.record_error(e.to_string()).await;
                }
            }
        }

        tracing::info!("Change feed closed, statistics refresh worker exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::statistics::dtos::ReporterStatisticsDto;
    use crate::features::statistics::sync::channel;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRefresher {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SnapshotRefresher for CountingRefresher {
        async fn refresh(&self) -> crate::core::error::Result<Vec<ReporterStatisticsDto>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::Internal("refresh failed".to_string()))
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn test_burst_triggers_single_refresh() {
        let (feed, rx) = channel();
        let refresher = Arc::new(CountingRefresher {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = Arc::new(SnapshotCache::new());

        // Queue the whole burst before the worker starts, then close the feed
        for _ in 0..20 {
            feed.publish(TableChange::Incidents);
        }
        drop(feed);

        RefreshWorker::new(rx, refresher.clone(), cache.clone())
            .run()
            .await;

        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        let (snapshot, error) = cache.read().await;
        assert!(snapshot.is_some());
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_records_error_and_keeps_stale_snapshot() {
        let (feed, rx) = channel();
        let refresher = Arc::new(CountingRefresher {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cache = Arc::new(SnapshotCache::new());
        cache.store(Vec::new()).await; // previous successful aggregation

        feed.publish(TableChange::Payments);
        drop(feed);

        RefreshWorker::new(rx, refresher, cache.clone()).run().await;

        let (snapshot, error) = cache.read().await;
        assert!(snapshot.is_some());
        assert!(error.is_some());
    }
}
