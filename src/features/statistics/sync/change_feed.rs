//! Change notifications for the statistics snapshot.
//!
//! Writes to watched tables publish an event here instead of triggering a
//! refetch directly. A single consumer ([`super::RefreshWorker`]) drains the
//! queue and runs at most one refresh per burst; payloads are not inspected,
//! any change means the snapshot is owed a recompute.

use tokio::sync::mpsc;

/// Tables whose changes invalidate the statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableChange {
    Incidents,
    Payments,
}

/// Queue depth before publishers start coalescing at the source.
/// A full queue already guarantees a refresh, so overflow is dropped.
const CHANNEL_CAPACITY: usize = 64;

/// Sender half held by the write-path services
#[derive(Clone)]
pub struct ChangeFeed {
    tx: mpsc::Sender<TableChange>,
}

/// Create the feed and the receiver for the worker
pub fn channel() -> (ChangeFeed, mpsc::Receiver<TableChange>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    (ChangeFeed { tx }, rx)
}

impl ChangeFeed {
    /// Queue a change notification without blocking the write path
    pub fn publish(&self, change: TableChange) {
        match self.tx.try_send(change) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!("Change feed full, coalescing {:?} notification", change);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Change feed closed, dropping {:?} notification", change);
            }
        }
    }
}

/// Drain every queued notification, returning how many were folded into the
/// refresh the caller is about to run.
pub fn drain_pending(rx: &mut mpsc::Receiver<TableChange>) -> usize {
    let mut drained = 0;
    while rx.try_recv().is_ok() {
        drained += 1;
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_coalesces_into_single_drain() {
        let (feed, mut rx) = channel();

        for _ in 0..10 {
            feed.publish(TableChange::Incidents);
        }
        feed.publish(TableChange::Payments);

        // The consumer wakes on the first notification and folds the rest
        let first = rx.recv().await.unwrap();
        assert_eq!(first, TableChange::Incidents);
        assert_eq!(drain_pending(&mut rx), 10);

        // Queue fully drained: nothing left to trigger another refresh
        assert_eq!(drain_pending(&mut rx), 0);
    }

    #[tokio::test]
    async fn test_overflow_never_blocks_the_publisher() {
        let (feed, mut rx) = channel();

        // Far beyond capacity; publish must stay non-blocking
        for _ in 0..1000 {
            feed.publish(TableChange::Incidents);
        }

        let first = rx.recv().await.unwrap();
        assert_eq!(first, TableChange::Incidents);
        let drained = drain_pending(&mut rx);
        assert!(drained < 1000);
    }

    #[tokio::test]
    async fn test_publish_after_receiver_dropped_is_harmless() {
        let (feed, rx) = channel();
        drop(rx);

        feed.publish(TableChange::Payments);
    }
}
