mod snapshot_cache;
mod statistics_service;

pub use snapshot_cache::{SnapshotCache, StatsSnapshot};
pub use statistics_service::{SnapshotRefresher, StatisticsService};
