pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod sync;

pub use routes::routes;
pub use services::{SnapshotCache, StatisticsService};
pub use sync::{ChangeFeed, RefreshWorker, TableChange};
