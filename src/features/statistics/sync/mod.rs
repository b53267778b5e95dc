mod change_feed;
mod refresh_worker;

pub use change_feed::{channel, drain_pending, ChangeFeed, TableChange};
pub use refresh_worker::RefreshWorker;
