mod statistics_handler;

pub use statistics_handler::*;
