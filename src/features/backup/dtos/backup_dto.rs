use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full export of the backup tables as one downloadable document
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupDocument {
    pub timestamp: DateTime<Utc>,
    /// Service version that produced the export
    pub version: String,
    /// Table name to its rows; a table that failed to read is present
    /// with an empty list
    pub tables: BTreeMap<String, Vec<serde_json::Value>>,
}
