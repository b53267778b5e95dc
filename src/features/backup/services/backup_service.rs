use chrono::{DateTime, Utc};
use futures::future::join_all;
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::core::error::{AppError, Result};
use crate::features::backup::dtos::BackupDocument;

/// Tables included in the export
pub const BACKUP_TABLES: &[&str] = &[
    "incidents",
    "payments",
    "media_files",
    "profiles",
    "chat_messages",
];

/// Service for the admin backup export
pub struct BackupService {
    pool: PgPool,
}

impl BackupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read every backup table and assemble the export document.
    ///
    /// A single table's read failure does not abort the export; that
    /// table's entry becomes an empty list and the failure is logged.
    pub async fn export(&self) -> BackupDocument {
        let reads = join_all(BACKUP_TABLES.iter().map(|table| self.read_table(table))).await;

        let results: Vec<(&str, Result<Vec<serde_json::Value>>)> =
            BACKUP_TABLES.iter().copied().zip(reads).collect();

        assemble_document(Utc::now(), results)
    }

    async fn read_table(&self, table: &str) -> Result<Vec<serde_json::Value>> {
        // Table names come from the fixed list above, never from input
        let sql = format!("SELECT to_jsonb(t) FROM {} t", table);

        sqlx::query_scalar::<_, serde_json::Value>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to read table '{}' for backup: {:?}", table, e);
                AppError::Database(e)
            })
    }
}

/// Fold per-table read results into the export document, isolating failures
pub fn assemble_document(
    timestamp: DateTime<Utc>,
    results: Vec<(&str, Result<Vec<serde_json::Value>>)>,
) -> BackupDocument {
    let mut tables = BTreeMap::new();

    for (name, result) in results {
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Backup entry for table '{}' left empty: {}", name, e);
                Vec::new()
            }
        };
        tables.insert(name.to_string(), rows);
    }

    BackupDocument {
        timestamp,
        version: env!("CARGO_PKG_VERSION").to_string(),
        tables,
    }
}

/// Attachment filename of the form `backup_<date>_<time>.json`
pub fn attachment_filename(timestamp: DateTime<Utc>) -> String {
    format!("backup_{}.json", timestamp.format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_failing_table_becomes_empty_entry() {
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let results = vec![
            ("incidents", Ok(vec![json!({"id": 1}), json!({"id": 2})])),
            (
                "payments",
                Err(AppError::Internal("relation is on fire".to_string())),
            ),
            ("profiles", Ok(vec![json!({"account_id": "a"})])),
        ];

        let document = assemble_document(timestamp, results);

        assert_eq!(document.tables.len(), 3);
        assert_eq!(document.tables["incidents"].len(), 2);
        assert!(document.tables["payments"].is_empty());
        assert_eq!(document.tables["profiles"].len(), 1);
    }

    #[test]
    fn test_document_carries_version_and_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let document = assemble_document(timestamp, Vec::new());

        assert_eq!(document.timestamp, timestamp);
        assert_eq!(document.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_attachment_filename_format() {
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 7, 14, 5, 9).unwrap();
        assert_eq!(
            attachment_filename(timestamp),
            "backup_2026-08-07_14-05-09.json"
        );
    }
}
