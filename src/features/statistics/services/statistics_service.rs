use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::incidents::models::IncidentPriority;
use crate::features::statistics::dtos::{
    RecentIncidentDto, ReporterStatisticsDto, StatusSummaryDto,
};
use crate::shared::periods::Quincena;

/// Cap on the per-reporter recent-incidents list
pub const RECENT_LIMIT: usize = 5;

/// Row shape fetched for the reporter aggregation
#[derive(Debug, Clone, FromRow)]
pub struct IncidentStatRow {
    pub id: Uuid,
    pub reporter: String,
    pub title: String,
    pub priority: IncidentPriority,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    total: i64,
    pending: i64,
    approved: i64,
    rejected: i64,
    criticas: i64,
    altas: i64,
    medias: i64,
    bajas: i64,
}

/// Seam between the refresh worker and the aggregation queries
#[async_trait]
pub trait SnapshotRefresher: Send + Sync {
    async fn refresh(&self) -> Result<Vec<ReporterStatisticsDto>>;
}

/// Service for statistics aggregation
pub struct StatisticsService {
    pool: PgPool,
}

impl StatisticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Per-reporter statistics over approved incidents.
    ///
    /// Two read-only queries (rows + display names), then a pure reduction;
    /// deterministic for a given snapshot of the store.
    pub async fn reporter_statistics(
        &self,
        period: Option<Quincena>,
    ) -> Result<Vec<ReporterStatisticsDto>> {
        let window = period.map(|q| q.bounds());
        let window_start = window.map(|(start, _)| start);
        let window_end = window.map(|(_, end)| end);

        let rows = sqlx::query_as::<_, IncidentStatRow>(
            r#"
            SELECT id, reporter, title, priority, created_at
            FROM incidents
            WHERE status = 'approved'
              AND ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch incident rows for statistics: {:?}", e);
            AppError::Database(e)
        })?;

        let mut account_ids: Vec<String> = rows.iter().map(|r| r.reporter.clone()).collect();
        account_ids.sort();
        account_ids.dedup();

        let names = self.resolve_display_names(&account_ids).await?;

        Ok(aggregate_reporters(rows, &names))
    }

    /// Resolve account ids to display names from the mirrored profiles table
    async fn resolve_display_names(
        &self,
        account_ids: &[String],
    ) -> Result<HashMap<String, String>> {
        if account_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT account_id, display_name FROM profiles WHERE account_id = ANY($1)",
        )
        .bind(account_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve display names: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().collect())
    }

    /// Status/priority counters for the dashboard cards
    pub async fn summary(&self) -> Result<StatusSummaryDto> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE status = 'approved' AND priority = 'critica') AS criticas,
                COUNT(*) FILTER (WHERE status = 'approved' AND priority = 'alta') AS altas,
                COUNT(*) FILTER (WHERE status = 'approved' AND priority = 'media') AS medias,
                COUNT(*) FILTER (WHERE status = 'approved' AND priority = 'baja') AS bajas
            FROM incidents
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get summary counts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(StatusSummaryDto {
            total: row.total,
            pending: row.pending,
            approved: row.approved,
            rejected: row.rejected,
            criticas: row.criticas,
            altas: row.altas,
            medias: row.medias,
            bajas: row.bajas,
        })
    }
}

#[async_trait]
impl SnapshotRefresher for StatisticsService {
    async fn refresh(&self) -> Result<Vec<ReporterStatisticsDto>> {
        self.reporter_statistics(None).await
    }
}

/// Group fetched rows by reporter and reduce into per-reporter counters plus
/// a bounded recent list. Rows must arrive newest-first.
pub fn aggregate_reporters(
    rows: Vec<IncidentStatRow>,
    names: &HashMap<String, String>,
) -> Vec<ReporterStatisticsDto> {
    let mut stats: Vec<ReporterStatisticsDto> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let idx = match index.get(&row.reporter) {
            Some(&i) => i,
            None => {
                let display_name = names
                    .get(&row.reporter)
                    .cloned()
                    .unwrap_or_else(|| truncate_account_id(&row.reporter));

                stats.push(ReporterStatisticsDto {
                    account_id: row.reporter.clone(),
                    display_name,
                    total: 0,
                    criticas: 0,
                    altas: 0,
                    medias: 0,
                    bajas: 0,
                    recent: Vec::new(),
                });
                index.insert(row.reporter.clone(), stats.len() - 1);
                stats.len() - 1
            }
        };

        let entry = &mut stats[idx];
        entry.total += 1;
        match row.priority {
            IncidentPriority::Critica => entry.criticas += 1,
            IncidentPriority::Alta => entry.altas += 1,
            IncidentPriority::Media => entry.medias += 1,
            IncidentPriority::Baja => entry.bajas += 1,
        }

        // Rows are newest-first, so the first RECENT_LIMIT per reporter win
        if entry.recent.len() < RECENT_LIMIT {
            entry.recent.push(RecentIncidentDto {
                id: row.id,
                title: row.title,
                priority: row.priority,
                created_at: row.created_at,
            });
        }
    }

    stats.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    stats
}

/// Fallback shown when the profiles table has no row for a reporter
pub fn truncate_account_id(account_id: &str) -> String {
    if account_id.chars().count() <= 8 {
        account_id.to_string()
    } else {
        let prefix: String = account_id.chars().take(8).collect();
        format!("{}…", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn row(
        reporter: &str,
        priority: IncidentPriority,
        minutes_ago: i64,
    ) -> IncidentStatRow {
        let base = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        IncidentStatRow {
            id: Uuid::new_v4(),
            reporter: reporter.to_string(),
            title: format!("incident-{}", minutes_ago),
            priority,
            created_at: base - chrono::Duration::minutes(minutes_ago),
        }
    }

    /// Build a newest-first row list, the order the query returns
    fn newest_first(mut rows: Vec<IncidentStatRow>) -> Vec<IncidentStatRow> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    #[test]
    fn test_totals_equal_sum_of_priority_counts() {
        let rows = newest_first(vec![
            row("ana", IncidentPriority::Critica, 1),
            row("ana", IncidentPriority::Critica, 2),
            row("ana", IncidentPriority::Alta, 3),
            row("ana", IncidentPriority::Media, 4),
            row("ana", IncidentPriority::Baja, 5),
        ]);

        let stats = aggregate_reporters(rows, &HashMap::new());
        assert_eq!(stats.len(), 1);

        let ana = &stats[0];
        assert_eq!(ana.total, 5);
        assert_eq!(
            ana.criticas + ana.altas + ana.medias + ana.bajas,
            ana.total
        );
        assert_eq!(ana.criticas, 2);
        assert_eq!(ana.altas, 1);
    }

    #[test]
    fn test_recent_list_is_capped_and_newest_first() {
        let rows = newest_first(
            (0..8)
                .map(|i| row("ana", IncidentPriority::Media, i))
                .collect(),
        );

        let stats = aggregate_reporters(rows, &HashMap::new());
        let recent = &stats[0].recent;

        assert_eq!(recent.len(), RECENT_LIMIT);
        for pair in recent.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        // The newest row made the cut
        assert_eq!(recent[0].title, "incident-0");
    }

    #[test]
    fn test_sorted_by_total_descending_with_name_tiebreak() {
        let rows = newest_first(vec![
            row("busy", IncidentPriority::Alta, 1),
            row("busy", IncidentPriority::Alta, 2),
            row("busy", IncidentPriority::Alta, 3),
            row("zeta", IncidentPriority::Baja, 4),
            row("alfa", IncidentPriority::Baja, 5),
        ]);

        let stats = aggregate_reporters(rows, &HashMap::new());
        assert_eq!(stats[0].account_id, "busy");
        // Tie on total=1 resolves by display name ascending
        assert_eq!(stats[1].account_id, "alfa");
        assert_eq!(stats[2].account_id, "zeta");
    }

    #[test]
    fn test_display_name_resolution_with_truncated_fallback() {
        let display_name: String = Name().fake();
        let mut names = HashMap::new();
        names.insert("account-with-profile".to_string(), display_name.clone());

        let rows = newest_first(vec![
            row("account-with-profile", IncidentPriority::Media, 1),
            row("account-without-profile", IncidentPriority::Media, 2),
        ]);

        let stats = aggregate_reporters(rows, &names);
        let known = stats
            .iter()
            .find(|s| s.account_id == "account-with-profile")
            .unwrap();
        let unknown = stats
            .iter()
            .find(|s| s.account_id == "account-without-profile")
            .unwrap();

        assert_eq!(known.display_name, display_name);
        assert_eq!(unknown.display_name, "account-…");
    }

    #[test]
    fn test_truncate_short_account_id_unchanged() {
        assert_eq!(truncate_account_id("abc"), "abc");
        assert_eq!(truncate_account_id("12345678"), "12345678");
        assert_eq!(truncate_account_id("123456789"), "12345678…");
    }

    #[test]
    fn test_empty_rows_produce_empty_stats() {
        let stats = aggregate_reporters(Vec::new(), &HashMap::new());
        assert!(stats.is_empty());
    }
}
