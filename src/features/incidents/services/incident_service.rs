use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::catalog::models::{Area, Classification};
use crate::features::incidents::dtos::{CreateIncidentDto, ReviewIncidentDto};
use crate::features::incidents::models::{Incident, IncidentPriority, IncidentStatus};
use crate::features::statistics::sync::{ChangeFeed, TableChange};
use crate::shared::periods::Quincena;

/// Service for incident operations
pub struct IncidentService {
    pool: PgPool,
    change_feed: ChangeFeed,
}

impl IncidentService {
    pub fn new(pool: PgPool, change_feed: ChangeFeed) -> Self {
        Self { pool, change_feed }
    }

    /// Create an incident from a user submission.
    ///
    /// Area and classification slugs must map to catalog entries; the record
    /// starts in pending status.
    pub async fn create(
        &self,
        dto: CreateIncidentDto,
        user: &AuthenticatedUser,
    ) -> Result<Incident> {
        Area::from_slug(&dto.area)
            .ok_or_else(|| AppError::Validation(format!("Unknown area '{}'", dto.area)))?;

        for slug in &dto.classification {
            Classification::from_slug(slug).ok_or_else(|| {
                AppError::Validation(format!("Unknown classification '{}'", slug))
            })?;
        }

        let incident = sqlx::query_as::<_, Incident>(
            r#"
            INSERT INTO incidents (title, description, area, classification, priority, room, reporter)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.area)
        .bind(&dto.classification)
        .bind(dto.priority)
        .bind(&dto.room)
        .bind(&user.account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create incident: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Incident created: id={}, priority={}, reporter={}",
            incident.id,
            incident.priority,
            incident.reporter
        );

        self.change_feed.publish(TableChange::Incidents);

        Ok(incident)
    }

    /// List incidents with optional filters
    /// Returns (incidents, total_count)
    pub async fn list(
        &self,
        status: Option<IncidentStatus>,
        priority: Option<IncidentPriority>,
        area: Option<&str>,
        period: Option<Quincena>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Incident>, i64)> {
        let window = period.map(|q| q.bounds());
        let window_start = window.map(|(start, _)| start);
        let window_end = window.map(|(_, end)| end);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM incidents
            WHERE ($1::incident_status IS NULL OR status = $1)
              AND ($2::incident_priority IS NULL OR priority = $2)
              AND ($3::text IS NULL OR area = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at < $5)
            "#,
        )
        .bind(status)
        .bind(priority)
        .bind(area)
        .bind(window_start)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count incidents: {:?}", e);
            AppError::Database(e)
        })?;

        let incidents = sqlx::query_as::<_, Incident>(
            r#"
            SELECT *
            FROM incidents
            WHERE ($1::incident_status IS NULL OR status = $1)
              AND ($2::incident_priority IS NULL OR priority = $2)
              AND ($3::text IS NULL OR area = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at < $5)
            ORDER BY created_at DESC
            OFFSET $6 LIMIT $7
            "#,
        )
        .bind(status)
        .bind(priority)
        .bind(area)
        .bind(window_start)
        .bind(window_end)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list incidents: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((incidents, total))
    }

    /// Get incident by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Incident> {
        let incident = sqlx::query_as::<_, Incident>("SELECT * FROM incidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch incident: {:?}", e);
                AppError::Database(e)
            })?;

        incident.ok_or_else(|| AppError::NotFound("Incident not found".to_string()))
    }

    /// Apply the approval workflow to a pending incident
    pub async fn review(
        &self,
        id: Uuid,
        dto: ReviewIncidentDto,
        reviewer: &AuthenticatedUser,
    ) -> Result<Incident> {
        if dto.status == IncidentStatus::Pending {
            return Err(AppError::Validation(
                "Review status must be 'approved' or 'rejected'".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Incident>(
            r#"
            UPDATE incidents
            SET status = $2,
                reviewed_by = $3,
                reviewed_at = NOW(),
                review_notes = $4,
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(dto.status)
        .bind(&reviewer.account_id)
        .bind(&dto.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to review incident: {:?}", e);
            AppError::Database(e)
        })?;

        let incident = match updated {
            Some(incident) => incident,
            None => {
                // Distinguish a missing incident from one already reviewed
                let existing = self.get_by_id(id).await?;
                return Err(AppError::Conflict(format!(
                    "Incident is already {}",
                    existing.status
                )));
            }
        };

        tracing::info!(
            "Incident reviewed: id={}, status={}, reviewer={}",
            incident.id,
            incident.status,
            reviewer.account_id
        );

        self.change_feed.publish(TableChange::Incidents);

        Ok(incident)
    }
}
