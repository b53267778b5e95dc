use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::incidents::models::{Incident, IncidentPriority, IncidentStatus};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::ROOM_CODE_REGEX;

/// Request DTO for submitting an incident
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateIncidentDto {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Description must be between 1 and 5000 characters"
    ))]
    pub description: String,

    /// Area slug from the catalog (e.g. "maintenance")
    pub area: String,

    /// Classification slugs from the catalog; at least one
    #[validate(length(min = 1, message = "At least one classification is required"))]
    pub classification: Vec<String>,

    pub priority: IncidentPriority,

    /// Room code (e.g. "101", "ala-norte-12")
    #[validate(regex(path = *ROOM_CODE_REGEX, message = "Invalid room code"))]
    pub room: String,
}

/// Request DTO for the approval workflow
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewIncidentDto {
    /// Target status: "approved" or "rejected"
    pub status: IncidentStatus,
    pub notes: Option<String>,
}

/// Response DTO for incidents
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncidentResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub area: String,
    pub classification: Vec<String>,
    pub priority: IncidentPriority,
    pub room: String,
    pub reporter: String,
    pub status: IncidentStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Incident> for IncidentResponseDto {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id,
            title: incident.title,
            description: incident.description,
            area: incident.area,
            classification: incident.classification,
            priority: incident.priority,
            room: incident.room,
            reporter: incident.reporter,
            status: incident.status,
            reviewed_by: incident.reviewed_by,
            reviewed_at: incident.reviewed_at,
            review_notes: incident.review_notes,
            created_at: incident.created_at,
            updated_at: incident.updated_at,
        }
    }
}

/// Query parameters for incident listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct IncidentListQuery {
    pub status: Option<IncidentStatus>,
    pub priority: Option<IncidentPriority>,
    /// Area slug filter
    pub area: Option<String>,
    /// Quincena window, e.g. "2026-08-Q1"
    pub period: Option<String>,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl IncidentListQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}
