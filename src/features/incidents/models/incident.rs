use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Incident priority enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "incident_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentPriority {
    Critica,
    Alta,
    Media,
    Baja,
}

impl std::fmt::Display for IncidentPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentPriority::Critica => write!(f, "critica"),
            IncidentPriority::Alta => write!(f, "alta"),
            IncidentPriority::Media => write!(f, "media"),
            IncidentPriority::Baja => write!(f, "baja"),
        }
    }
}

/// Incident status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "incident_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentStatus::Pending => write!(f, "pending"),
            IncidentStatus::Approved => write!(f, "approved"),
            IncidentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Database model for incident
#[derive(Debug, Clone, FromRow)]
pub struct Incident {
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
