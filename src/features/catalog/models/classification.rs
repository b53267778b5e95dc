use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Incident classification tag; an incident carries one or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Equipment,
    Safety,
    Cleanliness,
    GuestComplaint,
    Staff,
    Supplies,
}

impl Classification {
    pub const ALL: [Classification; 6] = [
        Classification::Equipment,
        Classification::Safety,
        Classification::Cleanliness,
        Classification::GuestComplaint,
        Classification::Staff,
        Classification::Supplies,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Classification::Equipment => "equipment",
            Classification::Safety => "safety",
            Classification::Cleanliness => "cleanliness",
            Classification::GuestComplaint => "guest_complaint",
            Classification::Staff => "staff",
            Classification::Supplies => "supplies",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Equipment => "Equipamiento",
            Classification::Safety => "Seguridad laboral",
            Classification::Cleanliness => "Higiene",
            Classification::GuestComplaint => "Queja de huésped",
            Classification::Staff => "Personal",
            Classification::Supplies => "Insumos",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_classification_round_trips_through_its_slug() {
        for classification in Classification::ALL {
            assert_eq!(
                Classification::from_slug(classification.slug()),
                Some(classification)
            );
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        assert_eq!(Classification::from_slug("weather"), None);
    }
}
