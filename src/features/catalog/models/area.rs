use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operational area an incident belongs to.
///
/// Stored as its slug; every slug maps back exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Reception,
    Housekeeping,
    Maintenance,
    Kitchen,
    Security,
    Administration,
}

impl Area {
    pub const ALL: [Area; 6] = [
        Area::Reception,
        Area::Housekeeping,
        Area::Maintenance,
        Area::Kitchen,
        Area::Security,
        Area::Administration,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Area::Reception => "reception",
            Area::Housekeeping => "housekeeping",
            Area::Maintenance => "maintenance",
            Area::Kitchen => "kitchen",
            Area::Security => "security",
            Area::Administration => "administration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Area::Reception => "Recepción",
            Area::Housekeeping => "Limpieza",
            Area::Maintenance => "Mantenimiento",
            Area::Kitchen => "Cocina",
            Area::Security => "Seguridad",
            Area::Administration => "Administración",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.slug() == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_area_round_trips_through_its_slug() {
        for area in Area::ALL {
            assert_eq!(Area::from_slug(area.slug()), Some(area));
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        assert_eq!(Area::from_slug("garage"), None);
        assert_eq!(Area::from_slug(""), None);
    }
}
