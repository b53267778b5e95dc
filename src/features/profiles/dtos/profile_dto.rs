use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::profiles::models::Profile;

/// Request DTO for setting the caller's display name
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertProfileDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: String,
}

/// Response DTO for profiles
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub account_id: String,
    pub display_name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponseDto {
    fn from(profile: Profile) -> Self {
        Self {
            account_id: profile.account_id,
            display_name: profile.display_name,
            updated_at: profile.updated_at,
        }
    }
}
