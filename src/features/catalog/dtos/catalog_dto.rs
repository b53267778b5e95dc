use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One catalog entry (area or classification) as served to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntryDto {
    /// Stable identifier used in incident records
    pub slug: String,
    /// Human-readable label
    pub label: String,
}
