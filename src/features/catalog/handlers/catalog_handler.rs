use axum::Json;

use crate::features::catalog::dtos::CatalogEntryDto;
use crate::features::catalog::models::{Area, Classification};
use crate::shared::types::ApiResponse;

/// List all operational areas
#[utoipa::path(
    get,
    path = "/api/catalog/areas",
    tag = "catalog",
    responses(
        (status = 200, description = "List of areas", body = ApiResponse<Vec<CatalogEntryDto>>)
    )
)]
pub async fn list_areas() -> Json<ApiResponse<Vec<CatalogEntryDto>>> {
    let entries = Area::ALL
        .into_iter()
        .map(|a| CatalogEntryDto {
            slug: a.slug().to_string(),
            label: a.label().to_string(),
        })
        .collect();

    Json(ApiResponse::success(Some(entries), None, None))
}

/// List all incident classifications
#[utoipa::path(
    get,
    path = "/api/catalog/classifications",
    tag = "catalog",
    responses(
        (status = 200, description = "List of classifications", body = ApiResponse<Vec<CatalogEntryDto>>)
    )
)]
pub async fn list_classifications() -> Json<ApiResponse<Vec<CatalogEntryDto>>> {
    let entries = Classification::ALL
        .into_iter()
        .map(|c| CatalogEntryDto {
            slug: c.slug().to_string(),
            label: c.label().to_string(),
        })
        .collect();

    Json(ApiResponse::success(Some(entries), None, None))
}
