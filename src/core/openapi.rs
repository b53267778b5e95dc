use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::assistant::{dtos as assistant_dtos, handlers as assistant_handlers};
use crate::features::auth;
use crate::features::backup::handlers as backup_handlers;
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::incidents::{
    dtos as incidents_dtos, handlers as incidents_handlers, models as incidents_models,
};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::features::payments::{dtos as payments_dtos, handlers as payments_handlers};
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::features::statistics::{dtos as statistics_dtos, handlers as statistics_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog (public)
        catalog_handlers::list_areas,
        catalog_handlers::list_classifications,
        // Incidents
        incidents_handlers::create_incident,
        incidents_handlers::list_incidents,
        incidents_handlers::get_incident,
        incidents_handlers::review_incident,
        // Payments
        payments_handlers::create_payment,
        payments_handlers::list_payments,
        payments_handlers::get_payment,
        // Media
        media_handlers::upload_media,
        media_handlers::delete_media,
        // Statistics
        statistics_handlers::get_summary,
        statistics_handlers::get_reporter_statistics,
        statistics_handlers::refresh_statistics,
        // Profiles
        profiles_handlers::get_profile,
        profiles_handlers::upsert_profile,
        // Assistant (public)
        assistant_handlers::chat,
        // Admin
        backup_handlers::export_backup,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            // Catalog
            catalog_dtos::CatalogEntryDto,
            ApiResponse<Vec<catalog_dtos::CatalogEntryDto>>,
            // Incidents
            incidents_models::IncidentPriority,
            incidents_models::IncidentStatus,
            incidents_dtos::CreateIncidentDto,
            incidents_dtos::ReviewIncidentDto,
            incidents_dtos::IncidentResponseDto,
            ApiResponse<incidents_dtos::IncidentResponseDto>,
            ApiResponse<Vec<incidents_dtos::IncidentResponseDto>>,
            // Payments
            payments_dtos::CreatePaymentDto,
            payments_dtos::PaymentResponseDto,
            payments_dtos::LedgerSummaryDto,
            payments_dtos::PaymentLedgerDto,
            ApiResponse<payments_dtos::PaymentResponseDto>,
            ApiResponse<payments_dtos::PaymentLedgerDto>,
            // Media
            media_dtos::UploadMediaDto,
            media_dtos::MediaResponseDto,
            media_dtos::DeleteMediaDto,
            media_dtos::DeleteMediaResponseDto,
            ApiResponse<media_dtos::MediaResponseDto>,
            ApiResponse<media_dtos::DeleteMediaResponseDto>,
            // Statistics
            statistics_dtos::RecentIncidentDto,
            statistics_dtos::ReporterStatisticsDto,
            statistics_dtos::StatisticsStateDto,
            statistics_dtos::StatusSummaryDto,
            ApiResponse<statistics_dtos::StatisticsStateDto>,
            ApiResponse<statistics_dtos::StatusSummaryDto>,
            // Profiles
            profiles_dtos::UpsertProfileDto,
            profiles_dtos::ProfileResponseDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            // Assistant
            assistant_dtos::ChatRole,
            assistant_dtos::ChatMessageDto,
            assistant_dtos::ChatRequestDto,
            assistant_dtos::ChatResponseDto,
            assistant_dtos::ChatFailureDto,
        )
    ),
    tags(
        (name = "catalog", description = "Areas and classifications (public)"),
        (name = "incidents", description = "Incident reporting and review workflow"),
        (name = "payments", description = "Cash-payment ledger"),
        (name = "media", description = "Image/video upload pipeline"),
        (name = "statistics", description = "Aggregated incident statistics"),
        (name = "profiles", description = "Display names for statistics"),
        (name = "assistant", description = "Chat assistant proxy"),
        (name = "admin", description = "Admin endpoints (backup export)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Centinela API",
        version = "0.1.0",
        description = "API documentation for Centinela",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
