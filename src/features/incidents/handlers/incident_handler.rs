use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::{RequireReporter, RequireSupervisor};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::incidents::dtos::{
    CreateIncidentDto, IncidentListQuery, IncidentResponseDto, ReviewIncidentDto,
};
use crate::features::incidents::services::IncidentService;
use crate::shared::periods::Quincena;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a new incident
#[utoipa::path(
    post,
    path = "/api/incidents",
    tag = "incidents",
    request_body = CreateIncidentDto,
    responses(
        (status = 201, description = "Incident created", body = ApiResponse<IncidentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_incident(
    RequireReporter(user): RequireReporter,
    State(service): State<Arc<IncidentService>>,
    Json(dto): Json<CreateIncidentDto>,
) -> Result<(StatusCode, Json<ApiResponse<IncidentResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let incident = service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(incident.into()), None, None)),
    ))
}

/// List incidents with optional filters
#[utoipa::path(
    get,
    path = "/api/incidents",
    tag = "incidents",
    params(IncidentListQuery),
    responses(
        (status = 200, description = "List of incidents", body = ApiResponse<Vec<IncidentResponseDto>>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_incidents(
    _user: AuthenticatedUser,
    State(service): State<Arc<IncidentService>>,
    Query(query): Query<IncidentListQuery>,
) -> Result<Json<ApiResponse<Vec<IncidentResponseDto>>>, AppError> {
    let period = match &query.period {
        Some(raw) => Some(Quincena::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Invalid period '{}', expected YYYY-MM-Q1/Q2", raw))
        })?),
        None => None,
    };

    let (incidents, total) = service
        .list(
            query.status,
            query.priority,
            query.area.as_deref(),
            period,
            query.offset(),
            query.limit(),
        )
        .await?;

    let items = incidents.into_iter().map(IncidentResponseDto::from).collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single incident
#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    tag = "incidents",
    params(
        ("id" = Uuid, Path, description = "Incident id")
    ),
    responses(
        (status = 200, description = "Incident detail", body = ApiResponse<IncidentResponseDto>),
        (status = 404, description = "Incident not found"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_incident(
    _user: AuthenticatedUser,
    State(service): State<Arc<IncidentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IncidentResponseDto>>, AppError> {
    let incident = service.get_by_id(id).await?;

    Ok(Json(ApiResponse::success(Some(incident.into()), None, None)))
}

/// Approve or reject a pending incident
#[utoipa::path(
    post,
    path = "/api/incidents/{id}/review",
    tag = "incidents",
    params(
        ("id" = Uuid, Path, description = "Incident id")
    ),
    request_body = ReviewIncidentDto,
    responses(
        (status = 200, description = "Incident reviewed", body = ApiResponse<IncidentResponseDto>),
        (status = 400, description = "Invalid review status"),
        (status = 403, description = "Supervisor access required"),
        (status = 404, description = "Incident not found"),
        (status = 409, description = "Incident already reviewed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn review_incident(
    RequireSupervisor(user): RequireSupervisor,
    State(service): State<Arc<IncidentService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<ReviewIncidentDto>,
) -> Result<Json<ApiResponse<IncidentResponseDto>>, AppError> {
    let incident = service.review(id, dto, &user).await?;

    Ok(Json(ApiResponse::success(
        Some(incident.into()),
        Some("Incident reviewed".to_string()),
        None,
    )))
}
