use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireSupervisor;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::payments::dtos::{
    CreatePaymentDto, LedgerSummaryDto, PaymentLedgerDto, PaymentListQuery, PaymentResponseDto,
};
use crate::features::payments::services::PaymentService;
use crate::shared::periods::Quincena;
use crate::shared::types::{ApiResponse, Meta};

/// Register a cash payment
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment registered", body = ApiResponse<PaymentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Supervisor access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_payment(
    RequireSupervisor(user): RequireSupervisor,
    State(service): State<Arc<PaymentService>>,
    Json(dto): Json<CreatePaymentDto>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let payment = service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(payment.into()), None, None)),
    ))
}

/// List payments for a quincena window with ledger totals
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    params(PaymentListQuery),
    responses(
        (status = 200, description = "Payment ledger", body = ApiResponse<PaymentLedgerDto>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_payments(
    _user: AuthenticatedUser,
    State(service): State<Arc<PaymentService>>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<ApiResponse<PaymentLedgerDto>>, AppError> {
    let period = match &query.period {
        Some(raw) => Quincena::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Invalid period '{}', expected YYYY-MM-Q1/Q2", raw))
        })?,
        None => Quincena::current(),
    };

    let (payments, count, total_amount) = service
        .list(period, query.offset(), query.limit())
        .await?;

    let ledger = PaymentLedgerDto {
        payments: payments.into_iter().map(PaymentResponseDto::from).collect(),
        summary: LedgerSummaryDto {
            period: period.to_string(),
            count,
            total_amount,
        },
    };

    Ok(Json(ApiResponse::success(
        Some(ledger),
        None,
        Some(Meta { total: count }),
    )))
}

/// Get a single payment
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = Uuid, Path, description = "Payment id")
    ),
    responses(
        (status = 200, description = "Payment detail", body = ApiResponse<PaymentResponseDto>),
        (status = 404, description = "Payment not found"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_payment(
    _user: AuthenticatedUser,
    State(service): State<Arc<PaymentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PaymentResponseDto>>, AppError> {
    let payment = service.get_by_id(id).await?;

    Ok(Json(ApiResponse::success(Some(payment.into()), None, None)))
}
