use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::payments::models::Payment;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Request DTO for registering a cash payment.
///
/// The document photo must have been uploaded through the media pipeline
/// first; its URL is required here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Names must be between 1 and 100 characters"
    ))]
    pub names: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Surnames must be between 1 and 100 characters"
    ))]
    pub surnames: String,

    /// Amount in the ledger currency; must be positive
    pub amount: Decimal,

    #[validate(url(message = "Invalid document photo URL"))]
    pub document_photo_url: String,

    /// When the payment was made; defaults to now
    pub paid_at: Option<DateTime<Utc>>,
}

/// Response DTO for payments
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponseDto {
    pub id: Uuid,
    pub names: String,
    pub surnames: String,
    pub amount: Decimal,
    pub document_photo_url: String,
    pub registering_user: String,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponseDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            names: payment.names,
            surnames: payment.surnames,
            amount: payment.amount,
            document_photo_url: payment.document_photo_url,
            registering_user: payment.registering_user,
            paid_at: payment.paid_at,
            created_at: payment.created_at,
        }
    }
}

/// Count and sum for the quincena window
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LedgerSummaryDto {
    /// The quincena the listing covers, e.g. "2026-08-Q1"
    pub period: String,
    pub count: i64,
    pub total_amount: Decimal,
}

/// Payments page plus the window totals
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentLedgerDto {
    pub payments: Vec<PaymentResponseDto>,
    pub summary: LedgerSummaryDto,
}

/// Query parameters for the payment ledger
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaymentListQuery {
    /// Quincena window, e.g. "2026-08-Q1"; defaults to the current one
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

impl PaymentListQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}
