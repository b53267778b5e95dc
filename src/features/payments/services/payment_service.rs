use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::payments::dtos::CreatePaymentDto;
use crate::features::payments::models::Payment;
use crate::features::statistics::sync::{ChangeFeed, TableChange};
use crate::shared::periods::Quincena;

/// Service for the cash-payment ledger
pub struct PaymentService {
    pool: PgPool,
    change_feed: ChangeFeed,
}

impl PaymentService {
    pub fn new(pool: PgPool, change_feed: ChangeFeed) -> Self {
        Self { pool, change_feed }
    }

    /// Register a payment. The row is immutable once written.
    pub async fn create(&self, dto: CreatePaymentDto, user: &AuthenticatedUser) -> Result<Payment> {
        if dto.amount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let paid_at = dto.paid_at.unwrap_or_else(Utc::now);

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (names, surnames, amount, document_photo_url, registering_user, paid_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&dto.names)
        .bind(&dto.surnames)
        .bind(dto.amount)
        .bind(&dto.document_photo_url)
        .bind(&user.account_id)
        .bind(paid_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create payment: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Payment registered: id={}, amount={}, by={}",
            payment.id,
            payment.amount,
            payment.registering_user
        );

        self.change_feed.publish(TableChange::Payments);

        Ok(payment)
    }

    /// List payments in a quincena window, newest first.
    /// Returns (payments, window_count, window_sum)
    pub async fn list(
        &self,
        period: Quincena,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Payment>, i64, Decimal)> {
        let (window_start, window_end) = period.bounds();

        let (count, total_amount) = sqlx::query_as::<_, (i64, Decimal)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(amount), 0)
            FROM payments
            WHERE paid_at >= $1 AND paid_at < $2
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to sum payments: {:?}", e);
            AppError::Database(e)
        })?;

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT *
            FROM payments
            WHERE paid_at >= $1 AND paid_at < $2
            ORDER BY paid_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list payments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((payments, count, total_amount))
    }

    /// Get payment by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Payment> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch payment: {:?}", e);
                AppError::Database(e)
            })?;

        payment.ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
    }
}
