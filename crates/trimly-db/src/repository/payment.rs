//! # Payment Repository
//!
//! Database operations for payments, including the transactional settlement
//! write pair.
//!
//! ## Settlement Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   record_settlement() transaction                       │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── INSERT INTO payments (...)                                      │
//! │    │     └── UNIQUE payments.booking_id rejects a racing duplicate     │
//! │    │                                                                    │
//! │    ├── UPDATE bookings SET status = 'settled'                          │
//! │    │   WHERE id = ? AND status = 'awaiting_payment'                    │
//! │    │     └── guarded: zero rows means the booking changed state        │
//! │    │         underneath us (concurrent settle or cancellation)         │
//! │    │                                                                    │
//! │  COMMIT (both writes) or ROLLBACK (neither)                            │
//! │                                                                         │
//! │  A payment without the status flip - or the flip without the payment - │
//! │  is unreachable. This is the central concurrency guarantee of the      │
//! │  whole core.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use trimly_core::{Booking, BookingStatus, Payment};

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Gets a payment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, booking_id, method, amount_cents, status,
                   created_at, updated_at
            FROM payments
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Gets the payment settling a booking, if one exists.
    ///
    /// At most one row can match (`booking_id` is UNIQUE).
    pub async fn get_by_booking_id(&self, booking_id: &str) -> DbResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, booking_id, method, amount_cents, status,
                   created_at, updated_at
            FROM payments
            WHERE booking_id = ?1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Records a settlement: inserts the payment AND advances the booking to
    /// `settled`, as one transaction.
    ///
    /// The status flip is a guarded UPDATE (`WHERE status =
    /// 'awaiting_payment'`), so whichever of two racing settlements commits
    /// first wins; the loser rolls back completely.
    ///
    /// ## Returns
    /// The refreshed booking (now `Settled`).
    ///
    /// ## Errors
    /// - [`DbError::UniqueViolation`] on `payments.booking_id` - a payment
    ///   already exists for this booking (raced past the caller's pre-check)
    /// - [`DbError::NotFound`] - no row in `awaiting_payment` to flip; the
    ///   booking was settled or cancelled concurrently (or never existed)
    /// - [`DbError::ForeignKeyViolation`] - booking id references nothing
    ///
    /// On every error path the transaction is rolled back; no partial write
    /// survives.
    pub async fn record_settlement(&self, payment: &Payment) -> DbResult<Booking> {
        debug!(
            booking_id = %payment.booking_id,
            amount_cents = payment.amount_cents,
            method = %payment.method,
            "Recording settlement"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Insert first: the UNIQUE index on booking_id rejects a duplicate
        // even if two settlements both passed the engine's pre-flight check.
        // An early `?` drops `tx`, which rolls back.
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, booking_id, method, amount_cents, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.booking_id)
        .bind(&payment.method)
        .bind(payment.amount_cents)
        .bind(payment.status)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&mut *tx)
        .await?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?2, updated_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(&payment.booking_id)
        .bind(BookingStatus::Settled)
        .bind(now)
        .bind(BookingStatus::AwaitingPayment)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // The booking is no longer awaiting payment; undo the insert.
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            return Err(DbError::not_found(
                "Booking (awaiting payment)",
                &payment.booking_id,
            ));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Read back the refreshed record outside the transaction.
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, customer_id, barber_id, service_id,
                booking_date, booking_hour, status,
                created_at, updated_at
            FROM bookings
            WHERE id = ?1
            "#,
        )
        .bind(&payment.booking_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
