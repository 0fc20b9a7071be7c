//! # Booking Repository
//!
//! Database operations for bookings.
//!
//! ## Booking Lifecycle (storage view)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Booking Storage Lifecycle                         │
//! │                                                                         │
//! │  1. INSERT                                                              │
//! │     └── insert() → row in 'awaiting_payment'                           │
//! │         └── UNIQUE (barber_id, booking_date, booking_hour) arbitrates  │
//! │             concurrent reservations; exactly one insert wins           │
//! │                                                                         │
//! │  2. READ                                                                │
//! │     └── get_by_id() → Option (absence is a normal outcome)             │
//! │     └── list_by_customer() → most recent first                         │
//! │                                                                         │
//! │  3. STATUS WRITE                                                        │
//! │     └── update_status() → applies the status, touches updated_at       │
//! │         └── does NOT check transition legality: the engines own the    │
//! │             state machine, this ledger just records it durably         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use trimly_core::{Booking, BookingStatus};

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Inserts a booking.
    ///
    /// ## Slot Exclusivity
    /// The uniqueness check and the insert are one atomic storage operation:
    /// the UNIQUE index on `(barber_id, booking_date, booking_hour)` rejects
    /// the insert itself. There is deliberately no prior "is the slot free?"
    /// read here - two concurrent requests for the same slot must not both
    /// observe "free" before either writes.
    ///
    /// ## Errors
    /// - [`DbError::UniqueViolation`] on `bookings.*` - slot already taken
    /// - [`DbError::ForeignKeyViolation`] - unknown customer/barber/service id
    pub async fn insert(&self, booking: &Booking) -> DbResult<()> {
        debug!(
            id = %booking.id,
            barber_id = %booking.barber_id,
            date = %booking.booking_date,
            hour = booking.booking_hour,
            "Inserting booking"
        );

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, customer_id, barber_id, service_id,
                booking_date, booking_hour, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.customer_id)
        .bind(&booking.barber_id)
        .bind(&booking.service_id)
        .bind(booking.booking_date)
        .bind(booking.booking_hour)
        .bind(booking.status)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a booking by ID.
    ///
    /// Absence is a normal outcome, not a fault; callers decide whether
    /// `None` is an error in their context.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
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
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Lists all bookings owned by a customer, most recent first.
    ///
    /// Unrestricted length; pagination belongs to the transport wrapper.
    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, customer_id, barber_id, service_id,
                booking_date, booking_hour, status,
                created_at, updated_at
            FROM bookings
            WHERE customer_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Applies a status and touches `updated_at`, returning the refreshed
    /// record.
    ///
    /// This operation does not validate transitions - the engines are
    /// responsible for legality before calling in.
    ///
    /// ## Errors
    /// - [`DbError::NotFound`] if the id is absent
    pub async fn update_status(&self, id: &str, status: BookingStatus) -> DbResult<Booking> {
        let now = Utc::now();

        debug!(id = %id, status = %status, "Updating booking status");

        let result = sqlx::query("UPDATE bookings SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Booking", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
