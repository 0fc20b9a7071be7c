//! # Error Types
//!
//! The booking error taxonomy for trimly-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trimly-core errors (this file)                                        │
//! │  ├── BookingError     - User-facing domain outcomes                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  trimly-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → BookingError ← (engines translate DbError)    │
//! │                                                                         │
//! │  The transport wrapper maps BookingError kinds to its own status       │
//! │  codes; no HTTP knowledge lives down here.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slot, booking id, status)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a distinct client-facing condition, never a
//!    generic failure message

use thiserror::Error;

use crate::types::{BookingStatus, Slot};

// =============================================================================
// Booking Error
// =============================================================================

/// Domain outcomes of reservation and settlement operations.
///
/// All variants except [`BookingError::StorageFault`] are expected outcomes
/// returned to the caller unchanged; the core never retries them. Only
/// `StorageFault` may be retried by a caller, idempotently, since no mutating
/// operation has side effects beyond its single intended write.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Booking hour outside the legal service window.
    ///
    /// ## When This Occurs
    /// - Client sends an hour before opening or after the last slot
    #[error("booking hour {hour} is outside the service window ({min}..={max})")]
    InvalidHour { hour: u8, min: u8, max: u8 },

    /// Target slot already reserved by someone else.
    ///
    /// ## When This Occurs
    /// - Two customers race for the same slot; storage uniqueness is the
    ///   sole arbiter and exactly one of them sees this error
    /// - Client retries a reservation it already won
    #[error("slot {slot} is not available")]
    SlotUnavailable { slot: Slot },

    /// Referenced booking does not exist.
    #[error("booking not found: {0}")]
    BookingNotFound(String),

    /// Caller does not own the booking.
    ///
    /// ## Why This Exists
    /// Prevents one customer from paying off (and thereby locking in)
    /// another customer's reservation.
    #[error("access denied to booking {booking_id}")]
    AccessDenied { booking_id: String },

    /// Booking is not in the required source state.
    ///
    /// ## When This Occurs
    /// - Settling a booking that is already settled or cancelled
    /// - Losing the race against a concurrent settlement or cancellation
    #[error("booking {booking_id} is {status}, cannot perform operation")]
    InvalidStateTransition {
        booking_id: String,
        status: BookingStatus,
    },

    /// A payment already exists for this booking.
    ///
    /// ## When This Occurs
    /// - Client retries a settlement that already succeeded
    /// - Two settlement attempts race the payment insert
    #[error("booking {booking_id} already has a payment")]
    DuplicatePayment { booking_id: String },

    /// Underlying persistence failure not covered above.
    ///
    /// The only caller-retryable kind in the taxonomy.
    #[error("storage fault: {0}")]
    StorageFault(String),

    /// Input validation failure (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl BookingError {
    /// Creates an InvalidHour error for the standard service window.
    pub fn invalid_hour(hour: u8) -> Self {
        BookingError::InvalidHour {
            hour,
            min: crate::OPENING_HOUR,
            max: crate::CLOSING_HOUR,
        }
    }

    /// Creates a SlotUnavailable error.
    pub fn slot_unavailable(slot: Slot) -> Self {
        BookingError::SlotUnavailable { slot }
    }

    /// Whether a caller may retry the failed operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::StorageFault(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input does not meet requirements; used for early
/// validation before any storage round trip.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with BookingError.
pub type BookingResult<T> = Result<T, BookingError>;

// =============================================================================
// Unit Tests
// =============================================================================
