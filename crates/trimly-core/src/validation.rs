//! # Validation Module
//!
//! Input validation for the booking core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport wrapper (out of scope)                             │
//! │  ├── DTO shape / format checks                                         │
//! │  └── Immediate client feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Service window (booking hour)                                     │
//! │  └── Payment input sanity                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (slot, one payment per booking)                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: the constraints are the real backstop; this module  │
//! │  turns predictable failures into clean domain errors first.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{BookingError, ValidationError};
use crate::{CLOSING_HOUR, MAX_PAYMENT_METHOD_LEN, OPENING_HOUR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a booking hour lies in the service window.
///
/// ## Rules
/// Both bounds are inclusive: 9 and 23 are legal, 8 and 24 are not.
///
/// ## Example
/// ```rust
/// use trimly_core::validation::validate_booking_hour;
///
/// assert!(validate_booking_hour(9).is_ok());
/// assert!(validate_booking_hour(23).is_ok());
/// assert!(validate_booking_hour(8).is_err());
/// ```
pub fn validate_booking_hour(hour: u8) -> Result<(), BookingError> {
    if !(OPENING_HOUR..=CLOSING_HOUR).contains(&hour) {
        return Err(BookingError::invalid_hour(hour));
    }
    Ok(())
}

/// Validates a payment method label.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_PAYMENT_METHOD_LEN`] characters
pub fn validate_payment_method(method: &str) -> ValidationResult<()> {
    let method = method.trim();

    if method.is_empty() {
        return Err(ValidationError::Required {
            field: "method".to_string(),
        });
    }

    if method.len() > MAX_PAYMENT_METHOD_LEN {
        return Err(ValidationError::TooLong {
            field: "method".to_string(),
            max: MAX_PAYMENT_METHOD_LEN,
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// Amounts are integer cents; zero and negative amounts are client bugs.
pub fn validate_payment_amount(amount_cents: i64) -> ValidationResult<()> {
    if amount_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount_cents".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
