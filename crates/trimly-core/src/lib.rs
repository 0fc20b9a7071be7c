//! # trimly-core: Pure Domain Logic for the Trimly Booking Core
//!
//! This crate is the **heart** of the booking system. It contains the domain
//! types, the booking status state machine, the error taxonomy and input
//! validation, all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trimly Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Transport wrapper (HTTP/RPC, out of scope)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                trimly-booking (Engines)                         │   │
//! │  │     ReservationEngine, SettlementEngine, BookingQueries        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trimly-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   error   │  │ validation│                  │   │
//! │  │   │  Booking  │  │ taxonomy  │  │   rules   │                  │   │
//! │  │   │  Payment  │  │           │  │  checks   │                  │   │
//! │  │   │   Slot    │  │           │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    trimly-db (Storage Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Booking, Payment, Slot, catalog records)
//! - [`error`] - The booking error taxonomy
//! - [`validation`] - Business rule validation (service window, amounts)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Monetary amounts are in cents (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trimly_core::Booking` instead of
// `use trimly_core::types::Booking`

pub use error::{BookingError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First bookable hour of the day (inclusive).
///
/// ## Business Reason
/// Shops open at 09:00; a booking hour below this never reaches storage.
pub const OPENING_HOUR: u8 = 9;

/// Last bookable hour of the day (inclusive).
///
/// ## Business Reason
/// The 23:00 slot is the final one that can be reserved; both bounds of the
/// service window are inclusive.
pub const CLOSING_HOUR: u8 = 23;

/// Maximum length of a payment method label.
///
/// Free-form strings like "cash", "qris" or "bank_transfer"; anything longer
/// is a client bug, not a new payment rail.
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;
