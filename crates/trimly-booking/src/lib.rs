//! # trimly-booking: Reservation & Settlement Engines
//!
//! The business-rule layer of the Trimly booking core. The storage layer
//! (`trimly-db`) is a dumb but durable ledger; everything that makes it a
//! *booking system* lives here:
//!
//! - [`reservation::ReservationEngine`] - validates slot legality and
//!   creates bookings in `AwaitingPayment`
//! - [`settlement::SettlementEngine`] - the most failure-sensitive operation
//!   in the system: converts an awaiting-payment booking into a paid,
//!   settled one with strict ownership and idempotency checks
//! - [`queries::BookingQueries`] - read accessors for user-facing views
//! - [`invoice::InvoiceTrigger`] - the fire-and-forget seam notified after
//!   settlement
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reserve(customer, barber, service, date, hour)                        │
//! │       │                                                                 │
//! │       ├── hour in service window? ──────────────► InvalidHour          │
//! │       │                                                                 │
//! │       └── BookingRepository::insert                                    │
//! │             └── UNIQUE slot index loses ────────► SlotUnavailable      │
//! │                                                                         │
//! │  settle(booking, customer, method, amount)                             │
//! │       │                                                                 │
//! │       ├── input sane? ──────────────────────────► Validation           │
//! │       ├── booking exists? ──────────────────────► BookingNotFound      │
//! │       ├── caller owns it? ──────────────────────► AccessDenied         │
//! │       ├── awaiting payment? ────────────────────► InvalidStateTransition│
//! │       ├── no payment yet? ──────────────────────► DuplicatePayment     │
//! │       │                                                                 │
//! │       ├── PaymentRepository::record_settlement  (ONE transaction:      │
//! │       │     payment insert + status flip, commit or rollback together) │
//! │       │                                                                 │
//! │       └── InvoiceTrigger::booking_settled       (fire-and-forget)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors cross this layer exactly once: repositories speak `DbError`, the
//! engines translate into `trimly_core::BookingError`, and nothing below the
//! transport wrapper knows about status codes.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod invoice;
pub mod queries;
pub mod reservation;
pub mod settlement;

// =============================================================================
// Re-exports
// =============================================================================

pub use invoice::{InvoiceNotice, InvoiceTrigger, NullInvoiceTrigger};
pub use queries::BookingQueries;
pub use reservation::ReservationEngine;
pub use settlement::SettlementEngine;
