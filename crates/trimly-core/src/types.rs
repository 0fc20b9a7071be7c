//! # Domain Types
//!
//! Core domain types used throughout the Trimly booking core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Booking      │   │    Payment      │   │      Slot       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  barber_id      │       │
//! │  │  customer_id    │   │  booking_id(1:1)│   │  date           │       │
//! │  │  barber_id      │   │  method         │   │  hour           │       │
//! │  │  service_id     │   │  amount_cents   │   └─────────────────┘       │
//! │  │  date + hour    │   │  status         │                             │
//! │  │  status         │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  BookingStatus  │   │  PaymentStatus  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  AwaitingPayment│   │  Pending        │                             │
//! │  │  Settled        │   │  Succeeded      │                             │
//! │  │  Cancelled      │   │  Failed         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status State Machine
//! A booking is created in `AwaitingPayment` and ends in exactly one of the
//! two terminal states. No transition ever leaves a terminal state:
//!
//! ```text
//!                  ┌──────────► Settled   (terminal)
//!  AwaitingPayment ┤
//!                  └──────────► Cancelled (terminal)
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Booking Status
// =============================================================================

/// The lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booking reserved, waiting for the customer to pay.
    AwaitingPayment,
    /// Payment recorded; the slot is paid for. Terminal.
    Settled,
    /// Reservation abandoned or withdrawn. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Whether this status permits no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Settled | BookingStatus::Cancelled)
    }

    /// Checks a single-step transition against the state machine.
    ///
    /// ## Legal Transitions
    /// - `AwaitingPayment → Settled`
    /// - `AwaitingPayment → Cancelled`
    ///
    /// Everything else (including self-transitions) is illegal. The storage
    /// layer does NOT call this - transition legality belongs to the engines.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (
                BookingStatus::AwaitingPayment,
                BookingStatus::Settled | BookingStatus::Cancelled
            )
        )
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            BookingStatus::AwaitingPayment => "awaiting_payment",
            BookingStatus::Settled => "settled",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The status of a payment record.
///
/// In the current design a payment is created directly as `Succeeded` at
/// settlement time; `Pending` and `Failed` exist for external payment rails
/// that report asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Slot
// =============================================================================

/// Identity of one reservable unit of time: a barber, a calendar date and an
/// hour of day.
///
/// ## Why A Value Type?
/// The triple is the uniqueness key of the whole reservation system (one
/// booking per slot, enforced by a UNIQUE index in storage). Carrying it as
/// a value keeps error messages and logs precise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub barber_id: String,
    pub date: NaiveDate,
    pub hour: u8,
}

impl Slot {
    pub fn new(barber_id: impl Into<String>, date: NaiveDate, hour: u8) -> Self {
        Slot {
            barber_id: barber_id.into(),
            date,
            hour,
        }
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} @ {} {:02}:00", self.barber_id, self.date, self.hour)
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A reservation of one slot by one customer for one service.
///
/// ## Invariants (enforced by storage + engines)
/// - `(barber_id, booking_date, booking_hour)` is unique across ALL bookings
///   regardless of status; a cancelled booking keeps blocking its slot.
/// - `booking_hour` lies within the service window (see [`crate::validation`]).
/// - Status follows the state machine documented on [`BookingStatus`].
///
/// Timestamps are plain fields; the store touches `updated_at` explicitly on
/// every mutation. Related records (barber, payment) are fetched through
/// explicit repository calls, never lazily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Booking {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer who owns this booking.
    pub customer_id: String,

    /// Barber whose time is reserved.
    pub barber_id: String,

    /// Service to be performed.
    pub service_id: String,

    /// Calendar date of the appointment (no time-of-day component).
    pub booking_date: NaiveDate,

    /// Hour of day, within the service window.
    pub booking_hour: u8,

    /// Lifecycle status.
    pub status: BookingStatus,

    /// When the booking was created.
    pub created_at: DateTime<Utc>,

    /// When the booking was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the slot this booking occupies.
    #[inline]
    pub fn slot(&self) -> Slot {
        Slot::new(self.barber_id.clone(), self.booking_date, self.booking_hour)
    }

    /// Whether the booking can still be paid for.
    #[inline]
    pub fn is_payable(&self) -> bool {
        self.status == BookingStatus::AwaitingPayment
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment settling one booking.
///
/// Exactly zero or one payment exists per booking; `booking_id` carries a
/// UNIQUE index in storage, so a second creation attempt fails instead of
/// overwriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The booking this payment settles (one-to-one).
    pub booking_id: String,

    /// Free-form payment method label ("cash", "qris", ...).
    pub method: String,

    /// Amount in cents (smallest currency unit). Never floats.
    pub amount_cents: i64,

    /// Payment status; `Succeeded` when recorded at settlement.
    pub status: PaymentStatus,

    /// When the payment was created.
    pub created_at: DateTime<Utc>,

    /// When the payment was last mutated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Catalog Records
// =============================================================================
// Catalog management (CRUD, search, admin UI) lives outside this core; these
// records exist so storage can enforce referential integrity and so tooling
// can seed development data.

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A barber offering appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Barber {
    pub id: String,
    pub name: String,
    /// Profile photo, if the barber uploaded one.
    pub photo_url: Option<String>,
    /// Average rating in hundredths (0..=500), integer for the same reason
    /// money is in cents.
    pub rating_centi: i64,
    /// Inactive barbers stay in the catalog but take no new bookings.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A service on the menu (cut, shave, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price in cents.
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
