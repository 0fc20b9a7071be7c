//! # Settlement Engine
//!
//! Converts an awaiting-payment booking into a paid, settled one. This is
//! the most failure-sensitive operation in the system, so the checks are
//! layered:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      settle() check layers                              │
//! │                                                                         │
//! │  Pre-flight (reads, clean domain errors):                              │
//! │    1. input sanity          → Validation                               │
//! │    2. booking exists        → BookingNotFound                          │
//! │    3. caller owns booking   → AccessDenied                             │
//! │    4. awaiting payment      → InvalidStateTransition                   │
//! │    5. no payment yet        → DuplicatePayment                         │
//! │                                                                         │
//! │  Commit (one transaction in trimly-db):                                │
//! │    6. payment insert + status flip, together or not at all             │
//! │                                                                         │
//! │  Steps 4 and 5 observe two different pieces of state that a concurrent │
//! │  settlement may change between our read and our write. They exist to   │
//! │  turn the common failures into precise errors cheaply; the UNIQUE      │
//! │  index on payments.booking_id and the guarded status UPDATE inside     │
//! │  the transaction are the real backstop.                                │
//! │                                                                         │
//! │  After commit:                                                          │
//! │    7. invoice trigger       (fire-and-forget, cannot undo settlement)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::invoice::{InvoiceNotice, InvoiceTrigger};
use trimly_core::error::BookingResult;
use trimly_core::validation::{validate_payment_amount, validate_payment_method};
use trimly_core::{BookingError, Payment, PaymentStatus};
use trimly_db::{BookingRepository, DbError, PaymentRepository};

/// Settles bookings: records the payment and advances the status, as one
/// unit of work.
#[derive(Clone)]
pub struct SettlementEngine {
    bookings: BookingRepository,
    payments: PaymentRepository,
    invoices: Arc<dyn InvoiceTrigger>,
}

impl SettlementEngine {
    /// Creates a new SettlementEngine.
    ///
    /// `invoices` is notified after each committed settlement; pass
    /// [`crate::invoice::NullInvoiceTrigger`] when no pipeline is wired up.
    pub fn new(
        bookings: BookingRepository,
        payments: PaymentRepository,
        invoices: Arc<dyn InvoiceTrigger>,
    ) -> Self {
        SettlementEngine {
            bookings,
            payments,
            invoices,
        }
    }

    /// Settles a booking: creates the payment record (status `Succeeded`)
    /// and advances the booking to `Settled`.
    ///
    /// `customer_id` is the authenticated caller, supplied by the identity
    /// layer; the ownership check keeps one customer from paying off (and
    /// thereby locking in) another customer's reservation.
    ///
    /// ## Errors
    /// See the module docs for the full check ladder. Under concurrency the
    /// loser of a settle/settle or settle/cancel race observes
    /// [`BookingError::InvalidStateTransition`] or
    /// [`BookingError::DuplicatePayment`] - never a half-applied state.
    pub async fn settle(
        &self,
        booking_id: &str,
        customer_id: &str,
        method: &str,
        amount_cents: i64,
    ) -> BookingResult<Payment> {
        validate_payment_method(method)?;
        validate_payment_amount(amount_cents)?;

        // 1. The booking must exist.
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await
            .map_err(storage_fault)?
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.to_string()))?;

        // 2. The caller must own it.
        if booking.customer_id != customer_id {
            warn!(
                booking_id = %booking_id,
                caller = %customer_id,
                "Settlement attempt on someone else's booking"
            );
            return Err(BookingError::AccessDenied {
                booking_id: booking_id.to_string(),
            });
        }

        // 3. Only awaiting-payment bookings can be settled.
        if !booking.is_payable() {
            return Err(BookingError::InvalidStateTransition {
                booking_id: booking_id.to_string(),
                status: booking.status,
            });
        }

        // 4. Pre-flight duplicate check: turns the constraint violation into
        //    a clean domain error on the common retry path.
        if self
            .payments
            .get_by_booking_id(booking_id)
            .await
            .map_err(storage_fault)?
            .is_some()
        {
            return Err(BookingError::DuplicatePayment {
                booking_id: booking_id.to_string(),
            });
        }

        // 5 + 6. One transaction: payment insert + status flip.
        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            booking_id: booking_id.to_string(),
            method: method.trim().to_string(),
            amount_cents,
            status: PaymentStatus::Succeeded,
            created_at: now,
            updated_at: now,
        };

        match self.payments.record_settlement(&payment).await {
            Ok(settled) => {
                info!(
                    booking_id = %booking_id,
                    payment_id = %payment.id,
                    amount_cents = amount_cents,
                    status = %settled.status,
                    "Booking settled"
                );

                // 7. Fire-and-forget: the settlement is already durable, an
                //    invoice pipeline failure must not roll it back.
                self.invoices.booking_settled(InvoiceNotice {
                    booking_id: booking_id.to_string(),
                    amount_cents,
                });

                Ok(payment)
            }

            // Raced another settlement past the pre-flight check; its
            // payment row landed first.
            Err(err) if err.is_unique_violation_on("payments") => {
                Err(BookingError::DuplicatePayment {
                    booking_id: booking_id.to_string(),
                })
            }

            // The guarded status flip matched zero rows: the booking left
            // `awaiting_payment` between our read and our write (concurrent
            // settlement or cancellation committed first). Re-read for a
            // precise error.
            Err(DbError::NotFound { .. }) => match self.bookings.get_by_id(booking_id).await {
                Ok(Some(current)) => Err(BookingError::InvalidStateTransition {
                    booking_id: booking_id.to_string(),
                    status: current.status,
                }),
                Ok(None) => Err(BookingError::BookingNotFound(booking_id.to_string())),
                Err(err) => Err(storage_fault(err)),
            },

            Err(err) => {
                warn!(booking_id = %booking_id, error = %err, "Settlement failed on storage");
                Err(storage_fault(err))
            }
        }
    }
}

/// Translates an uncategorized storage failure into the one retryable
/// domain error kind.
fn storage_fault(err: DbError) -> BookingError {
    BookingError::StorageFault(err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::NullInvoiceTrigger;
    use crate::reservation::ReservationEngine;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use trimly_core::{Barber, Booking, BookingStatus, Customer, Service};
    use trimly_db::{Database, DbConfig};

    /// Test double that records every settlement notice.
    #[derive(Default)]
    struct RecordingTrigger {
        notices: Mutex<Vec<InvoiceNotice>>,
    }

    impl InvoiceTrigger for RecordingTrigger {
        fn booking_settled(&self, notice: InvoiceNotice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn engine(db: &Database) -> SettlementEngine {
        SettlementEngine::new(db.bookings(), db.payments(), Arc::new(NullInvoiceTrigger))
    }

    async fn seed_customer(db: &Database, name: &str) -> String {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: format!("{}@example.com", Uuid::new_v4()),
            created_at: Utc::now(),
        };
        db.catalog().insert_customer(&customer).await.unwrap();
        customer.id
    }

    /// Seeds the catalog plus one awaiting-payment booking owned by the
    /// returned customer.
    async fn seed_booking(db: &Database) -> (String, Booking) {
        let now = Utc::now();
        let catalog = db.catalog();

        let customer_id = seed_customer(db, "Andi").await;

        let barber = Barber {
            id: Uuid::new_v4().to_string(),
            name: "Budi".into(),
            photo_url: None,
            rating_centi: 450,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        catalog.insert_barber(&barber).await.unwrap();

        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: "Classic Cut".into(),
            price_cents: 50_000,
            created_at: now,
            updated_at: now,
        };
        catalog.insert_service(&service).await.unwrap();

        let booking = ReservationEngine::new(db.bookings())
            .reserve(
                &customer_id,
                &barber.id,
                &service.id,
                NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
                14,
            )
            .await
            .unwrap();

        (customer_id, booking)
    }

    #[tokio::test]
    async fn settle_records_payment_and_flips_status() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;

        let payment = engine(&db)
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Succeeded);
        assert_eq!(payment.amount_cents, 50_000);
        assert_eq!(payment.booking_id, booking.id);

        // Both writes are observable: the payment row and the settled status.
        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Settled);
        assert!(db
            .payments()
            .get_by_booking_id(&booking.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn settle_unknown_booking_is_not_found() {
        let db = test_db().await;
        let customer_id = seed_customer(&db, "Andi").await;

        let err = engine(&db)
            .settle("no-such-booking", &customer_id, "cash", 50_000)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::BookingNotFound(_)));
    }

    #[tokio::test]
    async fn settle_someone_elses_booking_is_denied() {
        let db = test_db().await;
        let (_, booking) = seed_booking(&db).await;
        let intruder_id = seed_customer(&db, "Rina").await;

        let err = engine(&db)
            .settle(&booking.id, &intruder_id, "cash", 50_000)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AccessDenied { .. }));

        // Nothing changed for the real owner.
        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::AwaitingPayment);
    }

    #[tokio::test]
    async fn settle_twice_is_an_invalid_transition() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;
        let engine = engine(&db);

        engine
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap();

        let err = engine
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidStateTransition {
                status: BookingStatus::Settled,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn settle_cancelled_booking_leaves_no_partial_state() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;

        db.bookings()
            .update_status(&booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        let err = engine(&db)
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidStateTransition {
                status: BookingStatus::Cancelled,
                ..
            }
        ));

        // No payment, no status change.
        assert!(db
            .payments()
            .get_by_booking_id(&booking.id)
            .await
            .unwrap()
            .is_none());
        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn concurrent_settles_produce_exactly_one_payment() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;
        let engine = engine(&db);

        let (a, b) = tokio::join!(
            engine.settle(&booking.id, &customer_id, "cash", 50_000),
            engine.settle(&booking.id, &customer_id, "qris", 50_000),
        );

        let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one settlement must win: {a:?} / {b:?}");

        // The loser sees a clean domain error, never corrupted state.
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser.unwrap_err(),
            BookingError::InvalidStateTransition { .. } | BookingError::DuplicatePayment { .. }
        ));

        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Settled);
        assert!(db
            .payments()
            .get_by_booking_id(&booking.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn invalid_inputs_never_reach_storage() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;
        let engine = engine(&db);

        let err = engine
            .settle(&booking.id, &customer_id, "  ", 50_000)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        let err = engine
            .settle(&booking.id, &customer_id, "cash", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        // The booking is untouched and still payable.
        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert!(stored.is_payable());
    }

    #[tokio::test]
    async fn full_lifecycle_reserve_settle_retry() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;
        let reservations = ReservationEngine::new(db.bookings());
        let settlements = engine(&db);

        // The slot is held from the moment of reservation.
        let err = reservations
            .reserve(
                &customer_id,
                &booking.barber_id,
                &booking.service_id,
                booking.booking_date,
                booking.booking_hour,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable { .. }));

        let payment = settlements
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Succeeded);

        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Settled);

        // Paying again is rejected; the original payment stands.
        settlements
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap_err();
        let stored = db
            .payments()
            .get_by_booking_id(&booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, payment.id);
    }

    #[tokio::test]
    async fn invoice_trigger_fires_once_per_settlement() {
        let db = test_db().await;
        let (customer_id, booking) = seed_booking(&db).await;

        let trigger = Arc::new(RecordingTrigger::default());
        let engine = SettlementEngine::new(db.bookings(), db.payments(), trigger.clone());

        engine
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap();

        // A failed retry must not notify again.
        engine
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap_err();

        let notices = trigger.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(
            notices[0],
            InvoiceNotice {
                booking_id: booking.id.clone(),
                amount_cents: 50_000,
            }
        );
    }
}
