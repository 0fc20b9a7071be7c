//! # Reservation Engine
//!
//! Booking-creation business rules. The engine validates what can be
//! validated locally (the service window), then delegates slot arbitration
//! entirely to the storage layer's UNIQUE index - there is no "check then
//! insert" window for two customers to slip through.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use trimly_core::error::BookingResult;
use trimly_core::validation::validate_booking_hour;
use trimly_core::{Booking, BookingError, BookingStatus, Slot};
use trimly_db::BookingRepository;

/// Creates bookings; never mutates existing ones.
///
/// The engine only ever produces the initial `AwaitingPayment` state.
/// Status changes belong to the settlement engine (to `Settled`) or the
/// cancellation path (to `Cancelled`).
#[derive(Debug, Clone)]
pub struct ReservationEngine {
    bookings: BookingRepository,
}

impl ReservationEngine {
    /// Creates a new ReservationEngine over the given booking store.
    pub fn new(bookings: BookingRepository) -> Self {
        ReservationEngine { bookings }
    }

    /// Reserves a slot for a customer.
    ///
    /// ## Steps
    /// 1. Validate `hour` against the service window ([9, 23] inclusive).
    /// 2. Insert the booking; the slot UNIQUE index arbitrates races.
    ///
    /// Catalog existence checks for `barber_id`/`service_id` are the
    /// caller's collaborator's responsibility; the store's foreign keys are
    /// the backstop and surface as [`BookingError::StorageFault`].
    ///
    /// ## Errors
    /// - [`BookingError::InvalidHour`] - hour outside the service window
    /// - [`BookingError::SlotUnavailable`] - someone else holds this slot
    /// - [`BookingError::StorageFault`] - any other persistence failure
    pub async fn reserve(
        &self,
        customer_id: &str,
        barber_id: &str,
        service_id: &str,
        date: NaiveDate,
        hour: u8,
    ) -> BookingResult<Booking> {
        validate_booking_hour(hour)?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            barber_id: barber_id.to_string(),
            service_id: service_id.to_string(),
            booking_date: date,
            booking_hour: hour,
            status: BookingStatus::AwaitingPayment,
            created_at: now,
            updated_at: now,
        };

        match self.bookings.insert(&booking).await {
            Ok(()) => {
                info!(
                    booking_id = %booking.id,
                    customer_id = %customer_id,
                    slot = %booking.slot(),
                    "Booking reserved"
                );
                Ok(booking)
            }
            Err(err) if err.is_unique_violation_on("bookings") => {
                let slot = Slot::new(barber_id, date, hour);
                info!(slot = %slot, "Reservation lost the slot race");
                Err(BookingError::slot_unavailable(slot))
            }
            Err(err) => {
                warn!(error = %err, "Reservation failed on storage");
                Err(BookingError::StorageFault(err.to_string()))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trimly_core::{Barber, Customer, Service};
    use trimly_db::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_catalog(db: &Database) -> (String, String, String) {
        let now = Utc::now();
        let catalog = db.catalog();

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: "Andi".into(),
            email: format!("{}@example.com", Uuid::new_v4()),
            created_at: now,
        };
        catalog.insert_customer(&customer).await.unwrap();

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

        (customer.id, barber.id, service.id)
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[tokio::test]
    async fn reserve_creates_awaiting_payment_booking() {
        let db = test_db().await;
        let (customer_id, barber_id, service_id) = seed_catalog(&db).await;
        let engine = ReservationEngine::new(db.bookings());

        let booking = engine
            .reserve(&customer_id, &barber_id, &service_id, june_10(), 14)
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::AwaitingPayment);
        assert_eq!(booking.booking_hour, 14);

        // And it is durably in the store.
        let stored = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored, booking);
    }

    #[tokio::test]
    async fn hour_bounds_are_inclusive_both_ends() {
        let db = test_db().await;
        let (customer_id, barber_id, service_id) = seed_catalog(&db).await;
        let engine = ReservationEngine::new(db.bookings());

        let err = engine
            .reserve(&customer_id, &barber_id, &service_id, june_10(), 8)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidHour { hour: 8, .. }));

        engine
            .reserve(&customer_id, &barber_id, &service_id, june_10(), 9)
            .await
            .unwrap();
        engine
            .reserve(&customer_id, &barber_id, &service_id, june_10(), 23)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn second_reserve_for_same_slot_is_unavailable() {
        let db = test_db().await;
        let (customer_id, barber_id, service_id) = seed_catalog(&db).await;
        let (other_customer_id, _, _) = seed_catalog(&db).await;
        let engine = ReservationEngine::new(db.bookings());

        engine
            .reserve(&customer_id, &barber_id, &service_id, june_10(), 14)
            .await
            .unwrap();

        // A different customer contending for the same slot loses.
        let err = engine
            .reserve(&other_customer_id, &barber_id, &service_id, june_10(), 14)
            .await
            .unwrap_err();
        match err {
            BookingError::SlotUnavailable { slot } => {
                assert_eq!(slot.barber_id, barber_id);
                assert_eq!(slot.hour, 14);
            }
            other => panic!("expected SlotUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn concurrent_reserves_for_same_slot_have_exactly_one_winner() {
        let db = test_db().await;
        let (customer_id, barber_id, service_id) = seed_catalog(&db).await;
        let (other_customer_id, _, _) = seed_catalog(&db).await;
        let engine = ReservationEngine::new(db.bookings());

        // No ordering guarantee beyond mutual exclusion on the slot key:
        // storage uniqueness is the sole arbiter.
        let (a, b) = tokio::join!(
            engine.reserve(&customer_id, &barber_id, &service_id, june_10(), 14),
            engine.reserve(&other_customer_id, &barber_id, &service_id, june_10(), 14),
        );

        let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one reservation must win: {a:?} / {b:?}");

        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser.unwrap_err(),
            BookingError::SlotUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn unknown_catalog_ids_surface_as_storage_fault() {
        let db = test_db().await;
        let engine = ReservationEngine::new(db.bookings());

        let err = engine
            .reserve("ghost", "ghost", "ghost", june_10(), 14)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::StorageFault(_)), "got {err:?}");
        assert!(err.is_retryable());
    }
}
