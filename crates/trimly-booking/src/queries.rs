//! Read accessors for user-facing views.
//!
//! Pure reads, no business rules: the only work done here is translating
//! `DbError` into the domain taxonomy so callers above this layer never see
//! storage types.

use tracing::warn;

use trimly_core::error::BookingResult;
use trimly_core::{Booking, BookingError, Payment};
use trimly_db::{BookingRepository, DbError, PaymentRepository};

/// Read-side companion to the engines.
#[derive(Clone)]
pub struct BookingQueries {
    bookings: BookingRepository,
    payments: PaymentRepository,
}

impl BookingQueries {
    /// Creates a new BookingQueries over the given stores.
    pub fn new(bookings: BookingRepository, payments: PaymentRepository) -> Self {
        BookingQueries { bookings, payments }
    }

    /// Looks up a single booking. `None` when the id is unknown.
    pub async fn booking(&self, booking_id: &str) -> BookingResult<Option<Booking>> {
        self.bookings
            .get_by_id(booking_id)
            .await
            .map_err(storage_fault)
    }

    /// Returns a customer's bookings, newest first. Unknown customers get an
    /// empty history, not an error.
    pub async fn history(&self, customer_id: &str) -> BookingResult<Vec<Booking>> {
        self.bookings
            .list_by_customer(customer_id)
            .await
            .map_err(storage_fault)
    }

    /// Returns the payment that settled a booking, if one exists yet.
    pub async fn payment_for_booking(&self, booking_id: &str) -> BookingResult<Option<Payment>> {
        self.payments
            .get_by_booking_id(booking_id)
            .await
            .map_err(storage_fault)
    }
}

fn storage_fault(err: DbError) -> BookingError {
    warn!(error = %err, "Read query failed on storage");
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
    use crate::settlement::SettlementEngine;
    use chrono::{NaiveDate, Utc};
    use std::sync::Arc;
    use trimly_core::{Barber, BookingStatus, Customer, PaymentStatus, Service};
    use trimly_db::{Database, DbConfig};
    use uuid::Uuid;

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

    fn queries(db: &Database) -> BookingQueries {
        BookingQueries::new(db.bookings(), db.payments())
    }

    #[tokio::test]
    async fn unknown_ids_read_as_empty_not_as_errors() {
        let db = test_db().await;
        let queries = queries(&db);

        assert!(queries.booking("no-such-id").await.unwrap().is_none());
        assert!(queries.history("no-such-customer").await.unwrap().is_empty());
        assert!(queries
            .payment_for_booking("no-such-id")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn history_lists_a_customers_bookings_newest_first() {
        let db = test_db().await;
        let (customer_id, barber_id, service_id) = seed_catalog(&db).await;
        let (other_customer_id, _, _) = seed_catalog(&db).await;
        let engine = ReservationEngine::new(db.bookings());
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let first = engine
            .reserve(&customer_id, &barber_id, &service_id, date, 10)
            .await
            .unwrap();
        let second = engine
            .reserve(&customer_id, &barber_id, &service_id, date, 11)
            .await
            .unwrap();
        engine
            .reserve(&other_customer_id, &barber_id, &service_id, date, 12)
            .await
            .unwrap();

        let history = queries(&db).history(&customer_id).await.unwrap();
        let ids: Vec<&str> = history.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(history.len(), 2, "only the customer's own bookings");
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test]
    async fn settled_booking_reads_back_with_its_payment() {
        let db = test_db().await;
        let (customer_id, barber_id, service_id) = seed_catalog(&db).await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let booking = ReservationEngine::new(db.bookings())
            .reserve(&customer_id, &barber_id, &service_id, date, 14)
            .await
            .unwrap();
        SettlementEngine::new(db.bookings(), db.payments(), Arc::new(NullInvoiceTrigger))
            .settle(&booking.id, &customer_id, "cash", 50_000)
            .await
            .unwrap();

        let queries = queries(&db);
        let stored = queries.booking(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Settled);

        let payment = queries
            .payment_for_booking(&booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Succeeded);
        assert_eq!(payment.amount_cents, 50_000);
    }
}
