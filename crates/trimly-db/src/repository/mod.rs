//! # Repository Module
//!
//! Database repository implementations for Trimly.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Engine call                                                           │
//! │       │                                                                 │
//! │       │  db.bookings().get_by_id("...")                                │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BookingRepository                                                     │
//! │  ├── insert(&self, booking)                                            │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_by_customer(&self, customer_id)                              │
//! │  └── update_status(&self, id, status)                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  The repositories are a dumb but durable ledger: they enforce          │
//! │  uniqueness and atomicity, not business rules. Transition legality     │
//! │  lives in trimly-booking.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`booking::BookingRepository`] - Booking inserts, lookups, status writes
//! - [`payment::PaymentRepository`] - Payment lookups and transactional settlement
//! - [`catalog::CatalogRepository`] - Customer/barber/service records

pub mod booking;
pub mod catalog;
pub mod payment;
