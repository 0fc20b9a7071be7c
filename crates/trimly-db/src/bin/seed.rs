//! # Seed Data Generator
//!
//! Populates the database with development catalog data: a handful of
//! barbers, the service menu and a few demo customers.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p trimly-db --bin seed
//!
//! # Specify a database path
//! cargo run -p trimly-db --bin seed -- --db ./data/trimly.db
//! ```

use chrono::Utc;
use std::env;
use trimly_core::{Barber, Customer, Service};
use trimly_db::{Database, DbConfig};
use uuid::Uuid;

/// Barber roster: (name, rating in hundredths).
const BARBERS: &[(&str, i64)] = &[
    ("Budi Santoso", 480),
    ("Agus Wijaya", 455),
    ("Citra Lestari", 490),
    ("Dewi Anggraini", 430),
    ("Eko Prasetyo", 410),
];

/// Service menu: (name, price in cents).
const SERVICES: &[(&str, i64)] = &[
    ("Classic Cut", 50_000),
    ("Beard Trim", 25_000),
    ("Hot Towel Shave", 35_000),
    ("Kids Cut", 30_000),
    ("Cut + Beard Combo", 65_000),
];

/// Demo customers: (name, email).
const CUSTOMERS: &[(&str, &str)] = &[
    ("Andi Rahman", "andi@example.com"),
    ("Rina Putri", "rina@example.com"),
    ("Joko Susilo", "joko@example.com"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let db_path = parse_db_path().unwrap_or_else(|| "./trimly.db".to_string());
    tracing::info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let catalog = db.catalog();
    let now = Utc::now();

    for (name, rating_centi) in BARBERS {
        let barber = Barber {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            photo_url: None,
            rating_centi: *rating_centi,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        catalog.insert_barber(&barber).await?;
    }
    tracing::info!(count = BARBERS.len(), "Barbers seeded");

    for (name, price_cents) in SERVICES {
        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            price_cents: *price_cents,
            created_at: now,
            updated_at: now,
        };
        catalog.insert_service(&service).await?;
    }
    tracing::info!(count = SERVICES.len(), "Services seeded");

    for (name, email) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            email: (*email).to_string(),
            created_at: now,
        };
        catalog.insert_customer(&customer).await?;
    }
    tracing::info!(count = CUSTOMERS.len(), "Customers seeded");

    db.close().await;
    Ok(())
}

/// Parses `--db <path>` from the command line.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
