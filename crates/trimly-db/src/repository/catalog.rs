//! # Catalog Repository
//!
//! Customer, barber and service records. Catalog management (admin CRUD,
//! search, pricing UIs) lives outside this core; these operations exist so
//! the booking tables have real rows to reference and so tooling can seed
//! development data.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use trimly_core::{Barber, Customer, Service};

/// Repository for catalog records.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    pub async fn insert_customer(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            "INSERT INTO customers (id, name, email, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_customer(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, created_at FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn insert_barber(&self, barber: &Barber) -> DbResult<()> {
        debug!(id = %barber.id, name = %barber.name, "Inserting barber");

        sqlx::query(
            r#"
            INSERT INTO barbers (
                id, name, photo_url, rating_centi, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&barber.id)
        .bind(&barber.name)
        .bind(&barber.photo_url)
        .bind(barber.rating_centi)
        .bind(barber.is_active)
        .bind(barber.created_at)
        .bind(barber.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_barber(&self, id: &str) -> DbResult<Option<Barber>> {
        let barber = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, name, photo_url, rating_centi, is_active,
                   created_at, updated_at
            FROM barbers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(barber)
    }

    /// Lists active barbers, alphabetically.
    pub async fn list_active_barbers(&self) -> DbResult<Vec<Barber>> {
        let barbers = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, name, photo_url, rating_centi, is_active,
                   created_at, updated_at
            FROM barbers
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(barbers)
    }

    pub async fn insert_service(&self, service: &Service) -> DbResult<()> {
        debug!(id = %service.id, name = %service.name, "Inserting service");

        sqlx::query(
            r#"
            INSERT INTO services (id, name, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.price_cents)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_service(&self, id: &str) -> DbResult<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT id, name, price_cents, created_at, updated_at FROM services WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn list_services(&self) -> DbResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT id, name, price_cents, created_at, updated_at FROM services ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn catalog_round_trips() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        let now = Utc::now();

        let barber = Barber {
            id: Uuid::new_v4().to_string(),
            name: "Budi".into(),
            photo_url: Some("https://cdn.example.com/budi.jpg".into()),
            rating_centi: 475,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        catalog.insert_barber(&barber).await.unwrap();

        let loaded = catalog.get_barber(&barber.id).await.unwrap().unwrap();
        assert_eq!(loaded, barber);

        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: "Beard Trim".into(),
            price_cents: 25_000,
            created_at: now,
            updated_at: now,
        };
        catalog.insert_service(&service).await.unwrap();
        assert_eq!(catalog.list_services().await.unwrap().len(), 1);

        assert!(catalog.get_customer("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inactive_barbers_are_filtered_from_listing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        let now = Utc::now();

        for (name, active) in [("Budi", true), ("Citra", false)] {
            let barber = Barber {
                id: Uuid::new_v4().to_string(),
                name: name.into(),
                photo_url: None,
                rating_centi: 0,
                is_active: active,
                created_at: now,
                updated_at: now,
            };
            catalog.insert_barber(&barber).await.unwrap();
        }

        let active = catalog.list_active_barbers().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Budi");
    }
}
