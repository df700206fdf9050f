//! Postgres-backed product repository.
//!
//! ## Error Mapping
//!
//! | SQLx / data condition | RepositoryError |
//! |---|---|
//! | Any `sqlx::Error` (pool closed, network, constraint) | `Unavailable` |
//! | Row with non-positive id, negative price, or blank text | `Corrupt` |
//!
//! Ids that do not fit in `BIGINT` cannot exist in the table, so lookups for
//! them short-circuit to "not found" without a round trip.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::instrument;

use shopfront_core::ProductId;
use shopfront_products::{Product, ProductAttributes, ProductRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id        BIGSERIAL PRIMARY KEY,
    name      TEXT   NOT NULL,
    maker     TEXT   NOT NULL,
    price     BIGINT NOT NULL CHECK (price >= 0),
    image_url TEXT
)
"#;

const COLUMNS: &str = "id, name, maker, price, image_url";

/// Product repository on a shared SQLx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url).await.map_err(unavailable)?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

fn unavailable(e: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %e, "product store query failed");
    RepositoryError::Unavailable(e.to_string())
}

fn db_id(id: ProductId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

fn price_param(price: u64) -> Result<i64, RepositoryError> {
    i64::try_from(price)
        .map_err(|_| RepositoryError::Unavailable(format!("price {price} exceeds BIGINT")))
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    let corrupt = |e: sqlx::Error| RepositoryError::Corrupt(e.to_string());

    let id: i64 = row.try_get("id").map_err(corrupt)?;
    let name: String = row.try_get("name").map_err(corrupt)?;
    let maker: String = row.try_get("maker").map_err(corrupt)?;
    let price: i64 = row.try_get("price").map_err(corrupt)?;
    let image_url: Option<String> = row.try_get("image_url").map_err(corrupt)?;

    let id = u64::try_from(id)
        .ok()
        .filter(|v| *v > 0)
        .map(ProductId::new)
        .ok_or_else(|| RepositoryError::Corrupt(format!("invalid product id {id}")))?;
    let price = u64::try_from(price)
        .map_err(|_| RepositoryError::Corrupt(format!("negative price on product {id}")))?;
    let attributes = ProductAttributes::new(name, maker, price, image_url)
        .map_err(|e| RepositoryError::Corrupt(format!("product {id}: {e}")))?;

    Ok(Product::new(id, attributes))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;
        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let Some(key) = db_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;
        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, attributes))]
    async fn insert(&self, attributes: ProductAttributes) -> Result<Product, RepositoryError> {
        let row = sqlx::query(&format!(
            "INSERT INTO products (name, maker, price, image_url) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(attributes.name())
        .bind(attributes.maker())
        .bind(price_param(attributes.price())?)
        .bind(attributes.image_url())
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;
        product_from_row(&row)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed()))]
    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
        let Some(key) = db_id(product.id_typed()) else {
            return Ok(None);
        };
        let row = sqlx::query(&format!(
            "UPDATE products SET name = $2, maker = $3, price = $4, image_url = $5 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(key)
        .bind(product.name())
        .bind(product.maker())
        .bind(price_param(product.price())?)
        .bind(product.image_url())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;
        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let Some(key) = db_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(&format!("DELETE FROM products WHERE id = $1 RETURNING {COLUMNS}"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;
        row.as_ref().map(product_from_row).transpose()
    }
}
