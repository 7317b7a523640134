//! Product repository for database operations.
//!
//! Queries are bound at runtime; rows come back as [`ProductRow`] and are
//! converted at the boundary so handlers only ever see domain types.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use partfinder_core::ProductId;

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

/// Columns selected for every product query, in [`ProductRow`] order.
const PRODUCT_COLUMNS: &str = "id, product_type, lwc, partner, insulation, length, \
     blade_size, layers, qty_per_pallet, box_pallet, part_number, created_at, updated_at";

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    product_type: String,
    lwc: String,
    partner: Option<String>,
    insulation: String,
    length: String,
    blade_size: String,
    layers: String,
    qty_per_pallet: i64,
    box_pallet: i64,
    part_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            product_type: row.product_type,
            lwc: row.lwc,
            partner: row.partner,
            insulation: row.insulation,
            length: row.length,
            blade_size: row.blade_size,
            layers: row.layers,
            qty_per_pallet: row.qty_per_pallet,
            box_pallet: row.box_pallet,
            part_number: row.part_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all products in the catalog's composite order:
    /// `(lwc, partner, insulation, length)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product \
             ORDER BY lwc, partner, insulation, length"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO product (product_type, lwc, partner, insulation, length, \
             blade_size, layers, qty_per_pallet, box_pallet, part_number, \
             created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.product_type)
        .bind(&new.lwc)
        .bind(&new.partner)
        .bind(&new.insulation)
        .bind(&new.length)
        .bind(&new.blade_size)
        .bind(&new.layers)
        .bind(new.qty_per_pallet)
        .bind(new.box_pallet)
        .bind(&new.part_number)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Overwrite all mutable fields of a product in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ProductId, new: &NewProduct) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE product SET product_type = ?1, lwc = ?2, partner = ?3, \
             insulation = ?4, length = ?5, blade_size = ?6, layers = ?7, \
             qty_per_pallet = ?8, box_pallet = ?9, part_number = ?10, \
             updated_at = ?11 \
             WHERE id = ?12",
        )
        .bind(&new.product_type)
        .bind(&new.lwc)
        .bind(&new.partner)
        .bind(&new.insulation)
        .bind(&new.length)
        .bind(&new.blade_size)
        .bind(&new.layers)
        .bind(new.qty_per_pallet)
        .bind(new.box_pallet)
        .bind(&new.part_number)
        .bind(Utc::now())
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product by its ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Delete every product. Used by the destructive import reset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM product").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
