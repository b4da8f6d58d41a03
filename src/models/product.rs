//! # Product Model
//!
//! The root of the library hierarchy. Suites, cases and runs all trace back
//! to a product through its versions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Product for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
}

impl Product {
    /// Create a new product
    pub async fn create(pool: &PgPool, new_product: NewProduct) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO casetrack_products (name, description, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING product_id, name, description, created_at, updated_at
            "#,
        )
        .bind(new_product.name)
        .bind(new_product.description)
        .fetch_one(pool)
        .await
    }

    /// Find a product by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, created_at, updated_at
            FROM casetrack_products
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a product by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, created_at, updated_at
            FROM casetrack_products
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// List all products ordered by name
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, created_at, updated_at
            FROM casetrack_products
            ORDER BY name
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Update name and/or description
    pub async fn update(
        &mut self,
        pool: &PgPool,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE casetrack_products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE product_id = $1
            RETURNING product_id, name, description, created_at, updated_at
            "#,
        )
        .bind(self.product_id)
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await?;

        *self = updated;
        Ok(())
    }

    /// Delete the product and everything hanging off it
    pub async fn delete(self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM casetrack_products WHERE product_id = $1")
            .bind(self.product_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
