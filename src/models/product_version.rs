//! # ProductVersion Model
//!
//! A released or in-flight version of a product. Cases and runs attach to a
//! version rather than the product itself so a case library can evolve with
//! the product.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductVersion {
    pub product_version_id: i64,
    pub product_id: i64,
    pub version: String,
    pub codename: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New ProductVersion for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProductVersion {
    pub product_id: i64,
    pub version: String,
    pub codename: Option<String>,
}

impl ProductVersion {
    /// Create a new product version
    pub async fn create(
        pool: &PgPool,
        new_version: NewProductVersion,
    ) -> Result<ProductVersion, sqlx::Error> {
        sqlx::query_as::<_, ProductVersion>(
            r#"
            INSERT INTO casetrack_product_versions (product_id, version, codename, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING product_version_id, product_id, version, codename, created_at, updated_at
            "#,
        )
        .bind(new_version.product_id)
        .bind(new_version.version)
        .bind(new_version.codename)
        .fetch_one(pool)
        .await
    }

    /// Find a product version by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ProductVersion>, sqlx::Error> {
        sqlx::query_as::<_, ProductVersion>(
            r#"
            SELECT product_version_id, product_id, version, codename, created_at, updated_at
            FROM casetrack_product_versions
            WHERE product_version_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a specific version string under a product
    pub async fn find_by_version(
        pool: &PgPool,
        product_id: i64,
        version: &str,
    ) -> Result<Option<ProductVersion>, sqlx::Error> {
        sqlx::query_as::<_, ProductVersion>(
            r#"
            SELECT product_version_id, product_id, version, codename, created_at, updated_at
            FROM casetrack_product_versions
            WHERE product_id = $1 AND version = $2
            "#,
        )
        .bind(product_id)
        .bind(version)
        .fetch_optional(pool)
        .await
    }

    /// List versions of a product, newest first
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: i64,
    ) -> Result<Vec<ProductVersion>, sqlx::Error> {
        sqlx::query_as::<_, ProductVersion>(
            r#"
            SELECT product_version_id, product_id, version, codename, created_at, updated_at
            FROM casetrack_product_versions
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }
}
