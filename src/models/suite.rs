//! # Suite Model
//!
//! A named grouping of cases under a product. Runs pull cases in through
//! suites (see `RunSuite`) or individually (see `RunCaseVersion`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Suite {
    pub suite_id: i64,
    pub product_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Suite for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSuite {
    pub product_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Suite {
    /// Create a new suite in `active` status
    pub async fn create(pool: &PgPool, new_suite: NewSuite) -> Result<Suite, sqlx::Error> {
        sqlx::query_as::<_, Suite>(
            r#"
            INSERT INTO casetrack_suites (product_id, name, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'active', NOW(), NOW())
            RETURNING suite_id, product_id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(new_suite.product_id)
        .bind(new_suite.name)
        .bind(new_suite.description)
        .fetch_one(pool)
        .await
    }

    /// Find a suite by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Suite>, sqlx::Error> {
        sqlx::query_as::<_, Suite>(
            r#"
            SELECT suite_id, product_id, name, description, status, created_at, updated_at
            FROM casetrack_suites
            WHERE suite_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List suites of a product ordered by name
    pub async fn list_by_product(pool: &PgPool, product_id: i64) -> Result<Vec<Suite>, sqlx::Error> {
        sqlx::query_as::<_, Suite>(
            r#"
            SELECT suite_id, product_id, name, description, status, created_at, updated_at
            FROM casetrack_suites
            WHERE product_id = $1
            ORDER BY name
            "#,
        )
        .bind(product_id)
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
        let updated = sqlx::query_as::<_, Suite>(
            r#"
            UPDATE casetrack_suites
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE suite_id = $1
            RETURNING suite_id, product_id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(self.suite_id)
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await?;

        *self = updated;
        Ok(())
    }
}
