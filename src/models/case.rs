//! # Case Model
//!
//! A test case under a product version. The case row itself is a stable
//! identity; everything a tester reads (name, instructions, steps) lives on
//! its versions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::case_version::CaseVersion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Case {
    pub case_id: i64,
    pub product_version_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Case for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    pub product_version_id: i64,
}

impl Case {
    /// Create a new case
    pub async fn create(pool: &PgPool, new_case: NewCase) -> Result<Case, sqlx::Error> {
        sqlx::query_as::<_, Case>(
            r#"
            INSERT INTO casetrack_cases (product_version_id, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            RETURNING case_id, product_version_id, created_at, updated_at
            "#,
        )
        .bind(new_case.product_version_id)
        .fetch_one(pool)
        .await
    }

    /// Find a case by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Case>, sqlx::Error> {
        sqlx::query_as::<_, Case>(
            r#"
            SELECT case_id, product_version_id, created_at, updated_at
            FROM casetrack_cases
            WHERE case_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List cases under a product version
    pub async fn list_by_product_version(
        pool: &PgPool,
        product_version_id: i64,
    ) -> Result<Vec<Case>, sqlx::Error> {
        sqlx::query_as::<_, Case>(
            r#"
            SELECT case_id, product_version_id, created_at, updated_at
            FROM casetrack_cases
            WHERE product_version_id = $1
            ORDER BY case_id
            "#,
        )
        .bind(product_version_id)
        .fetch_all(pool)
        .await
    }

    /// Versions of this case, newest number first
    pub async fn versions(&self, pool: &PgPool) -> Result<Vec<CaseVersion>, sqlx::Error> {
        CaseVersion::list_by_case(pool, self.case_id).await
    }
}
