//! # Run Model
//!
//! A scheduled execution pass of one or more test cases against a product
//! version. Runs start as drafts, are activated for testers, and can be
//! disabled when the pass is over.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Run {
    pub run_id: i64,
    pub product_version_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Run for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRun {
    pub product_version_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Run {
    /// Create a new run in `draft` status
    pub async fn create(pool: &PgPool, new_run: NewRun) -> Result<Run, sqlx::Error> {
        sqlx::query_as::<_, Run>(
            r#"
            INSERT INTO casetrack_runs (product_version_id, name, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'draft', NOW(), NOW())
            RETURNING run_id, product_version_id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(new_run.product_version_id)
        .bind(new_run.name)
        .bind(new_run.description)
        .fetch_one(pool)
        .await
    }

    /// Find a run by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Run>, sqlx::Error> {
        sqlx::query_as::<_, Run>(
            r#"
            SELECT run_id, product_version_id, name, description, status, created_at, updated_at
            FROM casetrack_runs
            WHERE run_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List runs against a product version, newest first
    pub async fn list_by_product_version(
        pool: &PgPool,
        product_version_id: i64,
    ) -> Result<Vec<Run>, sqlx::Error> {
        sqlx::query_as::<_, Run>(
            r#"
            SELECT run_id, product_version_id, name, description, status, created_at, updated_at
            FROM casetrack_runs
            WHERE product_version_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_version_id)
        .fetch_all(pool)
        .await
    }

    /// Open the run to testers
    pub async fn activate(&mut self, pool: &PgPool) -> Result<(), sqlx::Error> {
        self.set_status(pool, "active").await
    }

    /// Close the run
    pub async fn disable(&mut self, pool: &PgPool) -> Result<(), sqlx::Error> {
        self.set_status(pool, "disabled").await
    }

    async fn set_status(&mut self, pool: &PgPool, status: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE casetrack_runs SET status = $2, updated_at = NOW()
            WHERE run_id = $1
            "#,
        )
        .bind(self.run_id)
        .bind(status)
        .execute(pool)
        .await?;

        self.status = status.to_string();
        Ok(())
    }
}
