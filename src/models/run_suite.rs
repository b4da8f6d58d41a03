//! # RunSuite Model
//!
//! Inclusion of a suite in a run, with an ordering index.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RunSuite {
    pub run_suite_id: i64,
    pub run_id: i64,
    pub suite_id: i64,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New RunSuite for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRunSuite {
    pub run_id: i64,
    pub suite_id: i64,
    pub order_index: i32,
}

impl RunSuite {
    /// Include a suite in a run
    pub async fn create(pool: &PgPool, new_member: NewRunSuite) -> Result<RunSuite, sqlx::Error> {
        sqlx::query_as::<_, RunSuite>(
            r#"
            INSERT INTO casetrack_run_suites (run_id, suite_id, order_index, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING run_suite_id, run_id, suite_id, order_index, created_at, updated_at
            "#,
        )
        .bind(new_member.run_id)
        .bind(new_member.suite_id)
        .bind(new_member.order_index)
        .fetch_one(pool)
        .await
    }

    /// List suites included in a run, in order
    pub async fn list_by_run(pool: &PgPool, run_id: i64) -> Result<Vec<RunSuite>, sqlx::Error> {
        sqlx::query_as::<_, RunSuite>(
            r#"
            SELECT run_suite_id, run_id, suite_id, order_index, created_at, updated_at
            FROM casetrack_run_suites
            WHERE run_id = $1
            ORDER BY order_index, run_suite_id
            "#,
        )
        .bind(run_id)
        .fetch_all(pool)
        .await
    }
}
