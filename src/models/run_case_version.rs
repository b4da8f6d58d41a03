//! # RunCaseVersion Model
//!
//! Inclusion of a specific case version in a run. Results attach here: one
//! per (run-case-version, environment, tester) execution.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RunCaseVersion {
    pub run_case_version_id: i64,
    pub run_id: i64,
    pub case_version_id: i64,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New RunCaseVersion for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRunCaseVersion {
    pub run_id: i64,
    pub case_version_id: i64,
    pub order_index: i32,
}

impl RunCaseVersion {
    /// Include a case version in a run
    pub async fn create(
        pool: &PgPool,
        new_member: NewRunCaseVersion,
    ) -> Result<RunCaseVersion, sqlx::Error> {
        sqlx::query_as::<_, RunCaseVersion>(
            r#"
            INSERT INTO casetrack_run_case_versions (run_id, case_version_id, order_index, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING run_case_version_id, run_id, case_version_id, order_index, created_at, updated_at
            "#,
        )
        .bind(new_member.run_id)
        .bind(new_member.case_version_id)
        .bind(new_member.order_index)
        .fetch_one(pool)
        .await
    }

    /// Find a run-case-version by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<RunCaseVersion>, sqlx::Error> {
        sqlx::query_as::<_, RunCaseVersion>(
            r#"
            SELECT run_case_version_id, run_id, case_version_id, order_index, created_at, updated_at
            FROM casetrack_run_case_versions
            WHERE run_case_version_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List the case versions included in a run, in order
    pub async fn list_by_run(pool: &PgPool, run_id: i64) -> Result<Vec<RunCaseVersion>, sqlx::Error> {
        sqlx::query_as::<_, RunCaseVersion>(
            r#"
            SELECT run_case_version_id, run_id, case_version_id, order_index, created_at, updated_at
            FROM casetrack_run_case_versions
            WHERE run_id = $1
            ORDER BY order_index, run_case_version_id
            "#,
        )
        .bind(run_id)
        .fetch_all(pool)
        .await
    }
}
