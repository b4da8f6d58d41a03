//! # StepResult Model
//!
//! Per-step outcome within a result, unique per (result, step). Failed steps
//! may carry a bug-report URL so a run report can aggregate filed bugs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StepResult {
    pub step_result_id: i64,
    pub result_id: i64,
    pub case_step_id: i64,
    pub status: String,
    pub bug_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New StepResult for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStepResult {
    pub result_id: i64,
    pub case_step_id: i64,
    pub status: String,
    pub bug_url: Option<String>,
}

impl StepResult {
    /// Record a step outcome
    pub async fn create(pool: &PgPool, new_step_result: NewStepResult) -> Result<StepResult, sqlx::Error> {
        sqlx::query_as::<_, StepResult>(
            r#"
            INSERT INTO casetrack_step_results (result_id, case_step_id, status, bug_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING step_result_id, result_id, case_step_id, status, bug_url, created_at, updated_at
            "#,
        )
        .bind(new_step_result.result_id)
        .bind(new_step_result.case_step_id)
        .bind(new_step_result.status)
        .bind(new_step_result.bug_url)
        .fetch_one(pool)
        .await
    }

    /// Find a step result by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<StepResult>, sqlx::Error> {
        sqlx::query_as::<_, StepResult>(
            r#"
            SELECT step_result_id, result_id, case_step_id, status, bug_url, created_at, updated_at
            FROM casetrack_step_results
            WHERE step_result_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List step results of a result, in step order
    pub async fn list_by_result(pool: &PgPool, result_id: i64) -> Result<Vec<StepResult>, sqlx::Error> {
        sqlx::query_as::<_, StepResult>(
            r#"
            SELECT sr.step_result_id, sr.result_id, sr.case_step_id, sr.status, sr.bug_url,
                   sr.created_at, sr.updated_at
            FROM casetrack_step_results sr
            JOIN casetrack_case_steps cs ON cs.case_step_id = sr.case_step_id
            WHERE sr.result_id = $1
            ORDER BY cs.number
            "#,
        )
        .bind(result_id)
        .fetch_all(pool)
        .await
    }

    /// Count step results recorded against a result
    pub async fn count_by_result(pool: &PgPool, result_id: i64) -> Result<i64, sqlx::Error> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM casetrack_step_results WHERE result_id = $1",
        )
        .bind(result_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Mark a step failed, creating the row or updating an existing one
    ///
    /// Runs inside the caller's transaction so the failure record commits
    /// atomically with the result's own status change. A bug URL of `None`
    /// leaves any previously attached URL in place.
    pub async fn upsert_failed(
        tx: &mut Transaction<'_, Postgres>,
        result_id: i64,
        case_step_id: i64,
        bug_url: Option<&str>,
    ) -> Result<StepResult, sqlx::Error> {
        sqlx::query_as::<_, StepResult>(
            r#"
            INSERT INTO casetrack_step_results (result_id, case_step_id, status, bug_url, created_at, updated_at)
            VALUES ($1, $2, 'failed', $3, NOW(), NOW())
            ON CONFLICT (result_id, case_step_id)
            DO UPDATE SET status = 'failed',
                          bug_url = COALESCE(EXCLUDED.bug_url, casetrack_step_results.bug_url),
                          updated_at = NOW()
            RETURNING step_result_id, result_id, case_step_id, status, bug_url, created_at, updated_at
            "#,
        )
        .bind(result_id)
        .bind(case_step_id)
        .bind(bug_url)
        .fetch_one(&mut **tx)
        .await
    }

    /// Delete every step result of a result
    ///
    /// Runs inside the caller's transaction (used by the restart workflow).
    pub async fn delete_by_result(
        tx: &mut Transaction<'_, Postgres>,
        result_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let done = sqlx::query("DELETE FROM casetrack_step_results WHERE result_id = $1")
            .bind(result_id)
            .execute(&mut **tx)
            .await?;

        Ok(done.rows_affected())
    }
}
