//! # RunResult Model
//!
//! One tester's execution of one case version within a run, under one
//! environment. Carries the workflow status (`created`, `started`, `passed`,
//! `failed`, `invalidated`), the `started`/`completed` timestamps, the
//! tester's closing comment, and the user who last moved it.
//!
//! ## Database Schema
//!
//! Maps to `casetrack_results`:
//! - `status`: workflow status string, `created` on insert
//! - `started` / `completed`: nullable timestamps; `completed` is non-null
//!   exactly when the status is terminal
//! - `comment`: non-null, empty until a tester supplies one
//! - `modified_by_id`: the user who last drove a transition, when known
//!
//! Status changes go through
//! [`ResultStateMachine`](crate::state_machine::ResultStateMachine); this
//! model owns the rows and the read-side queries.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::state_machine::ResultStatus;

use super::step_result::StepResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RunResult {
    pub result_id: i64,
    pub run_case_version_id: i64,
    pub environment_id: i64,
    pub tester_id: i64,
    pub status: String,
    pub started: Option<NaiveDateTime>,
    pub completed: Option<NaiveDateTime>,
    pub comment: String,
    pub modified_by_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New RunResult for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRunResult {
    pub run_case_version_id: i64,
    pub environment_id: i64,
    pub tester_id: i64,
}

impl RunResult {
    /// Create a new result in `created` status
    pub async fn create(pool: &PgPool, new_result: NewRunResult) -> Result<RunResult, sqlx::Error> {
        sqlx::query_as::<_, RunResult>(
            r#"
            INSERT INTO casetrack_results
                (run_case_version_id, environment_id, tester_id, status, comment, created_at, updated_at)
            VALUES ($1, $2, $3, 'created', '', NOW(), NOW())
            RETURNING result_id, run_case_version_id, environment_id, tester_id, status,
                      started, completed, comment, modified_by_id, created_at, updated_at
            "#,
        )
        .bind(new_result.run_case_version_id)
        .bind(new_result.environment_id)
        .bind(new_result.tester_id)
        .fetch_one(pool)
        .await
    }

    /// Find a result by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<RunResult>, sqlx::Error> {
        sqlx::query_as::<_, RunResult>(
            r#"
            SELECT result_id, run_case_version_id, environment_id, tester_id, status,
                   started, completed, comment, modified_by_id, created_at, updated_at
            FROM casetrack_results
            WHERE result_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List results recorded against a run-case-version
    pub async fn list_by_run_case_version(
        pool: &PgPool,
        run_case_version_id: i64,
    ) -> Result<Vec<RunResult>, sqlx::Error> {
        sqlx::query_as::<_, RunResult>(
            r#"
            SELECT result_id, run_case_version_id, environment_id, tester_id, status,
                   started, completed, comment, modified_by_id, created_at, updated_at
            FROM casetrack_results
            WHERE run_case_version_id = $1
            ORDER BY result_id
            "#,
        )
        .bind(run_case_version_id)
        .fetch_all(pool)
        .await
    }

    /// Parse the stored status string
    pub fn current_status(&self) -> Result<ResultStatus, String> {
        self.status.parse()
    }

    /// Step results recorded against this result, in step order
    pub async fn step_results(&self, pool: &PgPool) -> Result<Vec<StepResult>, sqlx::Error> {
        StepResult::list_by_result(pool, self.result_id).await
    }

    /// Deduplicated bug URLs across all step results of this result
    pub async fn bug_urls(&self, pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT DISTINCT bug_url
            FROM casetrack_step_results
            WHERE result_id = $1 AND bug_url IS NOT NULL AND bug_url <> ''
            "#,
        )
        .bind(self.result_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(url,)| url).collect())
    }

    /// Human-readable one-line rendering for audit logs and run reports
    ///
    /// Produces, e.g.:
    /// `Case 'Open URL' included in run 'FF10', run by tester in English, OS X: started`
    pub async fn summary(&self, pool: &PgPool) -> Result<String, sqlx::Error> {
        let (case_name, run_name, username) = sqlx::query_as::<_, (String, String, String)>(
            r#"
            SELECT cv.name, r.name, u.username
            FROM casetrack_results res
            JOIN casetrack_run_case_versions rcv
              ON rcv.run_case_version_id = res.run_case_version_id
            JOIN casetrack_case_versions cv ON cv.case_version_id = rcv.case_version_id
            JOIN casetrack_runs r ON r.run_id = rcv.run_id
            JOIN casetrack_users u ON u.user_id = res.tester_id
            WHERE res.result_id = $1
            "#,
        )
        .bind(self.result_id)
        .fetch_one(pool)
        .await?;

        let environment = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT e.name
            FROM casetrack_elements e
            JOIN casetrack_environment_elements ee ON ee.element_id = e.element_id
            WHERE ee.environment_id = $1
            ORDER BY e.name
            "#,
        )
        .bind(self.environment_id)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(name,)| name)
        .collect::<Vec<_>>()
        .join(", ");

        Ok(format!(
            "Case '{case_name}' included in run '{run_name}', run by {username} in {environment}: {status}",
            status = self.status
        ))
    }
}
