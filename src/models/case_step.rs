//! # CaseStep Model
//!
//! One numbered instruction within a case version. Step numbers are assigned
//! sequentially per version and are what testers reference when reporting a
//! failure against a particular step.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CaseStep {
    pub case_step_id: i64,
    pub case_version_id: i64,
    pub number: i32,
    pub instruction: String,
    pub expected: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New CaseStep for creation; the step number is assigned by `create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCaseStep {
    pub case_version_id: i64,
    pub instruction: String,
    pub expected: Option<String>,
}

impl CaseStep {
    /// Create a new step, numbered one past the version's current maximum
    pub async fn create(pool: &PgPool, new_step: NewCaseStep) -> Result<CaseStep, sqlx::Error> {
        sqlx::query_as::<_, CaseStep>(
            r#"
            INSERT INTO casetrack_case_steps (case_version_id, number, instruction, expected, created_at, updated_at)
            SELECT $1,
                   COALESCE(MAX(number), 0) + 1,
                   $2, $3, NOW(), NOW()
            FROM casetrack_case_steps
            WHERE case_version_id = $1
            RETURNING case_step_id, case_version_id, number, instruction, expected, created_at, updated_at
            "#,
        )
        .bind(new_step.case_version_id)
        .bind(new_step.instruction)
        .bind(new_step.expected)
        .fetch_one(pool)
        .await
    }

    /// Find a step by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<CaseStep>, sqlx::Error> {
        sqlx::query_as::<_, CaseStep>(
            r#"
            SELECT case_step_id, case_version_id, number, instruction, expected, created_at, updated_at
            FROM casetrack_case_steps
            WHERE case_step_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a step of a case version by its number
    pub async fn find_by_number(
        pool: &PgPool,
        case_version_id: i64,
        number: i32,
    ) -> Result<Option<CaseStep>, sqlx::Error> {
        sqlx::query_as::<_, CaseStep>(
            r#"
            SELECT case_step_id, case_version_id, number, instruction, expected, created_at, updated_at
            FROM casetrack_case_steps
            WHERE case_version_id = $1 AND number = $2
            "#,
        )
        .bind(case_version_id)
        .bind(number)
        .fetch_optional(pool)
        .await
    }

    /// List steps of a case version in execution order
    pub async fn list_by_case_version(
        pool: &PgPool,
        case_version_id: i64,
    ) -> Result<Vec<CaseStep>, sqlx::Error> {
        sqlx::query_as::<_, CaseStep>(
            r#"
            SELECT case_step_id, case_version_id, number, instruction, expected, created_at, updated_at
            FROM casetrack_case_steps
            WHERE case_version_id = $1
            ORDER BY number
            "#,
        )
        .bind(case_version_id)
        .fetch_all(pool)
        .await
    }
}
