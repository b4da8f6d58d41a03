//! # CaseVersion Model
//!
//! An immutable, numbered snapshot of a test case's instructions. Numbers are
//! assigned sequentially per case at creation time; editing a case in the
//! frontend produces a new version rather than rewriting an old one, so
//! results stay pinned to exactly what the tester saw.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::case_step::CaseStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CaseVersion {
    pub case_version_id: i64,
    pub case_id: i64,
    pub number: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New CaseVersion for creation; the version number is assigned by `create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCaseVersion {
    pub case_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl CaseVersion {
    /// Create a new version of a case, numbered one past the current maximum
    pub async fn create(
        pool: &PgPool,
        new_version: NewCaseVersion,
    ) -> Result<CaseVersion, sqlx::Error> {
        sqlx::query_as::<_, CaseVersion>(
            r#"
            INSERT INTO casetrack_case_versions (case_id, number, name, description, created_at, updated_at)
            SELECT $1,
                   COALESCE(MAX(number), 0) + 1,
                   $2, $3, NOW(), NOW()
            FROM casetrack_case_versions
            WHERE case_id = $1
            RETURNING case_version_id, case_id, number, name, description, created_at, updated_at
            "#,
        )
        .bind(new_version.case_id)
        .bind(new_version.name)
        .bind(new_version.description)
        .fetch_one(pool)
        .await
    }

    /// Find a case version by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<CaseVersion>, sqlx::Error> {
        sqlx::query_as::<_, CaseVersion>(
            r#"
            SELECT case_version_id, case_id, number, name, description, created_at, updated_at
            FROM casetrack_case_versions
            WHERE case_version_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a specific numbered version of a case
    pub async fn find_by_case_and_number(
        pool: &PgPool,
        case_id: i64,
        number: i32,
    ) -> Result<Option<CaseVersion>, sqlx::Error> {
        sqlx::query_as::<_, CaseVersion>(
            r#"
            SELECT case_version_id, case_id, number, name, description, created_at, updated_at
            FROM casetrack_case_versions
            WHERE case_id = $1 AND number = $2
            "#,
        )
        .bind(case_id)
        .bind(number)
        .fetch_optional(pool)
        .await
    }

    /// The highest-numbered version of a case, if any exist
    pub async fn latest_for_case(
        pool: &PgPool,
        case_id: i64,
    ) -> Result<Option<CaseVersion>, sqlx::Error> {
        sqlx::query_as::<_, CaseVersion>(
            r#"
            SELECT case_version_id, case_id, number, name, description, created_at, updated_at
            FROM casetrack_case_versions
            WHERE case_id = $1
            ORDER BY number DESC
            LIMIT 1
            "#,
        )
        .bind(case_id)
        .fetch_optional(pool)
        .await
    }

    /// List versions of a case, newest number first
    pub async fn list_by_case(pool: &PgPool, case_id: i64) -> Result<Vec<CaseVersion>, sqlx::Error> {
        sqlx::query_as::<_, CaseVersion>(
            r#"
            SELECT case_version_id, case_id, number, name, description, created_at, updated_at
            FROM casetrack_case_versions
            WHERE case_id = $1
            ORDER BY number DESC
            "#,
        )
        .bind(case_id)
        .fetch_all(pool)
        .await
    }

    /// Steps of this version in execution order
    pub async fn steps(&self, pool: &PgPool) -> Result<Vec<CaseStep>, sqlx::Error> {
        CaseStep::list_by_case_version(pool, self.case_version_id).await
    }
}
