//! # SuiteCase Model
//!
//! Membership of a case in a suite, with an ordering index. Creation refuses
//! pairs whose suite and case belong to different products.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::CasetrackError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SuiteCase {
    pub suite_case_id: i64,
    pub suite_id: i64,
    pub case_id: i64,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New SuiteCase for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSuiteCase {
    pub suite_id: i64,
    pub case_id: i64,
    pub order_index: i32,
}

impl SuiteCase {
    /// Add a case to a suite
    ///
    /// The suite and the case's product version must belong to the same
    /// product; mixed pairs are rejected with a validation error.
    pub async fn create(
        pool: &PgPool,
        new_member: NewSuiteCase,
    ) -> Result<SuiteCase, CasetrackError> {
        let products = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT s.product_id, pv.product_id
            FROM casetrack_suites s,
                 casetrack_cases c
                 JOIN casetrack_product_versions pv
                   ON pv.product_version_id = c.product_version_id
            WHERE s.suite_id = $1 AND c.case_id = $2
            "#,
        )
        .bind(new_member.suite_id)
        .bind(new_member.case_id)
        .fetch_optional(pool)
        .await?;

        match products {
            Some((suite_product, case_product)) if suite_product != case_product => {
                return Err(CasetrackError::ValidationError(format!(
                    "suite {} belongs to product {} but case {} belongs to product {}",
                    new_member.suite_id, suite_product, new_member.case_id, case_product
                )));
            }
            Some(_) => {}
            None => {
                return Err(CasetrackError::ValidationError(format!(
                    "suite {} or case {} does not exist",
                    new_member.suite_id, new_member.case_id
                )));
            }
        }

        let member = sqlx::query_as::<_, SuiteCase>(
            r#"
            INSERT INTO casetrack_suite_cases (suite_id, case_id, order_index, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING suite_case_id, suite_id, case_id, order_index, created_at, updated_at
            "#,
        )
        .bind(new_member.suite_id)
        .bind(new_member.case_id)
        .bind(new_member.order_index)
        .fetch_one(pool)
        .await?;

        Ok(member)
    }

    /// List suite members in order
    pub async fn list_by_suite(pool: &PgPool, suite_id: i64) -> Result<Vec<SuiteCase>, sqlx::Error> {
        sqlx::query_as::<_, SuiteCase>(
            r#"
            SELECT suite_case_id, suite_id, case_id, order_index, created_at, updated_at
            FROM casetrack_suite_cases
            WHERE suite_id = $1
            ORDER BY order_index, suite_case_id
            "#,
        )
        .bind(suite_id)
        .fetch_all(pool)
        .await
    }
}
