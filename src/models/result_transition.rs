//! # ResultTransition Model
//!
//! Audit trail of result status changes. Every transition the state machine
//! applies appends one row here; `most_recent` marks the row reflecting the
//! result's current status and `sort_key` orders the history.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResultTransition {
    pub result_transition_id: i64,
    pub result_id: i64,
    pub from_status: Option<String>,
    pub to_status: String,
    pub event: String,
    pub user_id: Option<i64>,
    pub metadata: Option<serde_json::Value>,
    pub sort_key: i32,
    pub most_recent: bool,
    pub created_at: NaiveDateTime,
}

impl ResultTransition {
    /// Find a transition by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ResultTransition>, sqlx::Error> {
        sqlx::query_as::<_, ResultTransition>(
            r#"
            SELECT result_transition_id, result_id, from_status, to_status, event,
                   user_id, metadata, sort_key, most_recent, created_at
            FROM casetrack_result_transitions
            WHERE result_transition_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Full transition history of a result, most recent first
    pub async fn list_by_result(
        pool: &PgPool,
        result_id: i64,
    ) -> Result<Vec<ResultTransition>, sqlx::Error> {
        sqlx::query_as::<_, ResultTransition>(
            r#"
            SELECT result_transition_id, result_id, from_status, to_status, event,
                   user_id, metadata, sort_key, most_recent, created_at
            FROM casetrack_result_transitions
            WHERE result_id = $1
            ORDER BY sort_key DESC
            "#,
        )
        .bind(result_id)
        .fetch_all(pool)
        .await
    }

    /// The transition reflecting the result's current status, if any
    pub async fn most_recent_for_result(
        pool: &PgPool,
        result_id: i64,
    ) -> Result<Option<ResultTransition>, sqlx::Error> {
        sqlx::query_as::<_, ResultTransition>(
            r#"
            SELECT result_transition_id, result_id, from_status, to_status, event,
                   user_id, metadata, sort_key, most_recent, created_at
            FROM casetrack_result_transitions
            WHERE result_id = $1 AND most_recent = true
            ORDER BY sort_key DESC
            LIMIT 1
            "#,
        )
        .bind(result_id)
        .fetch_optional(pool)
        .await
    }
}
