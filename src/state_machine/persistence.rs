use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};

use super::errors::{PersistenceError, PersistenceResult};

/// Trait for persisting state transitions as audit rows
///
/// Writes happen inside the caller's transaction so the audit row commits
/// atomically with the status change it records.
#[async_trait]
pub trait TransitionPersistence<T> {
    /// Persist a state transition
    async fn persist_transition(
        &self,
        entity: &T,
        from_status: Option<String>,
        to_status: String,
        event: &str,
        user_id: Option<i64>,
        metadata: Option<Value>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> PersistenceResult<()>;

    /// Resolve the current status from persisted transitions
    async fn resolve_current_state(
        &self,
        entity_id: i64,
        pool: &PgPool,
    ) -> PersistenceResult<Option<String>>;

    /// Get the next sort key for ordering transitions
    async fn next_sort_key(
        &self,
        entity_id: i64,
        tx: &mut Transaction<'_, Postgres>,
    ) -> PersistenceResult<i32>;
}

/// Result transition persistence implementation
pub struct ResultTransitionPersistence;

#[async_trait]
impl TransitionPersistence<crate::models::RunResult> for ResultTransitionPersistence {
    async fn persist_transition(
        &self,
        result: &crate::models::RunResult,
        from_status: Option<String>,
        to_status: String,
        event: &str,
        user_id: Option<i64>,
        metadata: Option<Value>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> PersistenceResult<()> {
        let sort_key = self.next_sort_key(result.result_id, tx).await?;

        sqlx::query(
            r#"
            INSERT INTO casetrack_result_transitions
                (result_id, from_status, to_status, event, user_id, metadata, sort_key, most_recent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, true, NOW())
            "#,
        )
        .bind(result.result_id)
        .bind(from_status)
        .bind(to_status)
        .bind(event)
        .bind(user_id)
        .bind(metadata)
        .bind(sort_key)
        .execute(&mut **tx)
        .await
        .map_err(|e| PersistenceError::TransitionSaveFailed {
            reason: format!("Failed to insert transition: {e}"),
        })?;

        sqlx::query(
            r#"
            UPDATE casetrack_result_transitions
            SET most_recent = false
            WHERE result_id = $1 AND sort_key < $2
            "#,
        )
        .bind(result.result_id)
        .bind(sort_key)
        .execute(&mut **tx)
        .await
        .map_err(|e| PersistenceError::TransitionSaveFailed {
            reason: format!("Failed to update most_recent flags: {e}"),
        })?;

        Ok(())
    }

    async fn resolve_current_state(
        &self,
        result_id: i64,
        pool: &PgPool,
    ) -> PersistenceResult<Option<String>> {
        let row = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT to_status
            FROM casetrack_result_transitions
            WHERE result_id = $1 AND most_recent = true
            ORDER BY sort_key DESC
            LIMIT 1
            "#,
        )
        .bind(result_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(to_status,)| to_status))
    }

    async fn next_sort_key(
        &self,
        result_id: i64,
        tx: &mut Transaction<'_, Postgres>,
    ) -> PersistenceResult<i32> {
        let (next_key,) = sqlx::query_as::<_, (i32,)>(
            r#"
            SELECT COALESCE(MAX(sort_key), 0) + 1
            FROM casetrack_result_transitions
            WHERE result_id = $1
            "#,
        )
        .bind(result_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(next_key)
    }
}
