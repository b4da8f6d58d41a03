use chrono::{NaiveDateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::warn;

use crate::constants::events as event_names;
use crate::events::EventPublisher;
use crate::models::{CaseStep, RunResult, StepResult};

use super::{
    errors::{StateMachineError, StateMachineResult},
    events::ResultEvent,
    persistence::{ResultTransitionPersistence, TransitionPersistence},
    states::ResultStatus,
};

/// State machine driving the result execution workflow
///
/// Owns one [`RunResult`] row and applies lifecycle events to it: the row
/// update, any step-result side effects, and the audit transition commit in a
/// single transaction, after which the corresponding lifecycle event is
/// published.
pub struct ResultStateMachine {
    result: RunResult,
    pool: PgPool,
    event_publisher: EventPublisher,
    persistence: ResultTransitionPersistence,
}

/// Apply an event to an in-memory result record
///
/// This is the entire field-mutation contract of the workflow, kept pure so
/// it can be exercised without a database:
/// - every event sets `status` to its target and stamps `updated_at`
/// - `Start`/`Restart` stamp `started` and drop any stale `completed`
///   timestamp (`completed` stays non-null exactly for terminal statuses)
/// - finish events stamp `completed` and store the comment when one is given
/// - `Restart` additionally clears the comment
/// - `modified_by_id` is only overwritten when a user is supplied
pub fn apply_event(
    result: &mut RunResult,
    event: &ResultEvent,
    user: Option<i64>,
    now: NaiveDateTime,
) {
    result.status = event.target_status().to_string();

    match event {
        ResultEvent::Start => {
            result.started = Some(now);
            result.completed = None;
        }
        ResultEvent::Restart => {
            result.started = Some(now);
            result.completed = None;
            result.comment.clear();
        }
        ResultEvent::FinishSucceed => {
            result.completed = Some(now);
        }
        ResultEvent::FinishFail { comment, .. } | ResultEvent::FinishInvalidate { comment } => {
            result.completed = Some(now);
            if let Some(comment) = comment {
                result.comment = comment.clone();
            }
        }
    }

    if user.is_some() {
        result.modified_by_id = user;
    }
    result.updated_at = now;
}

impl ResultStateMachine {
    /// Create a new result state machine instance
    pub fn new(result: RunResult, pool: PgPool, event_publisher: EventPublisher) -> Self {
        Self {
            result,
            pool,
            event_publisher,
            persistence: ResultTransitionPersistence,
        }
    }

    /// Get result information
    pub fn result(&self) -> &RunResult {
        &self.result
    }

    /// Get result ID
    pub fn result_id(&self) -> i64 {
        self.result.result_id
    }

    /// Get the current status of the result
    pub fn current_status(&self) -> StateMachineResult<ResultStatus> {
        self.result.status.parse().map_err(|_| {
            StateMachineError::Internal(format!("Invalid status in database: {}", self.result.status))
        })
    }

    /// Check if the result carries a verdict
    pub fn is_terminal(&self) -> StateMachineResult<bool> {
        Ok(self.current_status()?.is_terminal())
    }

    /// Mark the result started and stamp the started timestamp
    pub async fn start(&mut self, user: Option<i64>) -> StateMachineResult<ResultStatus> {
        self.transition(ResultEvent::Start, user).await
    }

    /// Record a pass verdict and stamp the completed timestamp
    pub async fn finish_succeed(&mut self, user: Option<i64>) -> StateMachineResult<ResultStatus> {
        self.transition(ResultEvent::FinishSucceed, user).await
    }

    /// Record a failure verdict, optionally pinned to one step
    ///
    /// When `step_number` names a step of the executed case version, that
    /// step's result is created or updated to `failed`, with `bug_url`
    /// attached when given. A number matching no step is skipped (the result
    /// still fails as a whole) and logged at warn level.
    pub async fn finish_fail(
        &mut self,
        user: Option<i64>,
        comment: Option<String>,
        step_number: Option<i32>,
        bug_url: Option<String>,
    ) -> StateMachineResult<ResultStatus> {
        self.transition(
            ResultEvent::FinishFail {
                comment,
                step_number,
                bug_url,
            },
            user,
        )
        .await
    }

    /// Record an invalidation verdict with an optional comment
    pub async fn finish_invalidate(
        &mut self,
        user: Option<i64>,
        comment: Option<String>,
    ) -> StateMachineResult<ResultStatus> {
        self.transition(ResultEvent::FinishInvalidate { comment }, user)
            .await
    }

    /// Throw away the verdict: back to started, cleared comment and
    /// completed timestamp, all step results deleted
    pub async fn restart(&mut self, user: Option<i64>) -> StateMachineResult<ResultStatus> {
        self.transition(ResultEvent::Restart, user).await
    }

    /// Apply an event to the result
    pub async fn transition(
        &mut self,
        event: ResultEvent,
        user: Option<i64>,
    ) -> StateMachineResult<ResultStatus> {
        let from_status = self.current_status()?;
        let target_status = event.target_status();
        let now = Utc::now().naive_utc();

        let mut updated = self.result.clone();
        apply_event(&mut updated, &event, user, now);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE casetrack_results
            SET status = $2, started = $3, completed = $4, comment = $5,
                modified_by_id = $6, updated_at = $7
            WHERE result_id = $1
            "#,
        )
        .bind(updated.result_id)
        .bind(&updated.status)
        .bind(updated.started)
        .bind(updated.completed)
        .bind(&updated.comment)
        .bind(updated.modified_by_id)
        .bind(updated.updated_at)
        .execute(&mut *tx)
        .await?;

        match &event {
            ResultEvent::Restart => {
                StepResult::delete_by_result(&mut tx, updated.result_id).await?;
            }
            ResultEvent::FinishFail {
                step_number: Some(number),
                bug_url,
                ..
            } => {
                self.record_failed_step(&mut tx, *number, bug_url.as_deref())
                    .await?;
            }
            _ => {}
        }

        self.persistence
            .persist_transition(
                &updated,
                Some(from_status.to_string()),
                target_status.to_string(),
                event.event_type(),
                user,
                Some(serde_json::to_value(&event)?),
                &mut tx,
            )
            .await?;

        tx.commit().await?;
        self.result = updated;

        self.publish_transition(&event, target_status).await;

        Ok(target_status)
    }

    /// Upsert a failed step result for the step with the given number
    ///
    /// An unmatched number is not an error: the failure stands on the result
    /// itself, it just is not pinned to a step.
    async fn record_failed_step(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        step_number: i32,
        bug_url: Option<&str>,
    ) -> StateMachineResult<()> {
        let case_version_id = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT case_version_id
            FROM casetrack_run_case_versions
            WHERE run_case_version_id = $1
            "#,
        )
        .bind(self.result.run_case_version_id)
        .fetch_one(&self.pool)
        .await?
        .0;

        match CaseStep::find_by_number(&self.pool, case_version_id, step_number).await? {
            Some(step) => {
                StepResult::upsert_failed(tx, self.result.result_id, step.case_step_id, bug_url)
                    .await?;
            }
            None => {
                warn!(
                    result_id = self.result.result_id,
                    case_version_id = case_version_id,
                    step_number = step_number,
                    "failed step number matches no step of the executed case version; skipping"
                );
            }
        }

        Ok(())
    }

    async fn publish_transition(&self, event: &ResultEvent, target_status: ResultStatus) {
        let name = match (event, target_status) {
            (ResultEvent::Restart, _) => event_names::RESULT_RESTARTED,
            (_, ResultStatus::Started) => event_names::RESULT_STARTED,
            (_, ResultStatus::Passed) => event_names::RESULT_PASSED,
            (_, ResultStatus::Failed) => event_names::RESULT_FAILED,
            (_, ResultStatus::Invalidated) => event_names::RESULT_INVALIDATED,
            // Created is never a transition target
            (_, ResultStatus::Created) => return,
        };

        let context = json!({
            "result_id": self.result.result_id,
            "run_case_version_id": self.result.run_case_version_id,
            "environment_id": self.result.environment_id,
            "tester_id": self.result.tester_id,
            "status": self.result.status,
            "event": event.event_type(),
        });

        if let Err(error) = self.event_publisher.publish(name, context).await {
            warn!(result_id = self.result.result_id, %error, "failed to publish lifecycle event");
        }
    }
}
