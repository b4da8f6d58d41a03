//! # Result Scopes
//!
//! Query scopes for the RunResult model: by run, tester, environment, and
//! workflow status.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::constants::status_groups;
use crate::models::RunResult;
use crate::state_machine::ResultStatus;

use super::{BindValue, ScopeBuilder, ScopeQuery};

const RUN_CASE_VERSIONS_JOIN: &str = "JOIN casetrack_run_case_versions rcv \
     ON rcv.run_case_version_id = casetrack_results.run_case_version_id";

/// Query builder for RunResult scopes
pub struct ResultScope {
    query: ScopeQuery,
}

impl RunResult {
    /// Start building a scoped query
    pub fn scope() -> ResultScope {
        let mut query = ScopeQuery::new("casetrack_results");
        query.order_by("casetrack_results.result_id");
        ResultScope { query }
    }
}

impl ResultScope {
    /// Results belonging to a run (through its run-case-versions)
    pub fn for_run(mut self, run_id: i64) -> Self {
        self.query.ensure_join(RUN_CASE_VERSIONS_JOIN);
        self.query
            .condition_bind("rcv.run_id = ", BindValue::BigInt(run_id));
        self
    }

    /// Results recorded by a tester
    pub fn for_tester(mut self, tester_id: i64) -> Self {
        self.query.condition_bind(
            "casetrack_results.tester_id = ",
            BindValue::BigInt(tester_id),
        );
        self
    }

    /// Results recorded under an environment
    pub fn for_environment(mut self, environment_id: i64) -> Self {
        self.query.condition_bind(
            "casetrack_results.environment_id = ",
            BindValue::BigInt(environment_id),
        );
        self
    }

    /// Results in one specific workflow status
    pub fn with_status(mut self, status: ResultStatus) -> Self {
        self.query.condition_bind(
            "casetrack_results.status = ",
            BindValue::Text(status.to_string()),
        );
        self
    }

    /// Results still awaiting a verdict
    pub fn pending(mut self) -> Self {
        self.query
            .condition(status_condition(&status_groups::PENDING_RESULT_STATUSES));
        self
    }

    /// Results carrying a verdict
    pub fn completed(mut self) -> Self {
        self.query
            .condition(status_condition(&status_groups::TERMINAL_RESULT_STATUSES));
        self
    }

    /// Results whose verdict was recorded at or after the given time
    pub fn completed_since(mut self, since: NaiveDateTime) -> Self {
        self.query.condition_bind(
            "casetrack_results.completed >= ",
            BindValue::Timestamp(since),
        );
        self
    }
}

/// SQL IN-list over validated status constants
fn status_condition(statuses: &[&str]) -> String {
    let quoted: Vec<String> = statuses.iter().map(|s| format!("'{s}'")).collect();
    format!("casetrack_results.status IN ({})", quoted.join(", "))
}

#[async_trait]
impl ScopeBuilder<RunResult> for ResultScope {
    async fn all(self, pool: &PgPool) -> Result<Vec<RunResult>, sqlx::Error> {
        let mut query = self.query.build("SELECT casetrack_results.*");
        query.build_query_as::<RunResult>().fetch_all(pool).await
    }

    async fn first(self, pool: &PgPool) -> Result<Option<RunResult>, sqlx::Error> {
        let mut query = self.query.build("SELECT casetrack_results.*");
        query.push(" LIMIT 1");
        query.build_query_as::<RunResult>().fetch_optional(pool).await
    }

    async fn count(self, pool: &PgPool) -> Result<i64, sqlx::Error> {
        let mut query = self.query.build_unordered("SELECT COUNT(*)");
        query.build_query_scalar::<i64>().fetch_one(pool).await
    }

    async fn exists(self, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let count = self.count(pool).await?;
        Ok(count > 0)
    }
}
