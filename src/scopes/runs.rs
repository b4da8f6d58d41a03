//! # Run Scopes
//!
//! Query scopes for the Run model.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::constants::status_groups;
use crate::models::Run;

use super::{BindValue, ScopeBuilder, ScopeQuery};

/// Query builder for Run scopes
pub struct RunScope {
    query: ScopeQuery,
}

impl Run {
    /// Start building a scoped query
    pub fn scope() -> RunScope {
        let mut query = ScopeQuery::new("casetrack_runs");
        query.order_by("casetrack_runs.created_at DESC");
        RunScope { query }
    }
}

impl RunScope {
    /// Runs against a product version
    pub fn for_product_version(mut self, product_version_id: i64) -> Self {
        self.query.condition_bind(
            "casetrack_runs.product_version_id = ",
            BindValue::BigInt(product_version_id),
        );
        self
    }

    /// Runs currently open to testers
    pub fn active(mut self) -> Self {
        let quoted: Vec<String> = status_groups::ACTIVE_RUN_STATUSES
            .iter()
            .map(|s| format!("'{s}'"))
            .collect();
        self.query
            .condition(format!("casetrack_runs.status IN ({})", quoted.join(", ")));
        self
    }

    /// Runs created at or after the given time
    pub fn created_since(mut self, since: NaiveDateTime) -> Self {
        self.query
            .condition_bind("casetrack_runs.created_at >= ", BindValue::Timestamp(since));
        self
    }
}

#[async_trait]
impl ScopeBuilder<Run> for RunScope {
    async fn all(self, pool: &PgPool) -> Result<Vec<Run>, sqlx::Error> {
        let mut query = self.query.build("SELECT casetrack_runs.*");
        query.build_query_as::<Run>().fetch_all(pool).await
    }

    async fn first(self, pool: &PgPool) -> Result<Option<Run>, sqlx::Error> {
        let mut query = self.query.build("SELECT casetrack_runs.*");
        query.push(" LIMIT 1");
        query.build_query_as::<Run>().fetch_optional(pool).await
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
