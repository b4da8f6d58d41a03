//! # Query Scopes
//!
//! Chainable, composable queries over the model layer. Each scope collects
//! joins and conditions and assembles a fresh `QueryBuilder` at execution
//! time, so scopes can be combined in any order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use casetrack_core::models::RunResult;
//! use casetrack_core::scopes::ScopeBuilder;
//! # async fn example(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
//! // Results still awaiting a verdict for run 7
//! let open = RunResult::scope().for_run(7).pending().all(pool).await?;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::manual_async_fn)]

pub mod results;
pub mod runs;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub use results::ResultScope;
pub use runs::RunScope;

/// Base trait for all scope builders
#[async_trait]
pub trait ScopeBuilder<T>: Sized {
    /// Execute the scope and return all matching rows
    async fn all(self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>;

    /// Execute the scope and return the first matching row
    async fn first(self, pool: &PgPool) -> Result<Option<T>, sqlx::Error>;

    /// Count matching rows
    async fn count(self, pool: &PgPool) -> Result<i64, sqlx::Error>;

    /// Check whether any row matches
    async fn exists(self, pool: &PgPool) -> Result<bool, sqlx::Error>;
}

/// Bound value for a collected condition
pub(crate) enum BindValue {
    BigInt(i64),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// Collected joins and conditions, assembled into SQL at execution time
pub(crate) struct ScopeQuery {
    table: &'static str,
    joins: Vec<&'static str>,
    conditions: Vec<(String, Option<BindValue>)>,
    order_by: Option<&'static str>,
}

impl ScopeQuery {
    pub(crate) fn new(table: &'static str) -> Self {
        Self {
            table,
            joins: Vec::new(),
            conditions: Vec::new(),
            order_by: None,
        }
    }

    /// Add a join clause once; repeated scopes share the same join
    pub(crate) fn ensure_join(&mut self, join: &'static str) {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
    }

    /// Add a condition with no bound value (e.g. an IN-list of validated
    /// status constants)
    pub(crate) fn condition(&mut self, sql: impl Into<String>) {
        self.conditions.push((sql.into(), None));
    }

    /// Add a condition whose trailing operand is bound
    pub(crate) fn condition_bind(&mut self, sql: impl Into<String>, value: BindValue) {
        self.conditions.push((sql.into(), Some(value)));
    }

    pub(crate) fn order_by(&mut self, order: &'static str) {
        self.order_by = Some(order);
    }

    /// Assemble the final query with the given SELECT list
    pub(crate) fn build(&self, select: &str) -> QueryBuilder<'_, Postgres> {
        let mut query = self.build_unordered(select);

        if let Some(order) = self.order_by {
            query.push(" ORDER BY ");
            query.push(order);
        }

        query
    }

    /// Assemble without the ORDER BY clause (aggregate queries)
    pub(crate) fn build_unordered(&self, select: &str) -> QueryBuilder<'_, Postgres> {
        let mut query = QueryBuilder::new(format!("{select} FROM {}", self.table));

        for join in &self.joins {
            query.push(" ");
            query.push(*join);
        }

        for (index, (sql, bind)) in self.conditions.iter().enumerate() {
            query.push(if index == 0 { " WHERE " } else { " AND " });
            query.push(sql.as_str());
            match bind {
                Some(BindValue::BigInt(value)) => {
                    query.push_bind(*value);
                }
                Some(BindValue::Text(value)) => {
                    query.push_bind(value.clone());
                }
                Some(BindValue::Timestamp(value)) => {
                    query.push_bind(*value);
                }
                None => {}
            }
        }

        query
    }

    /// Rendered SQL for the given SELECT list (placeholders included)
    #[cfg(test)]
    pub(crate) fn sql(&self, select: &str) -> String {
        self.build(select).into_sql()
    }
}
