#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # CaseTrack Core
//!
//! Rust core for test case management and test-run execution.
//!
//! ## Overview
//!
//! CaseTrack Core is the data and workflow layer behind the CaseTrack web
//! frontend. The frontend owns HTTP routing, sessions and page templating;
//! this crate owns the domain models (products, suites, cases with versioned
//! steps, environments, runs), the result execution workflow, and the
//! rendering helpers the frontend uses to draw forms.
//!
//! ## Module Organization
//!
//! - [`models`] - Data layer: products, suites, cases, environments, runs,
//!   results and their relations
//! - [`state_machine`] - Result lifecycle management (start, pass, fail,
//!   invalidate, restart)
//! - [`scopes`] - Chainable query scopes over the model layer
//! - [`forms`] - Form field rendering helpers for the frontend
//! - [`database`] - Connection pooling and schema migrations
//! - [`config`] - Environment-aware YAML configuration
//! - [`events`] - Lifecycle event publication
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use casetrack_core::models::RunResult;
//! use casetrack_core::state_machine::ResultStateMachine;
//! use casetrack_core::events::EventPublisher;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let result = RunResult::find_by_id(&pool, 1)
//!     .await?
//!     .ok_or("result not found")?;
//!
//! let mut machine = ResultStateMachine::new(result, pool, EventPublisher::default());
//! machine.start(None).await?;
//! machine.finish_succeed(None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Integration tests use SQLx native testing (`#[sqlx::test]`) with automatic
//! per-test database isolation, and a factory layer under `tests/factories/`
//! for constructing object graphs.

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod events;
pub mod forms;
pub mod logging;
pub mod models;
pub mod scopes;
pub mod state_machine;

pub use error::{CasetrackError, Result};
