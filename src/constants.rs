//! # System Constants
//!
//! Status vocabularies and event names shared between the model layer, the
//! result state machine, and the query scopes.

// Re-export state types for convenience
pub use crate::state_machine::{ResultStatus, StepStatus};

/// Lifecycle event names published on result transitions
pub mod events {
    pub const RESULT_STARTED: &str = "result.started";
    pub const RESULT_PASSED: &str = "result.passed";
    pub const RESULT_FAILED: &str = "result.failed";
    pub const RESULT_INVALIDATED: &str = "result.invalidated";
    pub const RESULT_RESTARTED: &str = "result.restarted";
}

/// Status groupings used to build state-based SQL conditions
pub mod status_groups {
    /// Statuses a result can hold once its `completed` timestamp is set
    pub const TERMINAL_RESULT_STATUSES: [&str; 3] = ["passed", "failed", "invalidated"];

    /// Statuses of results still awaiting a verdict
    pub const PENDING_RESULT_STATUSES: [&str; 2] = ["created", "started"];

    /// Run statuses visible to testers
    pub const ACTIVE_RUN_STATUSES: [&str; 1] = ["active"];
}
