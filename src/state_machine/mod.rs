// State machine module for the result execution workflow
//
// Provides the lifecycle layer over the RunResult model: statuses, events,
// transition application with audit rows, and lifecycle event publication.

pub mod errors;
pub mod events;
pub mod persistence;
pub mod result_state_machine;
pub mod states;

// Re-export main types for convenient access
pub use errors::{PersistenceError, StateMachineError};
pub use events::ResultEvent;
pub use result_state_machine::{apply_event, ResultStateMachine};
pub use states::{ResultStatus, StepStatus};

// Common traits and utilities
pub use persistence::TransitionPersistence;
