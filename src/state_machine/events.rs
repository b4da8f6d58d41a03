use serde::{Deserialize, Serialize};

use super::states::ResultStatus;

/// Events that drive result state transitions
///
/// The event alone determines the target status; a result record may receive
/// any event regardless of its current status. `Restart` differs from `Start`
/// only in its side effects (clearing the verdict, comment and step results).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ResultEvent {
    /// A tester begins executing the case
    Start,
    /// Execution finished and every step behaved as instructed
    FinishSucceed,
    /// Execution finished with a failure, optionally pinned to one step
    FinishFail {
        comment: Option<String>,
        step_number: Option<i32>,
        bug_url: Option<String>,
    },
    /// The result is judged invalid (bad environment, broken case, ...)
    FinishInvalidate { comment: Option<String> },
    /// Throw away the verdict and return the case to the tester
    Restart,
}

impl ResultEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FinishSucceed => "finish_succeed",
            Self::FinishFail { .. } => "finish_fail",
            Self::FinishInvalidate { .. } => "finish_invalidate",
            Self::Restart => "restart",
        }
    }

    /// The status this event moves the result into
    pub fn target_status(&self) -> ResultStatus {
        match self {
            Self::Start | Self::Restart => ResultStatus::Started,
            Self::FinishSucceed => ResultStatus::Passed,
            Self::FinishFail { .. } => ResultStatus::Failed,
            Self::FinishInvalidate { .. } => ResultStatus::Invalidated,
        }
    }

    /// Extract the tester-supplied comment, if any
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::FinishFail { comment, .. } | Self::FinishInvalidate { comment } => {
                comment.as_deref()
            }
            _ => None,
        }
    }

    /// Check if this event records a verdict
    pub fn is_terminal(&self) -> bool {
        self.target_status().is_terminal()
    }

    /// Create a failure event with no step attribution
    pub fn fail_simple(comment: impl Into<Option<String>>) -> Self {
        Self::FinishFail {
            comment: comment.into(),
            step_number: None,
            bug_url: None,
        }
    }

    /// Create a failure event pinned to a step, optionally with a bug URL
    pub fn fail_on_step(step_number: i32, bug_url: Option<String>) -> Self {
        Self::FinishFail {
            comment: None,
            step_number: Some(step_number),
            bug_url,
        }
    }
}
