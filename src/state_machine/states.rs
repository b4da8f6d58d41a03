use serde::{Deserialize, Serialize};
use std::fmt;

/// Result state definitions for the test execution workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// Initial state when a result record is created
    Created,
    /// A tester has begun executing the case
    Started,
    /// Execution finished and the case passed
    Passed,
    /// Execution finished and the case failed
    Failed,
    /// Execution finished but the result was judged invalid
    Invalidated,
}

impl ResultStatus {
    /// Check if this is a terminal state (the result carries a verdict)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Invalidated)
    }

    /// Check if this is an active state (a tester is working the case)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Started)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Started => write!(f, "started"),
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Invalidated => write!(f, "invalidated"),
        }
    }
}

impl std::str::FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "started" => Ok(Self::Started),
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "invalidated" => Ok(Self::Invalidated),
            _ => Err(format!("Invalid result status: {s}")),
        }
    }
}

impl Default for ResultStatus {
    fn default() -> Self {
        Self::Created
    }
}

/// Per-step outcome within a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step behaved as instructed
    Passed,
    /// The step diverged from its expected outcome
    Failed,
    /// The step outcome could not be judged
    Invalidated,
}

impl StepStatus {
    /// Check if this outcome counts against the case
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Invalidated => write!(f, "invalidated"),
        }
    }
}

impl std::str::FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "invalidated" => Ok(Self::Invalidated),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl Default for StepStatus {
    fn default() -> Self {
        Self::Passed
    }
}
