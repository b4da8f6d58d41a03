use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CasetrackError {
    DatabaseError(String),
    StateTransitionError(String),
    ValidationError(String),
    ConfigurationError(String),
    TemplateError(String),
}

impl fmt::Display for CasetrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CasetrackError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            CasetrackError::StateTransitionError(msg) => {
                write!(f, "State transition error: {msg}")
            }
            CasetrackError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            CasetrackError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            CasetrackError::TemplateError(msg) => write!(f, "Template error: {msg}"),
        }
    }
}

impl std::error::Error for CasetrackError {}

impl From<sqlx::Error> for CasetrackError {
    fn from(err: sqlx::Error) -> Self {
        CasetrackError::DatabaseError(err.to_string())
    }
}

impl From<askama::Error> for CasetrackError {
    fn from(err: askama::Error) -> Self {
        CasetrackError::TemplateError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CasetrackError>;
