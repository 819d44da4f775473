use thiserror::Error;

pub type Result<T> = std::result::Result<T, GradingError>;

/// Errors raised by the grading engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradingError {
    /// Score is NaN or infinite. Out-of-range finite scores are allowed.
    #[error("invalid score: {0} is not a finite number")]
    InvalidScore(f64),

    /// The configuration selects a method the engine does not know.
    #[error("configuration error: unknown grading method '{0}'")]
    UnknownMethod(String),
}
