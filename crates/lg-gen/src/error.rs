//! Generator error type.

use thiserror::Error;

use lg_network::NetworkError;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("coverage {reached:.3} short of goal {goal:.3} after {legs} walk legs")]
    CoverageNotReached { reached: f64, goal: f64, legs: u32 },

    /// A topology invariant broke while building the lane graph.
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("generation failed after {attempts} attempts; last error: {last}")]
    AttemptsExhausted { attempts: u32, last: Box<GenError> },
}

impl GenError {
    /// `true` for failures a fresh random stream may avoid.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenError::CoverageNotReached { .. } => true,
            GenError::Network(err) => !matches!(err, NetworkError::Config(_)),
            GenError::InvalidConfig(_) | GenError::AttemptsExhausted { .. } => false,
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
