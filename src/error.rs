use thiserror::Error;

/// Errors produced while validating inputs or running a projection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid game record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Sample count must be positive")]
    InvalidSampleCount,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Game at index {index} is already completed")]
    NotRemaining { index: usize },

    #[error("Game index {index} out of range for {len} games")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid spread parameters: {0}")]
    InvalidSpread(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
