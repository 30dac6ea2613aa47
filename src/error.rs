//! Errors in the library.
use thiserror::Error;

/// Errors raised by drivers and backends.
#[derive(Error, Debug)]
pub enum AleError {
    /// Unknown game, invalid seed or configuration, zero batch size.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// The number of submitted actions differs from the batch size.
    #[error("Batch size mismatch: expected {expected} actions, got {got}")]
    BatchSizeMismatch { expected: usize, got: usize },

    /// The action is not a member of the advertised action set.
    #[error("Invalid action: {action}")]
    InvalidAction { action: i32 },

    /// A step was issued to an environment that has not been reset since
    /// construction or since its last episode ended.
    #[error("Environment {index} must be reset before stepping")]
    ResetRequired { index: usize },

    /// The slot index is outside the batch.
    #[error("Slot {index} is out of range for batch size {batch_size}")]
    SlotOutOfRange { index: usize, batch_size: usize },

    /// Failure inside the emulation backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Failed to read or write a configuration file.
    #[error("Config io error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Failed to parse or serialize a configuration file.
    #[error("Config format error: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),
}

/// Result type of the library.
pub type Result<T> = std::result::Result<T, AleError>;
