//! Error types for artmap.
//!
//! Only programmer errors live here. Capacity exhaustion and map-field
//! mismatches are ordinary learning outcomes and are reported through
//! [`LearnOutcome`](crate::art::LearnOutcome) and
//! [`TrainOutcome`](crate::artmap::TrainOutcome) instead.

use thiserror::Error;

/// artmap error types.
#[derive(Error, Debug)]
pub enum ArtError {
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error while saving or loading a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input or prototype length does not match the space's dimension
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Configuration value outside its admissible range
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Vector component outside [0, 1] or not finite
    #[error("Value {value} at index {index} is outside [0, 1]")]
    ValueOutOfRange { index: usize, value: f64 },

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Category index that was never created in this space
    #[error("Unknown category {index} (space holds {count})")]
    UnknownCategory { index: usize, count: usize },

    /// Operation attempted after `close()`
    #[error("Session is closed")]
    SessionClosed,

    /// Snapshot failed validation on restore
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// A shared session lock was poisoned by a panicking writer
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

impl ArtError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ArtError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for artmap operations.
pub type Result<T> = std::result::Result<T, ArtError>;
