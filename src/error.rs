//! Error types for d-ary heap operations
//!
//! Construction problems are reported as [`ConfigError`] and wrapped by
//! [`HeapError::Configuration`]. The remaining variants are recoverable
//! failures of individual queue operations.

use thiserror::Error;

/// Result type alias for heap operations.
pub type HeapResult<T> = Result<T, HeapError>;

/// Invalid construction parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The branching factor must be at least 2.
    #[error("branching factor must be at least 2, got {given}")]
    InvalidBranchingFactor { given: usize },

    /// The ordering token was neither `max` nor `min`.
    #[error("ordering must be 'max' or 'min', got {token:?}")]
    InvalidOrdering { token: String },

    /// Bulk construction received element and priority sequences of different length.
    #[error("got {elements} elements but {priorities} priorities")]
    LengthMismatch { elements: usize, priorities: usize },
}

/// Error type for heap operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// Construction failed; the queue was not created.
    #[error("invalid heap configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// `peek` or `extract_top` on a queue with no entries.
    #[error("the heap is empty")]
    EmptyQueue,

    /// `remove` or `update` for an element that is not stored in the queue.
    #[error("the element is not in the heap")]
    ElementNotFound,
}
