//! Error types for cutter construction and queries.

use thiserror::Error;

/// Errors from cutter construction and height queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutterError {
    /// A geometric parameter violates its invariant. Raised at
    /// construction; the cutter never exists on failure.
    #[error("invalid cutter geometry: {0}")]
    InvalidGeometry(String),

    /// A checked height query fell outside the cutter's defined domain.
    #[error("height {height} outside cutter domain [0, {limit}]")]
    OutOfRange {
        /// The queried height.
        height: f64,
        /// The flute length (upper domain bound).
        limit: f64,
    },
}

/// Result type for cutter operations.
pub type Result<T> = std::result::Result<T, CutterError>;
