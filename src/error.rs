//! Error types for the benchmarking core.
//!
//! Every failure is a configuration or programming error surfaced at the
//! call site. Nothing in the crate retries.

use crate::representation::EncodingKind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors raised by the representation, move and fitness layers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Two sequences that must have equal length do not.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Maximum bounding values are lower than the minimum ones.
    #[error("maximum bound is lower than the minimum bound at indexes {indices:?}")]
    InvertedBounds { indices: Vec<usize> },

    /// A binary encoding was requested with zero attributes.
    #[error("cannot encode solutions on an empty attribute vector")]
    EmptyEncoding,

    /// Attribute values fall outside the domain of their encoding.
    #[error("values are not valid for a {kind} encoding: {reason}")]
    InvalidValues { kind: EncodingKind, reason: String },

    /// A normalized step was NaN or infinite.
    #[error("normalized step must be a finite number, got {0}")]
    NonFiniteStep(f64),

    /// A normalized step was outside `[0.0, 1.0]`.
    #[error("normalized step must lie in [0.0, 1.0], got {0}")]
    StepOutOfRange(f64),

    /// A move range was built with invalid bounds.
    #[error("invalid move range [{low}, {high}]: {reason}")]
    InvalidMoveRange {
        low: f64,
        high: f64,
        reason: &'static str,
    },

    /// A converted step cannot drive the move operator.
    #[error("invalid step for move `{operator}`: {reason}")]
    InvalidMoveStep {
        operator: &'static str,
        reason: String,
    },

    /// The move needs more distinct attributes than the solution offers.
    #[error("move `{operator}` needs {requested} distinct attributes, only {available} available")]
    StepExceedsCandidates {
        operator: &'static str,
        requested: usize,
        available: usize,
    },

    /// More disjoint swap pairs were requested than the solution holds.
    #[error("cannot draw {pairs} disjoint pairs from a solution of length {len}")]
    TooManyPairs { pairs: usize, len: usize },

    /// The operation is not defined for this encoding.
    #[error("{operation} is not supported for {kind} encoding")]
    Unsupported {
        operation: &'static str,
        kind: EncodingKind,
    },

    /// The space size does not fit in a `u128`.
    #[error("space size of the {0} encoding overflows u128")]
    SpaceSizeOverflow(EncodingKind),

    /// Two solutions were compared across different encodings.
    #[error("solutions are bound to different encodings")]
    EncodingMismatch,

    /// A neighborhood was built with a zero neighbor cap.
    #[error("maximum number of neighbors must be positive")]
    InvalidNeighborCap,

    /// Neighbors were requested from a problem without a neighborhood.
    #[error("no neighborhood operator is configured for this problem")]
    NoNeighborhood,

    /// A search configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
