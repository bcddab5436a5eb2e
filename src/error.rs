//! Error types for the matrix engine and the regression layer.
//!
//! Every invalid input is reported through one of these enums. No operation
//! hands back a placeholder matrix on failure.

use std::fmt;

/// Which triangle a solver or inversion routine expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    Lower,
    Upper,
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Triangle::Lower => write!(f, "lower"),
            Triangle::Upper => write!(f, "upper"),
        }
    }
}

/// Failures raised by [`crate::math::Matrix`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    /// A matrix needs at least one row and one column.
    #[error("matrix must be at least 1x1, got {rows}x{cols}")]
    EmptyShape { rows: usize, cols: usize },

    /// A nested-row constructor got rows of different lengths.
    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A flat buffer does not have `rows * cols` entries.
    #[error("buffer of length {len} cannot fill a {rows}x{cols} matrix")]
    BufferLength { rows: usize, cols: usize, len: usize },

    /// Operand shapes are incompatible for `op`.
    #[error("{op}: incompatible shapes {}x{} and {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Decomposition or inversion requested on a non-square matrix.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The coefficient matrix fails the triangular predicate.
    #[error("matrix is not {expected} triangular")]
    NotTriangular { expected: Triangle },

    /// Truncate bounds are zero or reversed (1-based inclusive contract).
    #[error(
        "incoherent range rows {row_start}..={row_end}, cols {col_start}..={col_end} (1-based)"
    )]
    IncoherentRange {
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    },

    /// Truncate bounds reach past the matrix extent.
    #[error("range ends at ({row_end}, {col_end}) but matrix is {rows}x{cols}")]
    OutOfBounds {
        row_end: usize,
        col_end: usize,
        rows: usize,
        cols: usize,
    },

    /// A zero or non-finite pivot was hit while dividing.
    #[error("singular matrix: zero or non-finite pivot at index {pivot}")]
    SingularMatrix { pivot: usize },
}

/// Failures raised while building or fitting regression models.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("input series is empty")]
    EmptyData,

    #[error("input contains non-finite values")]
    NonFiniteData,

    #[error("lag order must be at least 1, got {0}")]
    InvalidLag(usize),

    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData { n: usize, min: usize },

    #[error("day index {index} has no prediction (valid: {first}..={last})")]
    DayOutOfRange {
        index: usize,
        first: usize,
        last: usize,
    },

    #[error("date {0} has no prediction")]
    DateOutOfRange(chrono::NaiveDate),

    /// Day `days` after `start` is past the last representable date.
    #[error("calendar overflow: {start} + {days} days")]
    DateOverflow {
        start: chrono::NaiveDate,
        days: usize,
    },

    #[error("AR({lag}) gives a non-finite BIC (sse={sse})")]
    NonFiniteBic { lag: usize, sse: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type MatrixResult<T> = Result<T, MatrixError>;
pub type FitResult<T> = Result<T, FitError>;
