use crate::matrix::Kind;

/// Faults raised by construction and by every operation in the crate.
///
/// Construction faults (`InvalidDimension`, `NullEntry`, `RaggedRows`,
/// `StructuralViolation`) are raised before a value becomes observable;
/// operational faults are raised at call time. Nothing is recovered
/// internally.
///
/// ```
/// use strata::{Error, Matrix};
///
/// let singular = Matrix::diagonal(vec![1.0_f64, 0.0]).unwrap();
/// assert_eq!(singular.inverse().unwrap_err(), Error::NotInvertible);
///
/// let wide = Matrix::from_rows(&[[1.0_f64, 2.0, 3.0]]).unwrap();
/// assert_eq!(wide.trace().unwrap_err(), Error::NotSquare { rows: 1, cols: 3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A matrix shape with no element in some direction.
    #[error("invalid matrix dimension {rows}x{cols}: at least one row and one column required")]
    InvalidDimension { rows: usize, cols: usize },

    /// A vector with fewer than two components.
    #[error("invalid vector dimension {0}: at least 2 components required")]
    InvalidVectorDimension(usize),

    /// An undefined (`NaN`) or infinite entry in construction input.
    #[error("undefined entry at ({row}, {col})")]
    NullEntry { row: usize, col: usize },

    /// Construction rows of unequal length.
    #[error("row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Operands of incompatible shape. Vectors report as `(1, n)`.
    #[error("dimension mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// An operation that requires a square matrix.
    #[error("operation requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Cholesky on a non-symmetric matrix.
    #[error("matrix is not symmetric")]
    NotSymmetric,

    /// Inverse (or a solve) on a singular matrix.
    #[error("matrix is not invertible")]
    NotInvertible,

    /// A factorization that cannot be carried out for this input.
    #[error("decomposition not possible: {0}")]
    DecompositionNotPossible(&'static str),

    /// Data that violates the structure a specialized constructor claims.
    #[error("data does not describe a {0} matrix")]
    StructuralViolation(Kind),

    #[error("row {row} out of bounds for {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("column {col} out of bounds for {cols} columns")]
    ColumnOutOfBounds { col: usize, cols: usize },

    /// An operation that is undefined for these operands.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

pub(crate) fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Error {
    Error::DimensionMismatch { op, left, right }
}

pub(crate) fn not_square((rows, cols): (usize, usize)) -> Error {
    Error::NotSquare { rows, cols }
}
