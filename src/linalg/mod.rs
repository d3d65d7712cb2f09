//! Matrix factorizations.
//!
//! Each decomposition consumes a [`Matrix`] and yields factor matrices that
//! are themselves lattice values: `L` is always lower-triangular shaped,
//! `U` upper-triangular shaped, `P` a permutation. Decompositions are plain
//! values with no state shared between calls.
//!
//! ```
//! use strata::Matrix;
//! use strata::linalg::Decompose;
//!
//! let a = Matrix::from_rows(&[[1.0_f64, 2.0], [2.0, 2.0]]).unwrap();
//! let [p, l, u]: [Matrix<f64>; 3] = a.lup().unwrap().factors().try_into().unwrap();
//! assert_eq!(p.multiply(&a).unwrap(), l.multiply(&u).unwrap());
//! ```

pub(crate) mod cholesky;
pub(crate) mod lu;
pub(crate) mod lup;

pub use cholesky::CholeskyDecomposition;
pub use lu::LuDecomposition;
pub use lup::LupDecomposition;

use alloc::vec::Vec;

use crate::Matrix;

/// A factorization that can be read back as an ordered list of matrices,
/// `[L, U]`, `[L]` or `[P, L, U]`.
pub trait Decompose<T> {
    /// The factors in order.
    fn factors(&self) -> Vec<Matrix<T>>;
}
