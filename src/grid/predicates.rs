//! Structural predicates over any [`GridRef`].
//!
//! All checks use exact equality on entries; no tolerance is applied.
//! Every predicate except [`is_null`] returns `false` for a non-square grid.

use crate::traits::{GridRef, Scalar};

/// `a[i][j] == a[j][i]` for all `i, j`.
pub fn is_symmetric<T: Scalar>(a: &impl GridRef<T>) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| a.at(i, j) == a.at(j, i)))
}

/// Every entry strictly below the main diagonal is zero.
pub fn is_upper_triangular<T: Scalar>(a: &impl GridRef<T>) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.nrows();
    (1..n).all(|i| (0..i).all(|j| a.at(i, j).is_zero()))
}

/// Every entry strictly above the main diagonal is zero.
pub fn is_lower_triangular<T: Scalar>(a: &impl GridRef<T>) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| a.at(i, j).is_zero()))
}

/// Every off-diagonal entry is zero.
pub fn is_diagonal<T: Scalar>(a: &impl GridRef<T>) -> bool {
    is_upper_triangular(a) && is_lower_triangular(a)
}

/// Diagonal with every diagonal entry exactly one.
pub fn is_identity<T: Scalar>(a: &impl GridRef<T>) -> bool {
    is_diagonal(a) && (0..a.nrows()).all(|i| a.at(i, i) == T::one())
}

/// Every entry is zero. Any shape.
pub fn is_null<T: Scalar>(a: &impl GridRef<T>) -> bool {
    (0..a.nrows()).all(|i| (0..a.ncols()).all(|j| a.at(i, j).is_zero()))
}
