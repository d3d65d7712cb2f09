//! Named constant matrices.
//!
//! Pascal and shift matrices come back as triangular variants where their
//! orientation says so; the rest are classified to the most specific
//! variant their entries satisfy.

use super::Matrix;
use crate::error::Result;
use crate::grid::{self, Grid};
use crate::traits::FloatScalar;

/// Orientation of a Pascal matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PascalKind {
    /// `P[i][j] = C(j, i)`.
    Upper,
    /// `P[i][j] = C(i, j)`.
    Lower,
    /// `P[i][j] = C(i + j, i)`.
    Symmetric,
}

/// Direction of a shift matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftKind {
    /// Ones on the superdiagonal.
    Upper,
    /// Ones on the subdiagonal.
    Lower,
}

fn square<T: FloatScalar>(n: usize, f: impl Fn(usize, usize) -> T) -> Result<Grid<T>> {
    grid::check_shape(n, n)?;
    Ok(Grid::build(n, n, f))
}

fn index<T: FloatScalar>(i: usize) -> T {
    num_traits::cast(i).unwrap_or_else(T::max_value)
}

fn flag<T: FloatScalar>(b: bool) -> T {
    if b {
        T::one()
    } else {
        T::zero()
    }
}

/// `m × n` matrix of ones.
pub fn ones<T: FloatScalar>(nrows: usize, ncols: usize) -> Result<Matrix<T>> {
    Grid::from_fn(nrows, ncols, |_, _| T::one()).map(Matrix::classify)
}

/// Ones on the anti-diagonal.
///
/// ```
/// use strata::matrix::special::exchange;
/// let j = exchange::<f64>(3).unwrap();
/// assert_eq!(j.row(0).unwrap(), vec![0.0, 0.0, 1.0]);
/// assert_eq!(j.det().unwrap(), -1.0);
/// ```
pub fn exchange<T: FloatScalar>(n: usize) -> Result<Matrix<T>> {
    square(n, |i, j| flag(i + j == n - 1)).map(Matrix::classify)
}

/// `H[i][j] = 1 / (i + j + 1)`.
pub fn hilbert<T: FloatScalar>(n: usize) -> Result<Matrix<T>> {
    square(n, |i, j| index::<T>(i + j + 1).recip()).map(Matrix::classify)
}

/// `L[i][j] = (min(i, j) + 1) / (max(i, j) + 1)`.
pub fn lehmer<T: FloatScalar>(n: usize) -> Result<Matrix<T>> {
    square(n, |i, j| index::<T>(i.min(j) + 1) / index::<T>(i.max(j) + 1)).map(Matrix::classify)
}

/// Pascal matrix of binomial coefficients.
///
/// ```
/// use strata::Kind;
/// use strata::matrix::special::{pascal, PascalKind};
///
/// let s = pascal::<f64>(4, PascalKind::Symmetric).unwrap();
/// assert_eq!(s.row(3).unwrap(), vec![1.0, 4.0, 10.0, 20.0]);
///
/// let l = pascal::<f64>(4, PascalKind::Lower).unwrap();
/// assert_eq!(l.kind(), Kind::LowerTriangular);
/// assert_eq!(l.multiply(&l.transpose()).unwrap(), s);
/// ```
pub fn pascal<T: FloatScalar>(n: usize, kind: PascalKind) -> Result<Matrix<T>> {
    grid::check_shape(n, n)?;
    // Pascal's triangle, row by row: c[i][j] = C(i, j).
    let mut c: Grid<T> = Grid::zeros(2 * n, 2 * n);
    for i in 0..2 * n {
        c.set((i, 0), T::one());
        for j in 1..=i {
            c.set((i, j), c[(i - 1, j - 1)] + c[(i - 1, j)]);
        }
    }
    match kind {
        PascalKind::Lower => Matrix::lower_from_grid(Grid::build(n, n, |i, j| c[(i, j)])),
        PascalKind::Upper => Matrix::upper_from_grid(Grid::build(n, n, |i, j| c[(j, i)])),
        PascalKind::Symmetric => Ok(Matrix::classify(Grid::build(n, n, |i, j| c[(i + j, i)]))),
    }
}

/// Redheffer matrix: `R[i][j] = 1` when `j = 0` or `i + 1` divides `j + 1`.
pub fn redheffer<T: FloatScalar>(n: usize) -> Result<Matrix<T>> {
    square(n, |i, j| flag(j == 0 || (j + 1) % (i + 1) == 0)).map(Matrix::classify)
}

/// Shift matrix with ones just above or just below the diagonal.
pub fn shift<T: FloatScalar>(n: usize, kind: ShiftKind) -> Result<Matrix<T>> {
    match kind {
        ShiftKind::Upper => Matrix::upper_from_grid(square(n, |i, j| flag(j == i + 1))?),
        ShiftKind::Lower => Matrix::lower_from_grid(square(n, |i, j| flag(i == j + 1))?),
    }
}
