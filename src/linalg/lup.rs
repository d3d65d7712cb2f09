use alloc::vec::Vec;

use log::debug;

use crate::error::{mismatch, Error, Result};
use crate::grid::Grid;
use crate::linalg::Decompose;
use crate::matrix::square::{back_solve, forward_solve, pivot_tolerance};
use crate::matrix::{Matrix, Repr};
use crate::traits::FloatScalar;

/// Doolittle elimination with partial pivoting, in place.
///
/// At step `k` the row with the largest `|u[i][k]|`, `i >= k`, is swapped
/// into the pivot position together with the multipliers already stored
/// in `l`. `perm[i]` records which original row ended up in row `i`.
/// A column that is zero from the pivot down is skipped, so singular
/// input still yields valid triangular factors.
///
/// Returns `true` if the number of row swaps was even.
pub(crate) fn lup_in_place<T: FloatScalar>(
    u: &mut Grid<T>,
    l: &mut Grid<T>,
    perm: &mut [usize],
) -> bool {
    let n = u.nrows();
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }
    let mut even = true;

    for k in 0..n {
        let mut max_row = k;
        let mut max_val = u[(k, k)].abs();
        for row in (k + 1)..n {
            let val = u[(row, k)].abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_row != k {
            debug!(target: "strata::lup", "pivot column {k}: swap rows {k} and {max_row}");
            u.swap_rows(k, max_row);
            l.swap_rows(k, max_row);
            perm.swap(k, max_row);
            even = !even;
        }

        if max_val.is_zero() {
            continue;
        }

        let pivot = u[(k, k)];
        for i in (k + 1)..n {
            let factor = u[(i, k)] / pivot;
            if factor.is_zero() {
                continue;
            }
            l.set((i, k), factor);
            for j in (k + 1)..n {
                u.set((i, j), u[(i, j)] - factor * u[(k, j)]);
            }
            u.set((i, k), T::zero());
        }
    }

    for i in 0..n {
        l.set((i, i), T::one());
    }
    even
}

/// LU decomposition with partial pivoting, `P·A = L·U`.
///
/// `P` is a permutation matrix, `L` unit lower-triangular, `U`
/// upper-triangular. Singular matrices still factor; [`solve`] and
/// [`inverse`] then report [`Error::NotInvertible`](crate::Error::NotInvertible).
///
/// [`solve`]: LupDecomposition::solve
/// [`inverse`]: LupDecomposition::inverse
///
/// # Example
///
/// ```
/// use strata::Matrix;
///
/// let a = Matrix::from_rows(&[
///     [2.0_f64, 1.0, -1.0],
///     [-3.0, -1.0, 2.0],
///     [-2.0, 1.0, 2.0],
/// ]).unwrap();
/// let lup = a.lup().unwrap();
///
/// let x = lup.solve(&[8.0, -11.0, -3.0]).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 3.0).abs() < 1e-12);
/// assert!((x[2] + 1.0).abs() < 1e-12);
/// assert!((lup.det() + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LupDecomposition<T: FloatScalar> {
    p: Matrix<T>,
    l: Matrix<T>,
    u: Matrix<T>,
    perm: Vec<usize>,
    even: bool,
    tol: T,
}

impl<T: FloatScalar> LupDecomposition<T> {
    /// Decompose a square matrix. Non-square input raises
    /// [`Error::NotSquare`](crate::Error::NotSquare).
    pub fn new(a: &Matrix<T>) -> Result<Self> {
        let n = a.require_square()?;
        let mut u = a.to_grid();
        let tol = pivot_tolerance(&u);
        let mut l = Grid::zeros(n, n);
        let mut perm = alloc::vec![0; n];
        let even = lup_in_place(&mut u, &mut l, &mut perm);

        let p = Matrix::classify(Grid::build(n, n, |i, j| {
            if perm[i] == j {
                T::one()
            } else {
                T::zero()
            }
        }));

        Ok(Self {
            p,
            l: Matrix::from_repr(Repr::Lower(l)),
            u: Matrix::from_repr(Repr::Upper(u)),
            perm,
            even,
            tol,
        })
    }

    /// Permutation matrix `P`.
    pub fn p(&self) -> &Matrix<T> {
        &self.p
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// `perm[i]` is the row of `A` that became row `i` of `P·A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// `(P, L, U)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.p, self.l, self.u)
    }

    /// Whether some pivot of `U` is zero up to rounding, relative to the
    /// largest entry of `A`.
    pub fn is_singular(&self) -> bool {
        self.u.main_diagonal().iter().any(|d| d.abs() <= self.tol)
    }

    /// Solve `A x = b`. A singular `A` raises [`Error::NotInvertible`].
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        let n = self.perm.len();
        if b.len() != n {
            return Err(mismatch("lup solve", (n, n), (b.len(), 1)));
        }
        if self.is_singular() {
            return Err(Error::NotInvertible);
        }
        let mut x: Vec<T> = self.perm.iter().map(|&i| b[i]).collect();
        forward_solve(&self.l, &mut x)?;
        back_solve(&self.u, &mut x)?;
        Ok(x)
    }

    /// `A⁻¹`, one solved unit column at a time.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        if self.is_singular() {
            return Err(Error::NotInvertible);
        }
        let n = self.perm.len();
        let mut inv = Grid::zeros(n, n);
        let mut e = alloc::vec![T::zero(); n];
        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            let x = self.solve(&e)?;
            for (row, &v) in x.iter().enumerate() {
                inv.set((row, col), v);
            }
        }
        Ok(Matrix::new(inv))
    }

    /// Determinant, signed by the parity of the row swaps.
    pub fn det(&self) -> T {
        let sign = if self.even { T::one() } else { -T::one() };
        self.u
            .main_diagonal()
            .into_iter()
            .fold(sign, |d, x| d * x)
    }
}

impl<T: FloatScalar> Decompose<T> for LupDecomposition<T> {
    fn factors(&self) -> Vec<Matrix<T>> {
        alloc::vec![self.p.clone(), self.l.clone(), self.u.clone()]
    }
}

// ── Convenience methods on Matrix ───────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lup(&self) -> Result<LupDecomposition<T>> {
        LupDecomposition::new(self)
    }

    /// Solve `self · x = b`. Triangular matrices use substitution
    /// directly, anything else goes through [`LupDecomposition`].
    ///
    /// ```
    /// use strata::Matrix;
    /// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [5.0, 3.0]]).unwrap();
    /// let x = a.solve(&[4.0, 11.0]).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        self.require_square()?;
        if self.is_lower_triangular() {
            self.forward_substitution(b)
        } else if self.is_upper_triangular() {
            self.back_substitution(b)
        } else {
            self.lup()?.solve(b)
        }
    }
}
