use alloc::vec::Vec;

use crate::error::{mismatch, Error, Result};
use crate::grid::Grid;
use crate::linalg::Decompose;
use crate::matrix::square::{back_solve, forward_solve};
use crate::matrix::{Matrix, Repr};
use crate::traits::FloatScalar;

/// Cholesky factor of a symmetric grid, written into `l`.
///
/// `L[i][i] = sqrt(A[i][i] - Σ L[i][k]²)` and
/// `L[i][j] = (A[i][j] - Σ L[j][k]·L[i][k]) / L[j][j]` for `j < i`.
/// Fails on a zero diagonal entry or a radicand that is not positive.
pub(crate) fn cholesky_into<T: FloatScalar>(a: &Grid<T>, l: &mut Grid<T>) -> Result<()> {
    let n = a.nrows();
    for i in 0..n {
        if a[(i, i)].is_zero() {
            return Err(Error::DecompositionNotPossible("zero entry on the diagonal"));
        }
        for j in 0..=i {
            let sum = (0..j).fold(T::zero(), |s, k| s + l[(j, k)] * l[(i, k)]);
            if i == j {
                let radicand = a[(i, i)] - sum;
                if radicand <= T::zero() {
                    return Err(Error::DecompositionNotPossible(
                        "matrix is not positive definite",
                    ));
                }
                l.set((i, i), radicand.sqrt());
            } else {
                l.set((i, j), (a[(i, j)] - sum) / l[(j, j)]);
            }
        }
    }
    Ok(())
}

/// Cholesky decomposition `A = L·Lᵗ` of a symmetric positive-definite
/// matrix.
///
/// Identity and diagonal inputs are factored in closed form.
///
/// # Example
///
/// ```
/// use strata::Matrix;
///
/// let a = Matrix::from_rows(&[[4.0_f64, 2.0], [2.0, 3.0]]).unwrap();
/// let chol = a.cholesky().unwrap();
/// let l = chol.l();
/// assert_eq!(l.get(0, 0).unwrap(), 2.0);
/// assert_eq!(l.get(1, 0).unwrap(), 1.0);
///
/// let x = chol.solve(&[8.0, 7.0]).unwrap();
/// assert!((x[0] - 1.25).abs() < 1e-12 && (x[1] - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition<T: FloatScalar> {
    l: Matrix<T>,
}

impl<T: FloatScalar> CholeskyDecomposition<T> {
    /// Decompose `a`. Raises [`Error::NotSquare`], then
    /// [`Error::NotSymmetric`], then [`Error::DecompositionNotPossible`].
    pub fn new(a: &Matrix<T>) -> Result<Self> {
        let n = a.require_square()?;
        if !a.is_symmetric() {
            return Err(Error::NotSymmetric);
        }

        let l = match &a.repr {
            Repr::Identity(_) => Matrix::identity(n)?,
            Repr::Null(..) => {
                return Err(Error::DecompositionNotPossible("zero entry on the diagonal"))
            }
            Repr::Diagonal(d) => {
                if d.iter().any(|&x| x <= T::zero()) {
                    return Err(Error::DecompositionNotPossible(
                        "matrix is not positive definite",
                    ));
                }
                Matrix::from_repr(Repr::Diagonal(d.iter().map(|x| x.sqrt()).collect()))
            }
            _ => {
                let mut l = Grid::zeros(n, n);
                cholesky_into(&a.dense(), &mut l)?;
                Matrix::from_repr(Repr::Lower(l))
            }
        };
        Ok(Self { l })
    }

    /// Lower-triangular factor `L`.
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// `Lᵗ`, upper-triangular.
    pub fn lt(&self) -> Matrix<T> {
        self.l.transpose()
    }

    pub fn into_l(self) -> Matrix<T> {
        self.l
    }

    /// Solve `A x = b` by forward then back substitution.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        let n = self.l.nrows();
        if b.len() != n {
            return Err(mismatch("cholesky solve", (n, n), (b.len(), 1)));
        }
        let mut x = b.to_vec();
        forward_solve(&self.l, &mut x)?;
        back_solve(&self.lt(), &mut x)?;
        Ok(x)
    }

    /// `A⁻¹ = L⁻ᵗ · L⁻¹`.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        let li = self.l.inverse()?;
        li.transpose().multiply(&li)
    }

    /// `det(A) = (Π L[i][i])²`.
    pub fn det(&self) -> T {
        let d = self
            .l
            .main_diagonal()
            .into_iter()
            .fold(T::one(), |p, x| p * x);
        d * d
    }
}

impl<T: FloatScalar> Decompose<T> for CholeskyDecomposition<T> {
    fn factors(&self) -> Vec<Matrix<T>> {
        alloc::vec![self.l.clone()]
    }
}

// ── Convenience method on Matrix ────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Cholesky decomposition.
    pub fn cholesky(&self) -> Result<CholeskyDecomposition<T>> {
        CholeskyDecomposition::new(self)
    }
}
