use alloc::vec::Vec;

use log::warn;

use crate::error::Result;
use crate::grid::Grid;
use crate::linalg::Decompose;
use crate::matrix::{Kind, Matrix, Repr};
use crate::traits::FloatScalar;

/// Doolittle elimination without pivoting, in place.
///
/// On return `u` holds `U` and `l` holds the multipliers below its unit
/// diagonal. A zero pivot with nonzero entries beneath it cannot be
/// eliminated without a row swap; the division still happens and the
/// factors are numerically meaningless. Returns `false` in that case.
pub(crate) fn doolittle_in_place<T: FloatScalar>(u: &mut Grid<T>, l: &mut Grid<T>) -> bool {
    let n = u.nrows();
    let mut sound = true;

    for k in 0..n {
        l.set((k, k), T::one());
        let pivot = u[(k, k)];

        for i in (k + 1)..n {
            if u[(i, k)].is_zero() {
                continue;
            }
            if pivot.is_zero() && sound {
                warn!(
                    target: "strata::lu",
                    "zero pivot at ({k}, {k}) without pivoting; use LUP for this matrix"
                );
                sound = false;
            }
            let factor = u[(i, k)] / pivot;
            l.set((i, k), factor);
            for j in (k + 1)..n {
                u.set((i, j), u[(i, j)] - factor * u[(k, j)]);
            }
            u.set((i, k), T::zero());
        }
    }

    sound
}

/// LU decomposition `A = L·U` by Doolittle elimination, no pivoting.
///
/// `L` is unit lower-triangular and `U` upper-triangular. Diagonal,
/// upper-triangular, identity and null inputs are already in `U` form and
/// skip elimination (`L = I`, `U = A`).
///
/// # Example
///
/// ```
/// use strata::Matrix;
///
/// let a = Matrix::from_rows(&[[1.0_f64, 1.0, 1.0], [4.0, 3.0, -1.0], [3.0, 5.0, 3.0]]).unwrap();
/// let lu = a.lu().unwrap();
///
/// assert_eq!(lu.l().main_diagonal(), vec![1.0; 3]);
/// assert_eq!(lu.u().main_diagonal(), vec![1.0, -1.0, -10.0]);
/// assert_eq!(lu.det(), a.det().unwrap());
/// assert_eq!(lu.l().multiply(lu.u()).unwrap(), a);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: FloatScalar> {
    l: Matrix<T>,
    u: Matrix<T>,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Decompose a square matrix. Non-square input raises
    /// [`Error::NotSquare`](crate::Error::NotSquare).
    pub fn new(a: &Matrix<T>) -> Result<Self> {
        let n = a.require_square()?;

        if matches!(
            a.kind(),
            Kind::Diagonal | Kind::UpperTriangular | Kind::Identity | Kind::Null
        ) {
            return Ok(Self {
                l: Matrix::identity(n)?,
                u: a.clone(),
            });
        }

        let mut u = a.to_grid();
        let mut l = Grid::zeros(n, n);
        doolittle_in_place(&mut u, &mut l);

        Ok(Self {
            l: Matrix::from_repr(Repr::Lower(l)),
            u: Matrix::from_repr(Repr::Upper(u)),
        })
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// `(L, U)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>) {
        (self.l, self.u)
    }

    /// Determinant: the product of `U`'s diagonal, `L` being unit.
    pub fn det(&self) -> T {
        self.u
            .main_diagonal()
            .into_iter()
            .fold(T::one(), |d, x| d * x)
    }
}

impl<T: FloatScalar> Decompose<T> for LuDecomposition<T> {
    fn factors(&self) -> Vec<Matrix<T>> {
        alloc::vec![self.l.clone(), self.u.clone()]
    }
}

// ── Convenience method on Matrix ────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// LU decomposition without pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T>> {
        LuDecomposition::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use alloc::vec;

    fn assert_matrix_near(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
        assert_eq!(a.size(), b.size());
        for (ra, rb) in a.to_rows().iter().zip(b.to_rows().iter()) {
            for (x, y) in ra.iter().zip(rb.iter()) {
                assert!((x - y).abs() < tol, "{x} vs {y}");
            }
        }
    }

    #[test]
    fn lu_3x3() {
        let a = Matrix::<f64>::from_rows(&[[2.0, -1.0, -2.0], [-4.0, 6.0, 3.0], [-4.0, -2.0, 8.0]]).unwrap();
        let lu = a.lu().unwrap();
        assert_eq!(lu.l().kind(), Kind::LowerTriangular);
        assert_eq!(lu.u().kind(), Kind::UpperTriangular);
        assert_eq!(
            lu.l().to_rows(),
            vec![vec![1.0, 0.0, 0.0], vec![-2.0, 1.0, 0.0], vec![-2.0, -1.0, 1.0]]
        );
        assert_eq!(
            lu.u().to_rows(),
            vec![vec![2.0, -1.0, -2.0], vec![0.0, 4.0, -1.0], vec![0.0, 0.0, 3.0]]
        );
        assert_eq!(lu.det(), 24.0);
    }

    #[test]
    fn reconstruct_4x4() {
        let a = Matrix::<f64>::from_rows(&[
            [4.0, 3.0, 2.0, 1.0],
            [3.0, 4.0, 3.0, 2.0],
            [2.0, 3.0, 4.0, 3.0],
            [1.0, 2.0, 3.0, 4.0],
        ])
        .unwrap();
        let (l, u) = a.lu().unwrap().into_parts();
        assert_matrix_near(&l.multiply(&u).unwrap(), &a, 1e-12);
        assert!((a.lu().unwrap().det() - a.det().unwrap()).abs() < 1e-10);
    }

    #[test]
    fn structured_fast_path() {
        let u = Matrix::<f64>::upper_triangular(&[[1.0, 2.0], [0.0, 3.0]]).unwrap();
        let lu = u.lu().unwrap();
        assert_eq!(lu.l().kind(), Kind::Identity);
        assert_eq!(lu.u(), &u);

        let d = Matrix::<f64>::diagonal(vec![2.0, 5.0]).unwrap();
        assert_eq!(d.lu().unwrap().u().kind(), Kind::Diagonal);
        assert_eq!(Matrix::<f64>::null(3, 3).unwrap().lu().unwrap().det(), 0.0);
    }

    #[test]
    fn lower_input() {
        let l = Matrix::<f64>::lower_triangular(&[[2.0, 0.0], [4.0, 3.0]]).unwrap();
        let lu = l.lu().unwrap();
        assert_eq!(lu.l().to_rows(), vec![vec![1.0, 0.0], vec![2.0, 1.0]]);
        assert_eq!(lu.u().main_diagonal(), vec![2.0, 3.0]);
    }

    #[test]
    fn zero_pivot_is_not_an_error() {
        let a = Matrix::<f64>::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let mut u = a.to_grid();
        let mut l = Grid::zeros(2, 2);
        assert!(!doolittle_in_place(&mut u, &mut l));
        assert!(a.lu().is_ok());

        // A zero column needs no elimination.
        let b = Matrix::<f64>::from_rows(&[[0.0, 1.0], [0.0, 2.0]]).unwrap();
        let mut u = b.to_grid();
        let mut l = Grid::zeros(2, 2);
        assert!(doolittle_in_place(&mut u, &mut l));
    }

    #[test]
    fn not_square() {
        let r = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(r.lu().unwrap_err(), Error::NotSquare { rows: 1, cols: 3 });
    }
}
