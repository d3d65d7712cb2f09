use alloc::vec;
use alloc::vec::Vec;

use super::{Matrix, Repr};
use crate::error::{mismatch, Error, Result};
use crate::grid::Grid;
use crate::rounding::{round, Decimals};
use crate::traits::{FloatScalar, GridRef};

// ── Substitution kernels ────────────────────────────────────────────

/// Solve `L x = b` in place for lower-triangular `L`. Entries above the
/// diagonal are never read.
pub(crate) fn forward_solve<T: FloatScalar>(l: &impl GridRef<T>, b: &mut [T]) -> Result<()> {
    for i in 0..l.nrows() {
        let mut s = b[i];
        for k in 0..i {
            s = s - l.at(i, k) * b[k];
        }
        let d = l.at(i, i);
        if d.is_zero() {
            return Err(Error::NotInvertible);
        }
        b[i] = s / d;
    }
    Ok(())
}

/// Solve `U x = b` in place for upper-triangular `U`. Entries below the
/// diagonal are never read.
pub(crate) fn back_solve<T: FloatScalar>(u: &impl GridRef<T>, b: &mut [T]) -> Result<()> {
    let n = u.nrows();
    for i in (0..n).rev() {
        let mut s = b[i];
        for k in (i + 1)..n {
            s = s - u.at(i, k) * b[k];
        }
        let d = u.at(i, i);
        if d.is_zero() {
            return Err(Error::NotInvertible);
        }
        b[i] = s / d;
    }
    Ok(())
}

/// Invert a triangular grid one unit column at a time.
fn triangular_inverse<T: FloatScalar>(
    g: &Grid<T>,
    solve: fn(&Grid<T>, &mut [T]) -> Result<()>,
) -> Result<Grid<T>> {
    let n = g.nrows();
    let mut inv = Grid::zeros(n, n);
    let mut col = vec![T::zero(); n];
    for j in 0..n {
        col.iter_mut().for_each(|x| *x = T::zero());
        col[j] = T::one();
        solve(g, &mut col)?;
        for (i, &x) in col.iter().enumerate() {
            inv.set((i, j), x);
        }
    }
    Ok(inv)
}

/// Magnitude at or below which an elimination pivot of `g` counts as zero:
/// `max(m, n) * eps * max|a|`.
pub(crate) fn pivot_tolerance<T: FloatScalar>(g: &Grid<T>) -> T {
    let [m, n] = g.size();
    let scale = g.as_slice().iter().fold(T::zero(), |acc, x| acc.max(x.abs()));
    let dim = num_traits::cast::<usize, T>(m.max(n)).unwrap_or_else(T::one);
    dim * T::epsilon() * scale
}

/// Gauss-Jordan elimination with partial pivoting. A pivot column with no
/// entry above [`pivot_tolerance`] means the matrix is singular.
fn gauss_jordan<T: FloatScalar>(g: &Grid<T>) -> Result<Grid<T>> {
    let n = g.nrows();
    let tol = pivot_tolerance(g);
    let mut a = g.clone();
    let mut inv = Grid::from_diagonal(&vec![T::one(); n]);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&x, &y| {
                a[(x, col)]
                    .abs()
                    .partial_cmp(&a[(y, col)].abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[(pivot_row, col)].abs() <= tol {
            return Err(Error::NotInvertible);
        }
        a.swap_rows(col, pivot_row);
        inv.swap_rows(col, pivot_row);

        let p = a[(col, col)];
        for j in 0..n {
            a.set((col, j), a[(col, j)] / p);
            inv.set((col, j), inv[(col, j)] / p);
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[(row, col)];
            if factor.is_zero() {
                continue;
            }
            for j in 0..n {
                a.set((row, j), a[(row, j)] - factor * a[(col, j)]);
                inv.set((row, j), inv[(row, j)] - factor * inv[(col, j)]);
            }
        }
    }
    Ok(inv)
}

/// Determinant via elimination with partial pivoting.
fn det_by_elimination<T: FloatScalar>(g: &Grid<T>) -> T {
    let n = g.nrows();
    let mut a = g.clone();
    let mut sign = T::one();

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a[(col, col)].abs();
        for row in (col + 1)..n {
            let val = a[(row, col)].abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val.is_zero() {
            return T::zero();
        }

        if max_row != col {
            a.swap_rows(col, max_row);
            sign = -sign;
        }

        let pivot = a[(col, col)];
        for row in (col + 1)..n {
            let factor = a[(row, col)] / pivot;
            for j in (col + 1)..n {
                a.set((row, j), a[(row, j)] - factor * a[(col, j)]);
            }
            a.set((row, col), T::zero());
        }
    }

    (0..n).fold(sign, |det, i| det * a[(i, i)])
}

/// Number of nonzero rows after row-echelon reduction. Entries within
/// [`pivot_tolerance`] of zero count as zero.
fn echelon_rank<T: FloatScalar>(g: &Grid<T>) -> usize {
    let [m, n] = g.size();
    let mut a = g.clone();
    let tol = pivot_tolerance(g);

    let mut rank = 0;
    for col in 0..n {
        if rank == m {
            break;
        }
        let (pivot_row, pivot_val) = (rank..m)
            .map(|r| (r, a[(r, col)].abs()))
            .fold((rank, T::zero()), |best, cur| if cur.1 > best.1 { cur } else { best });
        if pivot_val <= tol {
            continue;
        }
        a.swap_rows(rank, pivot_row);
        let p = a[(rank, col)];
        for row in (rank + 1)..m {
            let factor = a[(row, col)] / p;
            for j in col..n {
                a.set((row, j), a[(row, j)] - factor * a[(rank, j)]);
            }
        }
        rank += 1;
    }
    rank
}

fn sarrus<T: FloatScalar>(g: &Grid<T>) -> T {
    let a = |i, j| g[(i, j)];
    a(0, 0) * (a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1))
        - a(0, 1) * (a(1, 0) * a(2, 2) - a(1, 2) * a(2, 0))
        + a(0, 2) * (a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0))
}

// ── Square-only operations ──────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Determinant.
    ///
    /// Closed forms for structured variants; explicit expansion up to
    /// 3×3 and pivoted elimination beyond that.
    ///
    /// ```
    /// use strata::Matrix;
    /// let m = Matrix::from_rows(&[[1.0_f64, 1.0, 1.0], [4.0, 3.0, -1.0], [3.0, 5.0, 3.0]]).unwrap();
    /// assert_eq!(m.det().unwrap(), 10.0);
    /// ```
    pub fn det(&self) -> Result<T> {
        self.require_square()?;
        let det = match &self.repr {
            Repr::Identity(_) => T::one(),
            Repr::Null(..) => T::zero(),
            Repr::Diagonal(d) => d.iter().fold(T::one(), |p, &x| p * x),
            Repr::Upper(g) | Repr::Lower(g) => g.diagonal().into_iter().fold(T::one(), |p, x| p * x),
            Repr::Square(g) | Repr::Rectangular(g) => match g.nrows() {
                1 => g[(0, 0)],
                2 => g[(0, 0)] * g[(1, 1)] - g[(0, 1)] * g[(1, 0)],
                3 => sarrus(g),
                _ => det_by_elimination(g),
            },
        };
        Ok(det)
    }

    /// Determinant rounded half-up.
    pub fn det_rounded(&self, decimals: Decimals) -> Result<T> {
        self.det().map(|d| round(d, decimals))
    }

    /// Absolute value of a square matrix, i.e. its determinant.
    pub fn abs(&self) -> Result<T> {
        self.det()
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> Result<T> {
        self.require_square()?;
        Ok(self.main_diagonal().into_iter().fold(T::zero(), |s, x| s + x))
    }

    /// Trace rounded half-up.
    pub fn trace_rounded(&self, decimals: Decimals) -> Result<T> {
        self.trace().map(|t| round(t, decimals))
    }

    /// Rank. Defined for every shape.
    ///
    /// ```
    /// use strata::Matrix;
    /// let m = Matrix::from_rows(&[[1.0_f64, 2.0, 3.0], [2.0, 4.0, 6.0]]).unwrap();
    /// assert_eq!(m.rank(), 1);
    /// assert_eq!(Matrix::<f64>::identity(4).unwrap().rank(), 4);
    /// ```
    pub fn rank(&self) -> usize {
        match &self.repr {
            Repr::Null(..) => 0,
            Repr::Identity(n) => *n,
            Repr::Diagonal(d) => d.iter().filter(|x| !x.is_zero()).count(),
            // A zero on the diagonal does not pin down the rank of a
            // triangular matrix, e.g. [[0, 1], [0, 0]] has rank 1.
            Repr::Upper(g) | Repr::Lower(g) => {
                if g.diagonal().iter().all(|x| !x.is_zero()) {
                    g.nrows()
                } else {
                    echelon_rank(g)
                }
            }
            Repr::Square(g) | Repr::Rectangular(g) => echelon_rank(g),
        }
    }

    /// Multiplicative inverse.
    ///
    /// Identity is its own inverse, a diagonal matrix inverts entrywise,
    /// triangular matrices use substitution and stay triangular, general
    /// matrices use Gauss-Jordan elimination. Any zero pivot raises
    /// [`Error::NotInvertible`].
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let u = Matrix::upper_triangular(&[[2.0_f64, 1.0], [0.0, 4.0]]).unwrap();
    /// let inv = u.inverse().unwrap();
    /// assert_eq!(inv.kind(), Kind::UpperTriangular);
    /// assert_eq!(inv.to_rows(), vec![vec![0.5, -0.125], vec![0.0, 0.25]]);
    /// ```
    pub fn inverse(&self) -> Result<Self> {
        self.require_square()?;
        let repr = match &self.repr {
            Repr::Identity(n) => Repr::Identity(*n),
            Repr::Null(..) => return Err(Error::NotInvertible),
            Repr::Diagonal(d) => {
                if d.iter().any(|x| x.is_zero()) {
                    return Err(Error::NotInvertible);
                }
                Repr::Diagonal(d.iter().map(|x| x.recip()).collect())
            }
            Repr::Lower(g) => Repr::Lower(triangular_inverse(g, |g, b| forward_solve(g, b))?),
            Repr::Upper(g) => Repr::Upper(triangular_inverse(g, |g, b| back_solve(g, b))?),
            Repr::Square(g) | Repr::Rectangular(g) => Repr::Square(gauss_jordan(g)?),
        };
        Ok(Self::from_repr(repr))
    }

    /// Integer power. `k = 0` gives the identity, negative exponents
    /// invert first.
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let d = Matrix::diagonal(vec![2.0_f64, 3.0]).unwrap();
    /// let p = d.power(3).unwrap();
    /// assert_eq!(p.kind(), Kind::Diagonal);
    /// assert_eq!(p.main_diagonal(), vec![8.0, 27.0]);
    /// assert_eq!(d.power(-1).unwrap().main_diagonal(), vec![0.5, 1.0 / 3.0]);
    /// ```
    pub fn power(&self, k: i32) -> Result<Self> {
        let n = self.require_square()?;
        match k {
            0 => Self::identity(n),
            1 => Ok(self.clone()),
            k if k < 0 => self.inverse()?.power_unsigned(k.unsigned_abs()),
            k => self.power_unsigned(k.unsigned_abs()),
        }
    }

    fn power_unsigned(&self, mut e: u32) -> Result<Self> {
        let mut result = Self::identity(self.nrows())?;
        let mut base = self.clone();
        while e > 0 {
            if e & 1 == 1 {
                result = result.multiply(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.multiply(&base)?;
            }
        }
        Ok(result)
    }

    /// `self × rhs⁻¹`.
    pub fn divide(&self, rhs: &Self) -> Result<Self> {
        rhs.require_square()?;
        if self.ncols() != rhs.nrows() {
            return Err(mismatch("divide", self.dims(), rhs.dims()));
        }
        self.multiply(&rhs.inverse()?)
    }

    /// `self + s·I`. Structured variants stay structured.
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let z = Matrix::<f64>::null(2, 2).unwrap();
    /// let shifted = z.add_scalar(3.0).unwrap();
    /// assert_eq!(shifted.kind(), Kind::Diagonal);
    /// assert_eq!(shifted.trace().unwrap(), 6.0);
    /// ```
    pub fn add_scalar(&self, s: T) -> Result<Self> {
        let n = self.require_square()?;
        if s.is_zero() {
            return Ok(self.clone());
        }
        let shift = |g: &Grid<T>| {
            let mut g = g.clone();
            for i in 0..n {
                g.set((i, i), g[(i, i)] + s);
            }
            g
        };
        let repr = match &self.repr {
            Repr::Null(..) => Repr::Diagonal(vec![s; n]),
            Repr::Identity(_) => Repr::Diagonal(vec![T::one() + s; n]),
            Repr::Diagonal(d) => Repr::Diagonal(d.iter().map(|&x| x + s).collect()),
            Repr::Upper(g) => Repr::Upper(shift(g)),
            Repr::Lower(g) => Repr::Lower(shift(g)),
            Repr::Square(g) | Repr::Rectangular(g) => Repr::Square(shift(g)),
        };
        Ok(Self::from_repr(repr))
    }

    /// Solve `self · x = b` for lower-triangular `self`.
    pub fn forward_substitution(&self, b: &[T]) -> Result<Vec<T>> {
        self.substitute(b, "forward_substitution", true)
    }

    /// Solve `self · x = b` for upper-triangular `self`.
    ///
    /// ```
    /// use strata::Matrix;
    /// let u = Matrix::upper_triangular(&[[2.0_f64, 1.0], [0.0, 4.0]]).unwrap();
    /// assert_eq!(u.back_substitution(&[5.0, 8.0]).unwrap(), vec![1.5, 2.0]);
    /// ```
    pub fn back_substitution(&self, b: &[T]) -> Result<Vec<T>> {
        self.substitute(b, "back_substitution", false)
    }

    fn substitute(&self, b: &[T], op: &'static str, lower: bool) -> Result<Vec<T>> {
        let n = self.require_square()?;
        if lower && !self.is_lower_triangular() {
            return Err(Error::StructuralViolation(super::Kind::LowerTriangular));
        }
        if !lower && !self.is_upper_triangular() {
            return Err(Error::StructuralViolation(super::Kind::UpperTriangular));
        }
        if b.len() != n {
            return Err(mismatch(op, (n, n), (b.len(), 1)));
        }
        let mut x = b.to_vec();
        if lower {
            forward_solve(self, &mut x)?;
        } else {
            back_solve(self, &mut x)?;
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Kind;

    const TOL: f64 = 1e-10;

    fn assert_matrix_near(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
        assert_eq!(a.size(), b.size());
        for (ra, rb) in a.to_rows().iter().zip(b.to_rows().iter()) {
            for (x, y) in ra.iter().zip(rb.iter()) {
                assert!((x - y).abs() < tol, "{x} vs {y}\n{a}\n{b}");
            }
        }
    }

    fn general() -> Matrix<f64> {
        Matrix::<f64>::from_rows(&[
            [4.0, -2.0, 1.0, 3.0],
            [3.0, 6.0, -4.0, 2.0],
            [2.0, 1.0, 8.0, -5.0],
            [1.0, 3.0, 2.0, 7.0],
        ])
        .unwrap()
    }

    #[test]
    fn det_closed_forms() {
        assert_eq!(Matrix::<f64>::identity(5).unwrap().det().unwrap(), 1.0);
        assert_eq!(Matrix::<f64>::null(3, 3).unwrap().det().unwrap(), 0.0);
        let u = Matrix::<f64>::upper_triangular(&[[2.0, 9.0], [0.0, -3.0]]).unwrap();
        assert_eq!(u.det().unwrap(), -6.0);
        assert_eq!(Matrix::<f64>::from_rows(&[[7.0]]).unwrap().det().unwrap(), 7.0);
        let m = Matrix::<f64>::from_rows(&[[3.0, 8.0], [4.0, 6.0]]).unwrap();
        assert_eq!(m.abs().unwrap(), -14.0);
    }

    #[test]
    fn det_elimination_agrees_with_expansion() {
        let m = Matrix::<f64>::from_rows(&[[1.0, 1.0, 1.0], [4.0, 3.0, -1.0], [3.0, 5.0, 3.0]]).unwrap();
        assert!((det_by_elimination(&m.to_grid()) - m.det().unwrap()).abs() < TOL);
        // Laplace expansion along the first row of `general()` gives 2440.
        assert!((general().det().unwrap() - 2440.0).abs() < 1e-8);
    }

    #[test]
    fn not_square() {
        let r = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let err = Error::NotSquare { rows: 1, cols: 3 };
        assert_eq!(r.det().unwrap_err(), err);
        assert_eq!(r.trace().unwrap_err(), err);
        assert_eq!(r.inverse().unwrap_err(), err);
        assert_eq!(r.power(2).unwrap_err(), err);
        assert_eq!(r.abs().unwrap_err(), err);
        assert_eq!(
            Matrix::<f64>::null(2, 3).unwrap().inverse().unwrap_err(),
            Error::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn trace_and_rounding() {
        assert_eq!(general().trace().unwrap(), 25.0);
        let m = Matrix::<f64>::from_rows(&[[1.23456, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(m.trace_rounded(Decimals::Two).unwrap(), 2.23);
        assert_eq!(m.det_rounded(Decimals::Three).unwrap(), 1.235);
    }

    #[test]
    fn rank() {
        let singular = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        assert_eq!(singular.rank(), 2);
        assert_eq!(general().rank(), 4);
        assert_eq!(Matrix::<f64>::diagonal(vec![1.0, 0.0, 3.0]).unwrap().rank(), 2);
        assert_eq!(Matrix::<f64>::null(2, 4).unwrap().rank(), 0);
        let nilpotent = Matrix::<f64>::upper_triangular(&[[0.0, 1.0], [0.0, 0.0]]).unwrap();
        assert_eq!(nilpotent.rank(), 1);
        let wide = Matrix::<f64>::from_rows(&[[0.0, 0.0, 1.0], [0.0, 2.0, 0.0]]).unwrap();
        assert_eq!(wide.rank(), 2);
    }

    #[test]
    fn inverse_variants() {
        let i = Matrix::<f64>::identity(3).unwrap();
        assert_eq!(i.inverse().unwrap().kind(), Kind::Identity);

        let d = Matrix::<f64>::diagonal(vec![2.0, 4.0]).unwrap();
        assert_eq!(d.inverse().unwrap().main_diagonal(), vec![0.5, 0.25]);
        assert_eq!(
            Matrix::<f64>::diagonal(vec![2.0, 0.0]).unwrap().inverse().unwrap_err(),
            Error::NotInvertible
        );
        assert_eq!(
            Matrix::<f64>::null(2, 2).unwrap().inverse().unwrap_err(),
            Error::NotInvertible
        );

        let l = Matrix::<f64>::lower_triangular(&[[2.0, 0.0, 0.0], [1.0, 3.0, 0.0], [4.0, -1.0, 5.0]]).unwrap();
        let li = l.inverse().unwrap();
        assert_eq!(li.kind(), Kind::LowerTriangular);
        assert_matrix_near(&l.multiply(&li).unwrap(), &i, TOL);

        let a = general();
        let ai = a.inverse().unwrap();
        assert_eq!(ai.kind(), Kind::Square);
        assert_matrix_near(&a.multiply(&ai).unwrap(), &Matrix::<f64>::identity(4).unwrap(), TOL);
        assert_matrix_near(&ai.multiply(&a).unwrap(), &Matrix::<f64>::identity(4).unwrap(), TOL);
    }

    #[test]
    fn singular_general() {
        let m = Matrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(m.inverse().unwrap_err(), Error::NotInvertible);
        let u = Matrix::<f64>::upper_triangular(&[[1.0, 2.0], [0.0, 0.0]]).unwrap();
        assert_eq!(u.inverse().unwrap_err(), Error::NotInvertible);
    }

    #[test]
    fn singular_with_rounding_residue() {
        // Elimination leaves a last pivot near 1e-16 rather than an exact zero.
        let m = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]])
            .unwrap();
        assert_eq!(m.rank(), 2);
        assert_eq!(m.det().unwrap(), 0.0);
        assert_eq!(m.inverse().unwrap_err(), Error::NotInvertible);
        assert_eq!(m.power(-1).unwrap_err(), Error::NotInvertible);
        assert_eq!(m.divide(&m).unwrap_err(), Error::NotInvertible);
        // The threshold follows the magnitude of the entries.
        assert_eq!(m.scale(1024.0).inverse().unwrap_err(), Error::NotInvertible);
        assert_eq!(m.scale(1.0 / 1024.0).inverse().unwrap_err(), Error::NotInvertible);
    }

    #[test]
    fn powers() {
        let a = Matrix::<f64>::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
        assert_eq!(a.power(0).unwrap().kind(), Kind::Identity);
        assert_eq!(a.power(1).unwrap(), a);
        assert_eq!(a.power(3).unwrap().get(0, 1).unwrap(), 3.0);
        assert_eq!(a.power(-2).unwrap().get(0, 1).unwrap(), -2.0);

        let u = Matrix::<f64>::upper_triangular(&[[1.0, 1.0], [0.0, 2.0]]).unwrap();
        let u5 = u.power(5).unwrap();
        assert_eq!(u5.kind(), Kind::UpperTriangular);
        assert_eq!(u5, u.multiply(&u).unwrap().multiply(&u.power(3).unwrap()).unwrap());

        assert!(Matrix::<f64>::null(2, 2).unwrap().power(-1).is_err());
        assert!(Matrix::<f64>::null(2, 2).unwrap().power(4).unwrap().is_null());
    }

    #[test]
    fn divide_by_self() {
        let a = general();
        assert_matrix_near(&a.divide(&a).unwrap(), &Matrix::<f64>::identity(4).unwrap(), TOL);
        let r = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(a.divide(&r), Err(Error::NotSquare { .. })));
    }

    #[test]
    fn scalar_shift() {
        let i = Matrix::<f64>::identity(2).unwrap();
        assert_eq!(i.add_scalar(1.0).unwrap().main_diagonal(), vec![2.0, 2.0]);
        assert_eq!(i.add_scalar(0.0).unwrap().kind(), Kind::Identity);
        let l = Matrix::<f64>::lower_triangular(&[[1.0, 0.0], [5.0, 1.0]]).unwrap();
        let s = l.add_scalar(-1.0).unwrap();
        assert_eq!(s.kind(), Kind::LowerTriangular);
        assert_eq!(s.to_rows(), vec![vec![0.0, 0.0], vec![5.0, 0.0]]);
    }

    #[test]
    fn substitution() {
        let l = Matrix::<f64>::lower_triangular(&[[2.0, 0.0], [1.0, 4.0]]).unwrap();
        assert_eq!(l.forward_substitution(&[4.0, 10.0]).unwrap(), vec![2.0, 2.0]);
        assert_eq!(
            l.back_substitution(&[1.0, 1.0]).unwrap_err(),
            Error::StructuralViolation(Kind::UpperTriangular)
        );
        assert!(matches!(
            l.forward_substitution(&[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch { .. })
        ));
        let singular = Matrix::<f64>::lower_triangular(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
        assert_eq!(singular.forward_substitution(&[1.0, 1.0]).unwrap_err(), Error::NotInvertible);
    }
}
