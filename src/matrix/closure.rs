//! Closure rules: which [`Kind`] an operation returns.
//!
//! The `*_kind` functions are the whole contract in table form. The
//! arithmetic methods on [`Matrix`] dispatch on the operand variants,
//! pick a kernel that only touches the entries the result can hold, and
//! always produce the kind these tables name.
//!
//! | left \ right | Diagonal | Upper | Lower | Identity | Null | General |
//! |---|---|---|---|---|---|---|
//! | **sum** Diagonal | Diagonal | Upper | Lower | Diagonal | Diagonal | General |
//! | **sum** Upper | Upper | Upper | Square | Upper | Upper | General |
//! | **sum** Lower | Lower | Square | Lower | Lower | Lower | General |
//! | **product** Diagonal | Diagonal | Upper | Lower | Diagonal | Null | General |
//! | **product** Upper | Upper | Upper | Square | Upper | Null | General |
//! | **product** Lower | Lower | Square | Lower | Lower | Null | General |
//!
//! A null operand is the identity element of addition and absorbs
//! multiplication; an identity operand passes the other one through.

use core::ops::{Mul, Neg};

use log::trace;

use super::{Kind, Matrix, Repr};
use crate::error::{mismatch, Result};
use crate::traits::FloatScalar;

/// Kind of `left + right` for operands of the same shape.
pub fn sum_kind(left: Kind, right: Kind) -> Kind {
    use Kind::*;
    match (left, right) {
        (Null, k) | (k, Null) => k,
        (Diagonal | Identity, Diagonal | Identity) => Diagonal,
        (UpperTriangular, UpperTriangular | Diagonal | Identity)
        | (Diagonal | Identity, UpperTriangular) => UpperTriangular,
        (LowerTriangular, LowerTriangular | Diagonal | Identity)
        | (Diagonal | Identity, LowerTriangular) => LowerTriangular,
        (Rectangular, _) | (_, Rectangular) => Rectangular,
        _ => Square,
    }
}

/// Kind of `-a`. Negating the identity leaves a diagonal of `-1`.
pub fn neg_kind(kind: Kind) -> Kind {
    match kind {
        Kind::Identity => Kind::Diagonal,
        k => k,
    }
}

/// Kind of `left - right`.
pub fn difference_kind(left: Kind, right: Kind) -> Kind {
    sum_kind(left, neg_kind(right))
}

/// Kind of `s * a`.
pub fn scaled_kind<T: FloatScalar>(kind: Kind, s: T) -> Kind {
    if s.is_zero() {
        Kind::Null
    } else if s == T::one() {
        kind
    } else {
        neg_kind(kind)
    }
}

/// Kind of `left * right`. `square` tells whether the result shape
/// `left.rows × right.cols` is square.
pub fn product_kind(left: Kind, right: Kind, square: bool) -> Kind {
    use Kind::*;
    match (left, right) {
        (Null, _) | (_, Null) => Null,
        (Identity, k) | (k, Identity) => k,
        (Diagonal, Diagonal) => Diagonal,
        (Diagonal | UpperTriangular, UpperTriangular) | (UpperTriangular, Diagonal) => {
            UpperTriangular
        }
        (Diagonal | LowerTriangular, LowerTriangular) | (LowerTriangular, Diagonal) => {
            LowerTriangular
        }
        _ if square => Square,
        _ => Rectangular,
    }
}

/// Kind of `aᵗ`.
pub fn transpose_kind(kind: Kind) -> Kind {
    match kind {
        Kind::UpperTriangular => Kind::LowerTriangular,
        Kind::LowerTriangular => Kind::UpperTriangular,
        k => k,
    }
}

// ── Addition and subtraction ────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// `self + rhs`.
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let d = Matrix::diagonal(vec![1.0_f64, 2.0]).unwrap();
    /// let l = Matrix::lower_triangular(&[[1.0, 0.0], [3.0, 1.0]]).unwrap();
    /// let s = d.add(&l).unwrap();
    /// assert_eq!(s.kind(), Kind::LowerTriangular);
    /// assert_eq!(s.to_rows(), vec![vec![2.0, 0.0], vec![3.0, 3.0]]);
    /// ```
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.combine(rhs, "add", sum_kind(self.kind(), rhs.kind()), |a, b| a + b)
    }

    /// `self - rhs`.
    pub fn subtract(&self, rhs: &Self) -> Result<Self> {
        self.combine(
            rhs,
            "subtract",
            difference_kind(self.kind(), rhs.kind()),
            |a, b| a - b,
        )
    }

    fn combine(&self, rhs: &Self, op: &'static str, kind: Kind, f: impl Fn(T, T) -> T) -> Result<Self> {
        if self.size() != rhs.size() {
            return Err(mismatch(op, self.dims(), rhs.dims()));
        }
        let out = match (&self.repr, &rhs.repr) {
            (_, Repr::Null(..)) => self.clone(),
            (Repr::Null(..), _) => rhs.map_structured(|x| f(T::zero(), x)),
            _ if kind == Kind::Diagonal => {
                let d = self
                    .main_diagonal()
                    .into_iter()
                    .zip(rhs.main_diagonal())
                    .map(|(a, b)| f(a, b))
                    .collect();
                Self::from_repr(Repr::Diagonal(d))
            }
            _ => Self::with_kind(kind, self.dense().zip_map(&rhs.dense(), f)),
        };
        debug_assert_eq!(out.kind(), kind);
        Ok(out)
    }

    /// Apply a zero-preserving map, keeping the variant (identity
    /// becomes diagonal unless `f(1) == 1`).
    pub(crate) fn map_structured(&self, f: impl Fn(T) -> T) -> Self {
        let repr = match &self.repr {
            Repr::Rectangular(g) => Repr::Rectangular(g.map(f)),
            Repr::Square(g) => Repr::Square(g.map(f)),
            Repr::Upper(g) => Repr::Upper(g.map(f)),
            Repr::Lower(g) => Repr::Lower(g.map(f)),
            Repr::Diagonal(d) => Repr::Diagonal(d.iter().map(|&x| f(x)).collect()),
            Repr::Identity(n) => {
                let one = f(T::one());
                if one == T::one() {
                    Repr::Identity(*n)
                } else {
                    Repr::Diagonal(alloc::vec![one; *n])
                }
            }
            Repr::Null(r, c) => Repr::Null(*r, *c),
        };
        Self::from_repr(repr)
    }

    pub(crate) fn dims(&self) -> (usize, usize) {
        let [r, c] = self.size();
        (r, c)
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// `s * self`. Zero gives the null matrix of the same shape, one
    /// gives `self` back, anything else keeps the variant.
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let u = Matrix::upper_triangular(&[[1.0_f64, 2.0], [0.0, 3.0]]).unwrap();
    /// assert_eq!(u.scale(2.0).kind(), Kind::UpperTriangular);
    /// assert_eq!(u.scale(0.0).kind(), Kind::Null);
    /// assert_eq!(u.scale(2.0).scale(0.5), u);
    /// ```
    pub fn scale(&self, s: T) -> Self {
        let out = if s.is_zero() {
            let [r, c] = self.size();
            Self::from_repr(Repr::Null(r, c))
        } else if s == T::one() {
            self.clone()
        } else {
            self.map_structured(|x| x * s)
        };
        debug_assert_eq!(out.kind(), scaled_kind(self.kind(), s));
        out
    }
}

impl<T: FloatScalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: FloatScalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: FloatScalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -&self
    }
}

impl<T: FloatScalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map_structured(|x| -x)
    }
}

// ── Matrix multiplication ───────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// `self * rhs`.
    ///
    /// Structured pairs use dedicated kernels: a diagonal operand scales
    /// rows or columns, triangular pairs only sum over the band that can
    /// be nonzero. Everything else goes through the dense kernel and is
    /// returned as a general matrix.
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let l = Matrix::lower_triangular(&[[1.0_f64, 0.0], [2.0, 3.0]]).unwrap();
    /// let u = l.transpose();
    /// assert_eq!(l.multiply(&l).unwrap().kind(), Kind::LowerTriangular);
    /// assert_eq!(l.multiply(&u).unwrap().kind(), Kind::Square);
    ///
    /// let z = Matrix::<f64>::null(3, 2).unwrap();
    /// assert!(z.multiply(&l).unwrap().is_null());
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Result<Self> {
        let ([m, n], [k, p]) = (self.size(), rhs.size());
        if n != k {
            return Err(mismatch("multiply", (m, n), (k, p)));
        }
        let kind = product_kind(self.kind(), rhs.kind(), m == p);

        let repr = match (&self.repr, &rhs.repr) {
            (Repr::Null(..), _) | (_, Repr::Null(..)) => Repr::Null(m, p),
            (Repr::Identity(_), _) => rhs.repr.clone(),
            (_, Repr::Identity(_)) => self.repr.clone(),
            (Repr::Diagonal(a), Repr::Diagonal(b)) => {
                Repr::Diagonal(a.iter().zip(b).map(|(&x, &y)| x * y).collect())
            }
            (Repr::Diagonal(d), Repr::Upper(g)) => Repr::Upper(g.scale_rows(d)),
            (Repr::Diagonal(d), Repr::Lower(g)) => Repr::Lower(g.scale_rows(d)),
            (Repr::Upper(g), Repr::Diagonal(d)) => Repr::Upper(g.scale_cols(d)),
            (Repr::Lower(g), Repr::Diagonal(d)) => Repr::Lower(g.scale_cols(d)),
            (Repr::Diagonal(d), _) => return Ok(Self::with_kind(kind, rhs.dense().scale_rows(d))),
            (_, Repr::Diagonal(d)) => return Ok(Self::with_kind(kind, self.dense().scale_cols(d))),
            (Repr::Upper(a), Repr::Upper(b)) => Repr::Upper(a.matmul_upper(b)),
            (Repr::Lower(a), Repr::Lower(b)) => Repr::Lower(a.matmul_lower(b)),
            _ => {
                trace!(
                    target: "strata::closure",
                    "dense product {} x {} -> {}x{} {}",
                    self.kind(),
                    rhs.kind(),
                    m,
                    p,
                    kind,
                );
                return Ok(Self::with_kind(kind, self.dense().matmul(&rhs.dense())));
            }
        };
        let out = Self::from_repr(repr);
        debug_assert_eq!(out.kind(), kind);
        Ok(out)
    }

    /// `selfᵗ`. Upper and lower triangular swap, diagonal and identity
    /// are their own transpose, a null matrix swaps its shape.
    pub fn transpose(&self) -> Self {
        let repr = match &self.repr {
            Repr::Rectangular(g) => Repr::Rectangular(g.transpose()),
            Repr::Square(g) => Repr::Square(g.transpose()),
            Repr::Upper(g) => Repr::Lower(g.transpose()),
            Repr::Lower(g) => Repr::Upper(g.transpose()),
            Repr::Diagonal(_) | Repr::Identity(_) => self.repr.clone(),
            Repr::Null(r, c) => Repr::Null(*c, *r),
        };
        let out = Self::from_repr(repr);
        debug_assert_eq!(out.kind(), transpose_kind(self.kind()));
        out
    }
}
