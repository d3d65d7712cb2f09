use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Index, Neg};

use crate::error::{mismatch, Error, Result};
use crate::grid::Grid;
use crate::matrix::Matrix;
use crate::rounding::{self, round, AngleUnit, Decimals, Rounded};
use crate::traits::FloatScalar;

/// Real vector of dimension at least 2.
///
/// Immutable apart from [`scale`](Vector::scale), which rescales in place.
/// Binary operations require both operands to have the same dimension and
/// report a mismatch as [`Error::DimensionMismatch`] with `(1, n)` shapes.
///
/// # Examples
///
/// ```
/// use strata::Vector;
///
/// let v = Vector::xy(3.0_f64, 4.0).unwrap();
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(v.dot(&Vector::xy(4.0, 3.0).unwrap()).unwrap(), 24.0);
///
/// let a = Vector::xyz(2.0_f64, 1.0, -1.0).unwrap();
/// let b = Vector::xyz(-3.0, 4.0, 1.0).unwrap();
/// assert_eq!(a.cross(&b).unwrap(), Vector::xyz(5.0, 1.0, 11.0).unwrap());
/// ```
#[derive(Clone)]
pub struct Vector<T> {
    data: Vec<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: FloatScalar> Vector<T> {
    /// Vector over `data`. Fewer than two entries raise
    /// [`Error::InvalidVectorDimension`], a `NaN` or infinite entry raises
    /// [`Error::NullEntry`].
    pub fn new(data: Vec<T>) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error::InvalidVectorDimension(data.len()));
        }
        if let Some(i) = data.iter().position(|x| !x.is_finite()) {
            return Err(Error::NullEntry { row: 0, col: i });
        }
        Ok(Self { data })
    }

    /// Copy a slice into a new vector.
    pub fn from_slice(data: &[T]) -> Result<Self> {
        Self::new(data.to_vec())
    }

    /// Vector whose `i`-th entry is `f(i)`.
    pub fn from_fn(dim: usize, f: impl Fn(usize) -> T) -> Result<Self> {
        Self::new((0..dim).map(f).collect())
    }

    /// All-ones vector.
    pub fn ones(dim: usize) -> Result<Self> {
        Self::from_fn(dim, |_| T::one())
    }

    /// Two-dimensional vector.
    pub fn xy(x: T, y: T) -> Result<Self> {
        Self::new(alloc::vec![x, y])
    }

    /// Three-dimensional vector.
    pub fn xyz(x: T, y: T, z: T) -> Result<Self> {
        Self::new(alloc::vec![x, y, z])
    }

    /// Sum of two or more vectors.
    ///
    /// ```
    /// use strata::Vector;
    /// let vs = [Vector::xy(1.0_f64, 2.0).unwrap(), Vector::xy(3.0, 4.0).unwrap(), Vector::xy(5.0, 6.0).unwrap()];
    /// assert_eq!(Vector::sum_all(&vs).unwrap(), Vector::xy(9.0, 12.0).unwrap());
    /// assert!(Vector::sum_all(&vs[..1]).is_err());
    /// ```
    pub fn sum_all(vectors: &[Self]) -> Result<Self> {
        Self::fold_all(vectors, Self::add)
    }

    /// `v0 - v1 - v2 - ...` over two or more vectors.
    pub fn difference_all(vectors: &[Self]) -> Result<Self> {
        Self::fold_all(vectors, Self::subtract)
    }

    fn fold_all(vectors: &[Self], f: impl Fn(&Self, &Self) -> Result<Self>) -> Result<Self> {
        match vectors {
            [first, rest @ ..] if !rest.is_empty() => {
                rest.iter().try_fold(first.clone(), |acc, v| f(&acc, v))
            }
            _ => Err(Error::InvalidParameter("at least two vectors are required")),
        }
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl<T> Vector<T> {
    /// Number of components.
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl<T: FloatScalar> Vector<T> {
    fn check_dim(&self, rhs: &Self, op: &'static str) -> Result<()> {
        if self.dim() != rhs.dim() {
            return Err(mismatch(op, (1, self.dim()), (1, rhs.dim())));
        }
        Ok(())
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        Self {
            data: self.iter().zip(rhs.iter()).map(|(&a, &b)| f(a, b)).collect(),
        }
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self {
            data: self.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.check_dim(rhs, "add")?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    pub fn subtract(&self, rhs: &Self) -> Result<Self> {
        self.check_dim(rhs, "subtract")?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Add `s` to every component.
    pub fn add_scalar(&self, s: T) -> Self {
        self.map(|x| x + s)
    }

    /// `s · self` as a new vector.
    pub fn scaled(&self, s: T) -> Self {
        self.map(|x| x * s)
    }

    /// Rescale in place. This is the only mutating operation on a vector.
    ///
    /// ```
    /// use strata::Vector;
    /// let mut v = Vector::xy(1.0_f64, -2.0).unwrap();
    /// v.scale(3.0);
    /// assert_eq!(v, Vector::xy(3.0, -6.0).unwrap());
    /// ```
    pub fn scale(&mut self, s: T) {
        self.data.iter_mut().for_each(|x| *x = *x * s);
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()
    }

    pub fn magnitude_rounded(&self, decimals: Decimals) -> T {
        round(self.magnitude(), decimals)
    }

    pub fn dot(&self, rhs: &Self) -> Result<T> {
        self.check_dim(rhs, "dot")?;
        Ok(self
            .iter()
            .zip(rhs.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }

    pub fn dot_rounded(&self, rhs: &Self, decimals: Decimals) -> Result<T> {
        self.dot(rhs).map(|d| round(d, decimals))
    }

    /// Cross product. Both operands must be three-dimensional.
    pub fn cross(&self, rhs: &Self) -> Result<Self> {
        if self.dim() != 3 || rhs.dim() != 3 {
            return Err(Error::InvalidOperation(
                "cross product is only defined in three dimensions",
            ));
        }
        let (a, b) = (&self.data, &rhs.data);
        Ok(Self {
            data: alloc::vec![
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ],
        })
    }

    /// Unit vector in the same direction.
    pub fn unit(&self) -> Result<Self> {
        let m = self.magnitude();
        if m.is_zero() {
            return Err(Error::InvalidOperation("zero vector has no direction"));
        }
        Ok(self.map(|x| x / m))
    }
}

impl<T: FloatScalar> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        -&self
    }
}

impl<T: FloatScalar> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.map(|x| -x)
    }
}

// ── Angles and projections ──────────────────────────────────────────

impl<T: FloatScalar> Vector<T> {
    /// Angle between `self` and `rhs`.
    ///
    /// ```
    /// use strata::{AngleUnit, Vector};
    /// let x = Vector::xy(1.0_f64, 0.0).unwrap();
    /// let d = Vector::xy(1.0_f64, 1.0).unwrap();
    /// assert!((x.angle(&d, AngleUnit::Degree).unwrap() - 45.0).abs() < 1e-12);
    /// ```
    pub fn angle(&self, rhs: &Self, unit: AngleUnit) -> Result<T> {
        let dot = self.dot(rhs)?;
        let denom = self.magnitude() * rhs.magnitude();
        if denom.is_zero() {
            return Err(Error::InvalidOperation("angle with a zero vector"));
        }
        // Rounding can push the cosine just outside [-1, 1].
        let cos = (dot / denom).max(-T::one()).min(T::one());
        Ok(unit.from_radians(cos.acos()))
    }

    pub fn angle_rounded(&self, rhs: &Self, unit: AngleUnit, decimals: Decimals) -> Result<T> {
        self.angle(rhs, unit).map(|a| round(a, decimals))
    }

    /// `dot(self, rhs) == 0`, with no tolerance.
    pub fn is_orthogonal(&self, rhs: &Self) -> Result<bool> {
        self.dot(rhs).map(|d| d.is_zero())
    }

    /// The factor `a` with `rhs = a · self`, if one exists.
    ///
    /// Components where `self` is zero must be zero in `rhs` too. Ratios
    /// are compared to a relative tolerance of one epsilon. Returns `None`
    /// when `self` is the zero vector.
    ///
    /// ```
    /// use strata::Vector;
    /// let v = Vector::xyz(1.0_f64, 0.0, -2.0).unwrap();
    /// assert_eq!(v.is_parallel(&Vector::xyz(-3.0, 0.0, 6.0).unwrap()).unwrap(), Some(-3.0));
    /// assert_eq!(v.is_parallel(&Vector::xyz(-3.0, 1.0, 6.0).unwrap()).unwrap(), None);
    /// ```
    pub fn is_parallel(&self, rhs: &Self) -> Result<Option<T>> {
        self.check_dim(rhs, "is_parallel")?;
        let Some(k) = self.iter().position(|x| !x.is_zero()) else {
            return Ok(None);
        };
        let a = rhs[k] / self[k];
        let tol = T::epsilon() * a.abs().max(T::one());
        let consistent = self.iter().zip(rhs.iter()).all(|(&v, &w)| {
            if v.is_zero() {
                w.is_zero()
            } else {
                (w / v - a).abs() <= tol
            }
        });
        Ok(consistent.then_some(a))
    }

    /// Length of the projection of `rhs` onto `self`: `dot / |self|`.
    pub fn scalar_projection(&self, rhs: &Self) -> Result<T> {
        let dot = self.dot(rhs)?;
        let m = self.magnitude();
        if m.is_zero() {
            return Err(Error::InvalidOperation("projection onto a zero vector"));
        }
        Ok(dot / m)
    }

    pub fn scalar_projection_rounded(&self, rhs: &Self, decimals: Decimals) -> Result<T> {
        self.scalar_projection(rhs).map(|p| round(p, decimals))
    }

    /// Projection of `rhs` onto `self`.
    ///
    /// ```
    /// use strata::Vector;
    /// let v = Vector::xy(2.0_f64, 0.0).unwrap();
    /// let w = Vector::xy(3.0_f64, 4.0).unwrap();
    /// assert_eq!(v.vector_projection(&w).unwrap(), Vector::xy(3.0, 0.0).unwrap());
    /// assert_eq!(v.vector_rejection(&w).unwrap(), Vector::xy(0.0, 4.0).unwrap());
    /// ```
    pub fn vector_projection(&self, rhs: &Self) -> Result<Self> {
        let p = self.scalar_projection(rhs)?;
        Ok(self.unit()?.scaled(p))
    }

    /// Component of `rhs` orthogonal to `self`.
    pub fn vector_rejection(&self, rhs: &Self) -> Result<Self> {
        rhs.subtract(&self.vector_projection(rhs)?)
    }

    /// Cosines of the angles to each coordinate axis.
    pub fn direction_cosines(&self) -> Result<Self> {
        self.unit()
    }

    /// Angles to each coordinate axis.
    pub fn direction_angles(&self, unit: AngleUnit) -> Result<Self> {
        let cosines = self.direction_cosines()?;
        Ok(cosines.map(|c| unit.from_radians(c.max(-T::one()).min(T::one()).acos())))
    }
}

// ── Reshaping and matrices ──────────────────────────────────────────

impl<T: FloatScalar> Vector<T> {
    /// Change dimension: pad with zeros when growing, truncate when
    /// shrinking.
    ///
    /// ```
    /// use strata::Vector;
    /// let v = Vector::xyz(1.0_f64, 2.0, 3.0).unwrap();
    /// assert_eq!(v.transpose(2).unwrap(), Vector::xy(1.0, 2.0).unwrap());
    /// assert_eq!(v.transpose(4).unwrap().as_slice(), &[1.0, 2.0, 3.0, 0.0]);
    /// assert!(v.transpose(3).is_err());
    /// ```
    pub fn transpose(&self, dim: usize) -> Result<Self> {
        if dim < 2 {
            return Err(Error::InvalidVectorDimension(dim));
        }
        if dim == self.dim() {
            return Err(Error::InvalidParameter(
                "target dimension equals the current dimension",
            ));
        }
        let mut data = self.data.clone();
        data.resize(dim, T::zero());
        Ok(Self { data })
    }

    /// `m · self`. Requires `self.dim() == m.ncols()` and at least two rows.
    ///
    /// ```
    /// use strata::{Matrix, Vector};
    /// let rot = Matrix::from_rows(&[[0.0_f64, -1.0], [1.0, 0.0]]).unwrap();
    /// assert_eq!(Vector::xy(1.0, 0.0).unwrap().transform(&rot).unwrap(), Vector::xy(0.0, 1.0).unwrap());
    /// ```
    pub fn transform(&self, m: &Matrix<T>) -> Result<Self> {
        let [rows, cols] = m.size();
        if cols != self.dim() {
            return Err(mismatch("transform", (rows, cols), (self.dim(), 1)));
        }
        let product = m.multiply(&self.to_matrix())?;
        Self::new(product.column(0)?)
    }

    /// Column matrix with the components of `self`.
    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::new(Grid::build(self.dim(), 1, |i, _| self.data[i]))
    }
}

// ── Equality, hashing, display ──────────────────────────────────────

impl<T: FloatScalar> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: FloatScalar> Eq for Vector<T> {}

impl<T: FloatScalar> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dim().hash(state);
        for x in self.iter() {
            x.canonical().integer_decode().hash(state);
        }
    }
}

impl<T: FloatScalar> Vector<T> {
    /// Deferred formatter with a chosen number of decimals.
    ///
    /// ```
    /// use strata::{Decimals, Vector};
    /// let v = Vector::xyz(1.0_f64, -0.5, 2.0 / 3.0).unwrap();
    /// assert_eq!(v.display(Decimals::Two).to_string(), "<1.00, -0.50, 0.67>");
    /// assert_eq!(v.to_string(), "<1.0000, -0.5000, 0.6667>");
    /// ```
    pub fn display(&self, decimals: Decimals) -> Rounded<'_, Self> {
        Rounded::new(self, decimals)
    }
}

impl<T: FloatScalar> fmt::Display for Rounded<'_, Vector<T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, &x) in self.value.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            f.write_str(&rounding::format_entry(x, self.decimals))?;
        }
        write!(f, ">")
    }
}

impl<T: FloatScalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Decimals::default()), f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector").field(&self.data).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn v(data: &[f64]) -> Vector<f64> {
        Vector::<f64>::from_slice(data).unwrap()
    }

    #[test]
    fn construction() {
        assert_eq!(
            Vector::<f64>::new(vec![1.0]).unwrap_err(),
            Error::InvalidVectorDimension(1)
        );
        assert_eq!(
            Vector::<f64>::new(vec![1.0, f64::NAN]).unwrap_err(),
            Error::NullEntry { row: 0, col: 1 }
        );
        assert_eq!(Vector::<f64>::ones(3).unwrap(), v(&[1.0, 1.0, 1.0]));
        assert_eq!(Vector::<f64>::from_fn(3, |i| i as f64).unwrap()[2], 2.0);
    }

    #[test]
    fn magnitude_and_dot() {
        assert_eq!(v(&[3.0, 4.0]).magnitude(), 5.0);
        assert_eq!(v(&[1.0, 1.0]).magnitude_rounded(Decimals::Three), 1.414);
        assert_eq!(v(&[3.0, 4.0]).dot(&v(&[4.0, 3.0])).unwrap(), 24.0);
        assert_eq!(
            v(&[1.0, 2.0]).dot(&v(&[1.0, 2.0, 3.0])).unwrap_err(),
            Error::DimensionMismatch {
                op: "dot",
                left: (1, 2),
                right: (1, 3)
            }
        );
    }

    #[test]
    fn cross_anticommutes() {
        let a = v(&[2.0, 1.0, -1.0]);
        let b = v(&[-3.0, 4.0, 1.0]);
        let ab = a.cross(&b).unwrap();
        assert_eq!(ab, v(&[5.0, 1.0, 11.0]));
        assert_eq!(b.cross(&a).unwrap(), -ab);
        assert!(matches!(
            v(&[1.0, 2.0]).cross(&v(&[3.0, 4.0])),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn angles() {
        let x = v(&[1.0, 0.0]);
        let y = v(&[0.0, 2.0]);
        assert_eq!(x.angle_rounded(&y, AngleUnit::Degree, Decimals::Four).unwrap(), 90.0);
        assert!((x.angle(&y, AngleUnit::Radian).unwrap() - core::f64::consts::FRAC_PI_2).abs() < 1e-15);
        // The cosine of parallel vectors may round past one.
        let a = v(&[0.1, 0.2, 0.3]);
        assert!(a.angle(&a.scaled(3.0), AngleUnit::Radian).unwrap() < 1e-7);
        assert!(x.angle(&v(&[0.0, 0.0]), AngleUnit::Radian).is_err());
    }

    #[test]
    fn orthogonal_and_parallel() {
        assert!(v(&[1.0, 2.0]).is_orthogonal(&v(&[-2.0, 1.0])).unwrap());
        assert!(!v(&[1.0, 2.0]).is_orthogonal(&v(&[2.0, 1.0])).unwrap());
        assert_eq!(v(&[1.0, 2.0]).is_parallel(&v(&[0.5, 1.0])).unwrap(), Some(0.5));
        assert_eq!(v(&[0.0, 0.0]).is_parallel(&v(&[1.0, 1.0])).unwrap(), None);
        assert_eq!(v(&[0.0, 1.0]).is_parallel(&v(&[1.0, 1.0])).unwrap(), None);
    }

    #[test]
    fn projections() {
        let a = v(&[3.0, 4.0]);
        let b = v(&[2.0, 1.0]);
        assert_eq!(a.scalar_projection(&b).unwrap(), 2.0);
        let p = a.vector_projection(&b).unwrap();
        assert!((p[0] - 1.2).abs() < 1e-12 && (p[1] - 1.6).abs() < 1e-12);
        let r = a.vector_rejection(&b).unwrap();
        assert!(a.dot(&r).unwrap().abs() < 1e-12);
    }

    #[test]
    fn sums_and_scaling() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[3.0, 5.0]);
        assert_eq!(Vector::<f64>::difference_all(&[b.clone(), a.clone(), a.clone()]).unwrap(), v(&[1.0, 1.0]));
        assert_eq!(a.add_scalar(1.0), v(&[2.0, 3.0]));
        assert_eq!(a.scaled(-2.0), v(&[-2.0, -4.0]));
        assert!(a.add(&v(&[1.0, 2.0, 3.0])).is_err());
        assert!(Vector::<f64>::sum_all(&[]).is_err());
    }

    #[test]
    fn direction() {
        let d = v(&[3.0, 4.0]);
        assert_eq!(d.direction_cosines().unwrap(), v(&[0.6, 0.8]));
        let angles = v(&[1.0, 0.0, 0.0]).direction_angles(AngleUnit::Degree).unwrap();
        assert_eq!(angles[0], 0.0);
        assert!((angles[1] - 90.0).abs() < 1e-12 && (angles[2] - 90.0).abs() < 1e-12);
        assert!(v(&[0.0, 0.0]).unit().is_err());
    }

    #[test]
    fn transpose_bounds() {
        assert_eq!(v(&[1.0, 2.0]).transpose(1).unwrap_err(), Error::InvalidVectorDimension(1));
        assert!(v(&[1.0, 2.0]).transpose(2).is_err());
    }

    #[test]
    fn matrices() {
        let m = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let x = v(&[1.0, 0.0, -1.0]);
        assert_eq!(x.transform(&m).unwrap(), v(&[-2.0, -2.0]));
        assert!(v(&[1.0, 2.0]).transform(&m).is_err());
        let single = Matrix::<f64>::from_rows(&[[1.0, 1.0, 1.0]]).unwrap();
        assert_eq!(x.transform(&single).unwrap_err(), Error::InvalidVectorDimension(1));
        assert_eq!(x.to_matrix().size(), [3, 1]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn hash_agrees_with_eq() {
        use core::hash::BuildHasher;
        let s = std::collections::hash_map::RandomState::new();
        assert_eq!(s.hash_one(v(&[0.0, 1.0])), s.hash_one(v(&[-0.0, 1.0])));
    }

    #[test]
    fn non_finite_components_are_rejected() {
        assert_eq!(
            Vector::<f64>::xy(f64::NAN, 1.0).unwrap_err(),
            Error::NullEntry { row: 0, col: 0 }
        );
        assert_eq!(
            Vector::<f64>::xyz(1.0, 2.0, f64::INFINITY).unwrap_err(),
            Error::NullEntry { row: 0, col: 2 }
        );
        assert!(Vector::<f64>::new(vec![f64::NEG_INFINITY, 0.0]).is_err());
    }
}
