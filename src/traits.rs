use core::fmt::{Debug, Display};
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in a [`Grid`](crate::Grid).
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix and vector elements.
///
/// Required by everything in this crate that needs `sqrt`, `acos`, `abs`
/// or rounding. Covers `f32` and `f64`.
pub trait FloatScalar: Scalar + Float + Display {
    /// Round half away from zero to `places` decimal places.
    fn round_to(self, places: u32) -> Self {
        let scale: Self = num_traits::cast(10u64.pow(places)).unwrap_or_else(Self::one);
        (self * scale).round() / scale
    }

    /// Zero with a positive sign, so that `-0.0` and `0.0` hash alike.
    fn canonical(self) -> Self {
        if self == Self::zero() {
            Self::zero()
        } else {
            self
        }
    }
}

impl<T: Scalar + Float + Display> FloatScalar for T {}

/// Read-only access to a dense, rectangular view of numbers.
///
/// Implemented by [`Grid`](crate::Grid) and [`Matrix`](crate::Matrix), so the
/// structural predicates and the decompositions can work on either without
/// materializing compact variants first.
pub trait GridRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn at(&self, row: usize, col: usize) -> T;

    /// Whether the view is square.
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
