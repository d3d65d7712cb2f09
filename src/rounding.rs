//! Rounding and deferred formatting.
//!
//! Values are rounded half away from zero ("half-up" on magnitudes) to a
//! fixed number of [`Decimals`]. [`Matrix::display`](crate::Matrix::display)
//! and [`Vector::display`](crate::Vector::display) return lightweight
//! wrappers that only format when written.

use alloc::format;
use alloc::string::String;

use crate::traits::FloatScalar;

/// Number of decimal places kept by rounded results and formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decimals {
    Zero,
    One,
    Two,
    Three,
    #[default]
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
}

impl Decimals {
    /// Number of places after the decimal point.
    pub const fn places(self) -> u32 {
        match self {
            Decimals::Zero => 0,
            Decimals::One => 1,
            Decimals::Two => 2,
            Decimals::Three => 3,
            Decimals::Four => 4,
            Decimals::Five => 5,
            Decimals::Six => 6,
            Decimals::Seven => 7,
            Decimals::Eight => 8,
            Decimals::Nine => 9,
            Decimals::Ten => 10,
        }
    }
}

/// Unit for angles returned by vector operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    #[default]
    Radian,
    Degree,
}

impl AngleUnit {
    pub(crate) fn from_radians<T: FloatScalar>(self, r: T) -> T {
        match self {
            AngleUnit::Radian => r,
            AngleUnit::Degree => r.to_degrees(),
        }
    }
}

/// Round `x` half-up to the given number of decimals.
///
/// ```
/// use strata::rounding::{round, Decimals};
/// assert_eq!(round(2.64576_f64, Decimals::Four), 2.6458);
/// assert_eq!(round(-1.5_f64, Decimals::Zero), -2.0);
/// ```
#[inline]
pub fn round<T: FloatScalar>(x: T, decimals: Decimals) -> T {
    x.round_to(decimals.places())
}

/// Render one entry with exactly `decimals` places after the point.
pub(crate) fn format_entry<T: FloatScalar>(x: T, decimals: Decimals) -> String {
    let places = decimals.places() as usize;
    format!("{:.*}", places, round(x, decimals).canonical())
}

/// Deferred formatter returned by `display(Decimals)` on matrices and
/// vectors. Nothing is rendered until the value is written.
#[derive(Debug, Clone, Copy)]
pub struct Rounded<'a, V: ?Sized> {
    pub(crate) value: &'a V,
    pub(crate) decimals: Decimals,
}

impl<'a, V: ?Sized> Rounded<'a, V> {
    pub(crate) fn new(value: &'a V, decimals: Decimals) -> Self {
        Self { value, decimals }
    }
}
