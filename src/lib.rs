//! # strata
//!
//! Structure-aware dense linear algebra, no-std compatible (with `alloc`).
//! Every matrix carries its structural variant, and every operation returns
//! the most specific variant its result is guaranteed to have.
//!
//! ## Quick start
//!
//! ```
//! use strata::{Kind, Matrix, Vector};
//!
//! let l = Matrix::lower_triangular(&[[2.0_f64, 0.0], [1.0, 3.0]]).unwrap();
//! let d = Matrix::diagonal(vec![1.0, 2.0]).unwrap();
//!
//! // Lower × Diagonal stays lower triangular.
//! let p = l.multiply(&d).unwrap();
//! assert_eq!(p.kind(), Kind::LowerTriangular);
//!
//! // Structured inverse, determinant and rank.
//! assert_eq!(p.det().unwrap(), 12.0);
//! assert_eq!(p.inverse().unwrap().kind(), Kind::LowerTriangular);
//!
//! let v = Vector::xyz(1.0_f64, 2.0, 2.0).unwrap();
//! assert_eq!(v.magnitude(), 3.0);
//! ```
//!
//! ## Modules
//!
//! - [`grid`] — `Grid<T>`, the validated row-major buffer behind every
//!   matrix, plus the structural [`grid::predicates`].
//!
//! - [`matrix`] — [`Matrix<T>`] tagged with a [`Kind`]: rectangular,
//!   square, diagonal, upper/lower triangular, identity or null. The
//!   result-kind tables live in [`matrix::closure`]; named matrices
//!   (Pascal, Hilbert, ...) in [`matrix::special`].
//!
//! - [`vector`] — [`Vector<T>`] of dimension ≥ 2: dot and cross products,
//!   projections, angles, parallel and orthogonal tests.
//!
//! - [`linalg`] — LU (Doolittle, no pivoting), Cholesky and LU with
//!   partial pivoting. Convenience methods on `Matrix`: `a.lu()`,
//!   `a.cholesky()`, `a.lup()`, `a.solve(&b)`.
//!
//! - [`rounding`] — half-up rounding to [`Decimals`] and the deferred
//!   `display(Decimals)` formatters.
//!
//! - [`traits`] — element trait hierarchy:
//!   - [`Scalar`] — `Copy + PartialEq + Debug + Zero + One + Num`
//!   - [`FloatScalar`] — real floats (`f32`, `f64`), the matrix element type
//!   - [`GridRef`] — read-only `(row, col)` access shared by grids and matrices
//!
//! ## Errors and logging
//!
//! Every fallible operation returns [`Result`] with the crate-wide
//! [`Error`]. Diagnostics go through the `log` facade under the
//! `strata::lu`, `strata::lup` and `strata::closure` targets; the crate
//! never installs a logger.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` |
//! | `libm`  | no      | Pure-Rust software float fallback for `no_std` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod grid;
pub mod linalg;
pub mod matrix;
pub mod rounding;
pub mod traits;
pub mod vector;

pub use error::{Error, Result};
pub use grid::Grid;
pub use linalg::{CholeskyDecomposition, Decompose, LuDecomposition, LupDecomposition};
pub use matrix::special::{PascalKind, ShiftKind};
pub use matrix::{Kind, Matrix};
pub use rounding::{AngleUnit, Decimals};
pub use traits::{FloatScalar, GridRef, Scalar};
pub use vector::Vector;
