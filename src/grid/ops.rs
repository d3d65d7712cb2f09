use alloc::vec;

use crate::traits::Scalar;

use super::Grid;

// ── Element-wise kernels ────────────────────────────────────────────

impl<T: Copy> Grid<T> {
    /// Apply `f` to every entry.
    pub(crate) fn map(&self, f: impl Fn(T) -> T) -> Self {
        Grid {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Combine two grids of identical shape entry by entry.
    pub(crate) fn zip_map(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        debug_assert_eq!(self.size(), rhs.size());
        Grid {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        Grid::build(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Swap two rows in place.
    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }
}

// ── Multiply-accumulate ─────────────────────────────────────────────

impl<T: Scalar> Grid<T> {
    /// Dense `self * rhs`. Callers check `self.ncols == rhs.nrows`.
    pub(crate) fn matmul(&self, rhs: &Self) -> Self {
        self.matmul_in(rhs, |_, _| 0..self.ncols)
    }

    /// `self * rhs` for two upper-triangular grids: only `i <= k <= j`
    /// contributes.
    pub(crate) fn matmul_upper(&self, rhs: &Self) -> Self {
        self.matmul_in(rhs, |i, j| if i <= j { i..j + 1 } else { 0..0 })
    }

    /// `self * rhs` for two lower-triangular grids: only `j <= k <= i`
    /// contributes.
    pub(crate) fn matmul_lower(&self, rhs: &Self) -> Self {
        self.matmul_in(rhs, |i, j| if j <= i { j..i + 1 } else { 0..0 })
    }

    fn matmul_in(
        &self,
        rhs: &Self,
        range: impl Fn(usize, usize) -> core::ops::Range<usize>,
    ) -> Self {
        debug_assert_eq!(self.ncols, rhs.nrows);
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        for i in 0..m {
            for j in 0..p {
                let mut acc = T::zero();
                for k in range(i, j) {
                    acc = acc + self.data[i * n + k] * rhs.data[k * p + j];
                }
                data[i * p + j] = acc;
            }
        }
        Grid {
            data,
            nrows: m,
            ncols: p,
        }
    }

    /// `diag(d) * self`: scale row `i` by `d[i]`.
    pub(crate) fn scale_rows(&self, d: &[T]) -> Self {
        debug_assert_eq!(d.len(), self.nrows);
        Grid::build(self.nrows, self.ncols, |i, j| d[i] * self[(i, j)])
    }

    /// `self * diag(d)`: scale column `j` by `d[j]`.
    pub(crate) fn scale_cols(&self, d: &[T]) -> Self {
        debug_assert_eq!(d.len(), self.ncols);
        Grid::build(self.nrows, self.ncols, |i, j| self[(i, j)] * d[j])
    }

    /// Main-diagonal entries of a square grid.
    pub(crate) fn diagonal(&self) -> alloc::vec::Vec<T> {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }
}
