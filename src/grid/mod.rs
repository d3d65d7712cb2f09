mod ops;
pub mod predicates;

use alloc::vec::Vec;
use core::ops::Index;

use crate::error::{Error, Result};
use crate::traits::{FloatScalar, GridRef, Scalar};

/// Dense, row-major buffer of real numbers with a validated shape.
///
/// The storage substrate behind every non-compact matrix variant. A grid
/// always has at least one row and one column and never contains an
/// undefined (`NaN`) or infinite entry; both are checked by every public
/// constructor.
/// Grids are immutable once built: all producing operations allocate.
///
/// # Examples
///
/// ```
/// use strata::Grid;
///
/// let g = Grid::from_rows(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(g.size(), [2, 3]);
/// assert_eq!(g[(1, 0)], 4.0);
/// assert_eq!(g.column(2).unwrap(), vec![3.0, 6.0]);
/// ```
///
/// Entries are read-only from outside the crate:
///
/// ```compile_fail
/// use strata::Grid;
///
/// let mut g = Grid::from_rows(&[[1.0_f64, 2.0]]).unwrap();
/// g[(0, 0)] = f64::NAN;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: FloatScalar> Grid<T> {
    /// Build a grid from a row-major buffer.
    ///
    /// ```
    /// use strata::{Error, Grid};
    /// let g = Grid::new(2, 2, vec![1.0_f64, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(g[(0, 1)], 2.0);
    ///
    /// let err = Grid::new(0, 2, Vec::<f64>::new()).unwrap_err();
    /// assert_eq!(err, Error::InvalidDimension { rows: 0, cols: 2 });
    /// ```
    pub fn new(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        check_shape(nrows, ncols)?;
        if data.len() != nrows * ncols {
            return Err(Error::InvalidParameter(
                "buffer length does not match the requested shape",
            ));
        }
        let grid = Self { data, nrows, ncols };
        grid.check_entries()?;
        Ok(grid)
    }

    /// Build a grid from rows of equal length.
    ///
    /// Rows of unequal length raise [`Error::RaggedRows`].
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        check_shape(nrows, ncols)?;

        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::RaggedRows {
                    row: i,
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        let grid = Self { data, nrows, ncols };
        grid.check_entries()?;
        Ok(grid)
    }

    /// Build a grid by calling `f(row, col)` for each entry.
    ///
    /// ```
    /// use strata::Grid;
    /// let g = Grid::from_fn(2, 2, |i, j| (i * 2 + j) as f64).unwrap();
    /// assert_eq!(g[(1, 1)], 3.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Result<Self> {
        check_shape(nrows, ncols)?;
        let grid = Self::build(nrows, ncols, f);
        grid.check_entries()?;
        Ok(grid)
    }

    fn check_entries(&self) -> Result<()> {
        match self.data.iter().position(|x| !x.is_finite()) {
            Some(k) => Err(Error::NullEntry {
                row: k / self.ncols,
                col: k % self.ncols,
            }),
            None => Ok(()),
        }
    }
}

impl<T: Scalar> Grid<T> {
    /// All-zero grid. Callers guarantee a valid shape.
    pub(crate) fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: alloc::vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Square grid with `diag` on the main diagonal.
    pub(crate) fn from_diagonal(diag: &[T]) -> Self {
        let n = diag.len();
        let mut g = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            g.set((i, i), d);
        }
        g
    }
}

impl<T> Grid<T> {
    /// Unchecked builder for results of operations on validated grids.
    pub(crate) fn build(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `[rows, columns]`.
    #[inline]
    pub fn size(&self) -> [usize; 2] {
        [self.nrows, self.ncols]
    }

    /// Whether the grid is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Row-major view of all entries.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Borrow row `i`.
    pub fn row(&self, i: usize) -> Result<&[T]> {
        if i >= self.nrows {
            return Err(Error::RowOutOfBounds {
                row: i,
                rows: self.nrows,
            });
        }
        Ok(self.row_slice(i))
    }

    #[inline]
    pub(crate) fn row_slice(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }
}

impl<T: Copy> Grid<T> {
    /// Copy out column `j`.
    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        if j >= self.ncols {
            return Err(Error::ColumnOutOfBounds {
                col: j,
                cols: self.ncols,
            });
        }
        Ok((0..self.nrows).map(|i| self[(i, j)]).collect())
    }

    /// Copy out all rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.ncols).map(|r| r.to_vec()).collect()
    }
}

pub(crate) fn check_shape(nrows: usize, ncols: usize) -> Result<()> {
    if nrows == 0 || ncols == 0 {
        return Err(Error::InvalidDimension {
            rows: nrows,
            cols: ncols,
        });
    }
    Ok(())
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.ncols + col]
    }
}

impl<T> Grid<T> {
    /// Overwrite one entry. Crate-internal so that a grid handed to a
    /// caller can never regain an undefined entry.
    #[inline]
    pub(crate) fn set(&mut self, (row, col): (usize, usize), value: T) {
        self.data[row * self.ncols + col] = value;
    }
}

impl<T: Copy> GridRef<T> for Grid<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}
