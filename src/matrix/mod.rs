pub mod closure;
pub(crate) mod square;
pub mod special;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::grid::{self, predicates, Grid};
use crate::rounding::{self, Decimals, Rounded};
use crate::traits::{FloatScalar, GridRef};
use crate::vector::Vector;

/// Structural variant of a [`Matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `m != n`, no further constraint.
    Rectangular,
    /// `m == n`, no further constraint.
    Square,
    /// Square, zero off the main diagonal.
    Diagonal,
    /// Square, zero strictly below the main diagonal.
    UpperTriangular,
    /// Square, zero strictly above the main diagonal.
    LowerTriangular,
    /// Ones on the diagonal, zero elsewhere.
    Identity,
    /// All zero, any shape.
    Null,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Rectangular => "rectangular",
            Kind::Square => "square",
            Kind::Diagonal => "diagonal",
            Kind::UpperTriangular => "upper triangular",
            Kind::LowerTriangular => "lower triangular",
            Kind::Identity => "identity",
            Kind::Null => "null",
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Repr<T> {
    Rectangular(Grid<T>),
    Square(Grid<T>),
    Diagonal(Vec<T>),
    Upper(Grid<T>),
    Lower(Grid<T>),
    Identity(usize),
    Null(usize, usize),
}

/// Real matrix tagged with its structural variant.
///
/// Every constructor validates the claimed structure, and every operation
/// returns a fresh value whose [`Kind`] is chosen by the rules in
/// [`closure`]. Diagonal matrices store only their diagonal; identity and
/// null matrices store only their shape.
///
/// Equality compares shape and entries numerically, so a diagonal matrix of
/// ones equals the identity of the same size.
///
/// # Examples
///
/// ```
/// use strata::{Kind, Matrix};
///
/// let d = Matrix::diagonal(vec![2.0_f64, 3.0]).unwrap();
/// let u = Matrix::upper_triangular(&[[1.0, 4.0], [0.0, 5.0]]).unwrap();
///
/// let p = d.multiply(&u).unwrap();
/// assert_eq!(p.kind(), Kind::UpperTriangular);
/// assert_eq!(p.get(0, 1).unwrap(), 8.0);
/// ```
#[derive(Clone)]
pub struct Matrix<T> {
    pub(crate) repr: Repr<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// General matrix over an already validated grid: square or
    /// rectangular depending on its shape.
    pub fn new(grid: Grid<T>) -> Self {
        if grid.is_square() {
            Self::from_repr(Repr::Square(grid))
        } else {
            Self::from_repr(Repr::Rectangular(grid))
        }
    }

    /// General matrix from rows.
    ///
    /// ```
    /// use strata::{Kind, Matrix};
    /// let m = Matrix::from_rows(&[[1.0_f64, 2.0, 3.0]]).unwrap();
    /// assert_eq!(m.kind(), Kind::Rectangular);
    /// assert_eq!(m.size(), [1, 3]);
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        Grid::from_rows(rows).map(Self::new)
    }

    /// General square matrix.
    pub fn square<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        if !grid.is_square() {
            return Err(crate::error::not_square((grid.nrows(), grid.ncols())));
        }
        Ok(Self::from_repr(Repr::Square(grid)))
    }

    /// General rectangular matrix; square data is rejected.
    pub fn rectangular<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        if grid.is_square() {
            return Err(Error::StructuralViolation(Kind::Rectangular));
        }
        Ok(Self::from_repr(Repr::Rectangular(grid)))
    }

    /// Diagonal matrix from its diagonal entries.
    ///
    /// ```
    /// use strata::Matrix;
    /// let d = Matrix::diagonal(vec![1.0_f64, 2.0, 3.0]).unwrap();
    /// assert_eq!(d.size(), [3, 3]);
    /// assert_eq!(d.get(1, 0).unwrap(), 0.0);
    /// assert_eq!(d.det().unwrap(), 6.0);
    /// ```
    pub fn diagonal(entries: Vec<T>) -> Result<Self> {
        let n = entries.len();
        grid::check_shape(n, n)?;
        if let Some(i) = entries.iter().position(|x| !x.is_finite()) {
            return Err(Error::NullEntry { row: i, col: i });
        }
        Ok(Self::from_repr(Repr::Diagonal(entries)))
    }

    /// Diagonal matrix from a full grid. Off-diagonal entries must be zero.
    pub fn diagonal_from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        if !predicates::is_diagonal(&grid) {
            return Err(Error::StructuralViolation(Kind::Diagonal));
        }
        Ok(Self::from_repr(Repr::Diagonal(grid.diagonal())))
    }

    /// Upper-triangular matrix. Entries below the diagonal must be zero.
    pub fn upper_triangular<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        Self::upper_from_grid(Grid::from_rows(rows)?)
    }

    /// Upper-triangular matrix over a validated grid.
    pub fn upper_from_grid(grid: Grid<T>) -> Result<Self> {
        if !predicates::is_upper_triangular(&grid) {
            return Err(Error::StructuralViolation(Kind::UpperTriangular));
        }
        Ok(Self::from_repr(Repr::Upper(grid)))
    }

    /// Lower-triangular matrix. Entries above the diagonal must be zero.
    ///
    /// ```
    /// use strata::{Error, Kind, Matrix};
    /// assert!(Matrix::lower_triangular(&[[1.0_f64, 0.0], [2.0, 3.0]]).is_ok());
    /// assert_eq!(
    ///     Matrix::lower_triangular(&[[1.0_f64, 5.0], [2.0, 3.0]]).unwrap_err(),
    ///     Error::StructuralViolation(Kind::LowerTriangular),
    /// );
    /// ```
    pub fn lower_triangular<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        Self::lower_from_grid(Grid::from_rows(rows)?)
    }

    /// Lower-triangular matrix over a validated grid.
    pub fn lower_from_grid(grid: Grid<T>) -> Result<Self> {
        if !predicates::is_lower_triangular(&grid) {
            return Err(Error::StructuralViolation(Kind::LowerTriangular));
        }
        Ok(Self::from_repr(Repr::Lower(grid)))
    }

    /// `n × n` identity.
    pub fn identity(n: usize) -> Result<Self> {
        grid::check_shape(n, n)?;
        Ok(Self::from_repr(Repr::Identity(n)))
    }

    /// Identity from a full grid, verified entry by entry.
    pub fn identity_from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        if !predicates::is_identity(&grid) {
            return Err(Error::StructuralViolation(Kind::Identity));
        }
        Ok(Self::from_repr(Repr::Identity(grid.nrows())))
    }

    /// All-zero `nrows × ncols` matrix.
    pub fn null(nrows: usize, ncols: usize) -> Result<Self> {
        grid::check_shape(nrows, ncols)?;
        Ok(Self::from_repr(Repr::Null(nrows, ncols)))
    }

    /// Null matrix from a full grid, verified entry by entry.
    pub fn null_from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        if !predicates::is_null(&grid) {
            return Err(Error::StructuralViolation(Kind::Null));
        }
        Ok(Self::from_repr(Repr::Null(grid.nrows(), grid.ncols())))
    }

    /// The most specific variant `grid` satisfies, checked in the order
    /// null, identity, diagonal, upper, lower, then square or rectangular.
    ///
    /// ```
    /// use strata::{Grid, Kind, Matrix};
    /// let g = Grid::from_rows(&[[1.0_f64, 0.0], [7.0, 2.0]]).unwrap();
    /// assert_eq!(Matrix::classify(g).kind(), Kind::LowerTriangular);
    /// ```
    pub fn classify(grid: Grid<T>) -> Self {
        let repr = if predicates::is_null(&grid) {
            Repr::Null(grid.nrows(), grid.ncols())
        } else if predicates::is_identity(&grid) {
            Repr::Identity(grid.nrows())
        } else if predicates::is_diagonal(&grid) {
            Repr::Diagonal(grid.diagonal())
        } else if predicates::is_upper_triangular(&grid) {
            Repr::Upper(grid)
        } else if predicates::is_lower_triangular(&grid) {
            Repr::Lower(grid)
        } else {
            return Self::new(grid);
        };
        Self::from_repr(repr)
    }

    /// General matrix whose rows are `vectors`.
    pub fn from_vectors(vectors: &[Vector<T>]) -> Result<Self> {
        let rows: Vec<&[T]> = vectors.iter().map(|v| v.as_slice()).collect();
        Self::from_equal_vectors(&rows).map(Self::new)
    }

    /// General matrix whose columns are `vectors`.
    ///
    /// ```
    /// use strata::{Matrix, Vector};
    /// let a = Vector::xy(1.0_f64, 2.0).unwrap();
    /// let b = Vector::xy(3.0, 4.0).unwrap();
    /// let m = Matrix::from_columns(&[a, b]).unwrap();
    /// assert_eq!(m.row(0).unwrap(), vec![1.0, 3.0]);
    /// ```
    pub fn from_columns(vectors: &[Vector<T>]) -> Result<Self> {
        let rows: Vec<&[T]> = vectors.iter().map(|v| v.as_slice()).collect();
        Self::from_equal_vectors(&rows).map(|g| Self::new(g.transpose()))
    }

    fn from_equal_vectors(rows: &[&[T]]) -> Result<Grid<T>> {
        if let Some(first) = rows.first() {
            if let Some(bad) = rows.iter().find(|r| r.len() != first.len()) {
                return Err(crate::error::mismatch(
                    "from_vectors",
                    (1, first.len()),
                    (1, bad.len()),
                ));
            }
        }
        Grid::from_rows(rows)
    }
}

impl<T: FloatScalar> Matrix<T> {
    #[inline]
    pub(crate) fn from_repr(repr: Repr<T>) -> Self {
        Self { repr }
    }

    /// Wrap a grid that is known to satisfy `kind`.
    pub(crate) fn with_kind(kind: Kind, grid: Grid<T>) -> Self {
        let repr = match kind {
            Kind::Rectangular => Repr::Rectangular(grid),
            Kind::Square => Repr::Square(grid),
            Kind::Diagonal => Repr::Diagonal(grid.diagonal()),
            Kind::UpperTriangular => Repr::Upper(grid),
            Kind::LowerTriangular => Repr::Lower(grid),
            Kind::Identity => Repr::Identity(grid.nrows()),
            Kind::Null => Repr::Null(grid.nrows(), grid.ncols()),
        };
        Self::from_repr(repr)
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Structural variant.
    pub fn kind(&self) -> Kind {
        match self.repr {
            Repr::Rectangular(_) => Kind::Rectangular,
            Repr::Square(_) => Kind::Square,
            Repr::Diagonal(_) => Kind::Diagonal,
            Repr::Upper(_) => Kind::UpperTriangular,
            Repr::Lower(_) => Kind::LowerTriangular,
            Repr::Identity(_) => Kind::Identity,
            Repr::Null(..) => Kind::Null,
        }
    }

    /// `[rows, columns]`.
    pub fn size(&self) -> [usize; 2] {
        match &self.repr {
            Repr::Rectangular(g) | Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => g.size(),
            Repr::Diagonal(d) => [d.len(), d.len()],
            Repr::Identity(n) => [*n, *n],
            Repr::Null(r, c) => [*r, *c],
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.size()[0]
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.size()[1]
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        let [r, c] = self.size();
        r == c
    }

    /// A single row with more than one column.
    pub fn is_row_vector(&self) -> bool {
        let [r, c] = self.size();
        r == 1 && c > 1
    }

    /// A single column with more than one row.
    pub fn is_column_vector(&self) -> bool {
        let [r, c] = self.size();
        c == 1 && r > 1
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        let [r, c] = self.size();
        if row >= r {
            return Err(Error::RowOutOfBounds { row, rows: r });
        }
        if col >= c {
            return Err(Error::ColumnOutOfBounds { col, cols: c });
        }
        Ok(self.entry(row, col))
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vec<T>> {
        let [r, c] = self.size();
        if i >= r {
            return Err(Error::RowOutOfBounds { row: i, rows: r });
        }
        Ok((0..c).map(|j| self.entry(i, j)).collect())
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        let [r, c] = self.size();
        if j >= c {
            return Err(Error::ColumnOutOfBounds { col: j, cols: c });
        }
        Ok((0..r).map(|i| self.entry(i, j)).collect())
    }

    /// All rows, zeros materialized.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.dense().to_rows()
    }

    /// Dense copy of the entries.
    pub fn to_grid(&self) -> Grid<T> {
        self.dense().into_owned()
    }

    /// Main-diagonal entries (`min(rows, cols)` of them).
    pub fn main_diagonal(&self) -> Vec<T> {
        match &self.repr {
            Repr::Diagonal(d) => d.clone(),
            Repr::Identity(n) => alloc::vec![T::one(); *n],
            Repr::Null(r, c) => alloc::vec![T::zero(); (*r).min(*c)],
            Repr::Rectangular(g) | Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => {
                g.diagonal()
            }
        }
    }

    pub(crate) fn entry(&self, row: usize, col: usize) -> T {
        match &self.repr {
            Repr::Rectangular(g) | Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => {
                g[(row, col)]
            }
            Repr::Diagonal(d) if row == col => d[row],
            Repr::Identity(_) if row == col => T::one(),
            Repr::Diagonal(_) | Repr::Identity(_) | Repr::Null(..) => T::zero(),
        }
    }

    /// Borrow the backing grid, materializing compact variants.
    pub(crate) fn dense(&self) -> Cow<'_, Grid<T>> {
        match &self.repr {
            Repr::Rectangular(g) | Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => {
                Cow::Borrowed(g)
            }
            Repr::Diagonal(d) => Cow::Owned(Grid::from_diagonal(d)),
            Repr::Identity(n) => Cow::Owned(Grid::from_diagonal(&alloc::vec![T::one(); *n])),
            Repr::Null(r, c) => Cow::Owned(Grid::zeros(*r, *c)),
        }
    }

    pub(crate) fn require_square(&self) -> Result<usize> {
        let [r, c] = self.size();
        if r != c {
            return Err(crate::error::not_square((r, c)));
        }
        Ok(r)
    }
}

impl<T: FloatScalar> GridRef<T> for Matrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        Matrix::nrows(self)
    }

    #[inline]
    fn ncols(&self) -> usize {
        Matrix::ncols(self)
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        self.entry(row, col)
    }
}

// ── Structural predicates ───────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// O(1) for diagonal, identity and null matrices; a scan otherwise.
    pub fn is_symmetric(&self) -> bool {
        match &self.repr {
            Repr::Diagonal(_) | Repr::Identity(_) => true,
            Repr::Null(r, c) => r == c,
            Repr::Rectangular(_) => false,
            Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => predicates::is_symmetric(g),
        }
    }

    pub fn is_diagonal(&self) -> bool {
        match &self.repr {
            Repr::Diagonal(_) | Repr::Identity(_) => true,
            Repr::Null(r, c) => r == c,
            Repr::Rectangular(_) => false,
            Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => predicates::is_diagonal(g),
        }
    }

    pub fn is_identity(&self) -> bool {
        match &self.repr {
            Repr::Identity(_) => true,
            Repr::Diagonal(d) => d.iter().all(|&x| x == T::one()),
            Repr::Null(..) | Repr::Rectangular(_) => false,
            Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => predicates::is_identity(g),
        }
    }

    pub fn is_upper_triangular(&self) -> bool {
        match &self.repr {
            Repr::Upper(_) | Repr::Diagonal(_) | Repr::Identity(_) => true,
            Repr::Null(r, c) => r == c,
            Repr::Rectangular(_) => false,
            Repr::Square(g) | Repr::Lower(g) => predicates::is_upper_triangular(g),
        }
    }

    pub fn is_lower_triangular(&self) -> bool {
        match &self.repr {
            Repr::Lower(_) | Repr::Diagonal(_) | Repr::Identity(_) => true,
            Repr::Null(r, c) => r == c,
            Repr::Rectangular(_) => false,
            Repr::Square(g) | Repr::Upper(g) => predicates::is_lower_triangular(g),
        }
    }

    pub fn is_null(&self) -> bool {
        match &self.repr {
            Repr::Null(..) => true,
            Repr::Identity(_) => false,
            Repr::Diagonal(d) => d.iter().all(|x| x.is_zero()),
            Repr::Rectangular(g) | Repr::Square(g) | Repr::Upper(g) | Repr::Lower(g) => {
                predicates::is_null(g)
            }
        }
    }
}

// ── Equality and hashing ────────────────────────────────────────────

impl<T: FloatScalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        let [r, c] = self.size();
        if other.size() != [r, c] {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Identity(_), Repr::Identity(_)) | (Repr::Null(..), Repr::Null(..)) => true,
            (Repr::Diagonal(a), Repr::Diagonal(b)) => a == b,
            _ => (0..r).all(|i| (0..c).all(|j| self.entry(i, j) == other.entry(i, j))),
        }
    }
}

// Entries are always finite, so numeric equality is reflexive.
impl<T: FloatScalar> Eq for Matrix<T> {}

impl<T: FloatScalar> Hash for Matrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let [r, c] = self.size();
        r.hash(state);
        c.hash(state);
        for i in 0..r {
            for j in 0..c {
                self.entry(i, j).canonical().integer_decode().hash(state);
            }
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Deferred formatter with a chosen number of decimals.
    ///
    /// ```
    /// use strata::{Decimals, Matrix};
    /// let m = Matrix::from_rows(&[[1.0_f64, -2.5], [10.0, 0.125]]).unwrap();
    /// assert_eq!(m.display(Decimals::Two).to_string(), "| 1.00  -2.50|\n|10.00   0.13|");
    /// ```
    pub fn display(&self, decimals: Decimals) -> Rounded<'_, Self> {
        Rounded::new(self, decimals)
    }
}

impl<T: FloatScalar> fmt::Display for Rounded<'_, Matrix<T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [nrows, ncols] = self.value.size();
        let cells: Vec<Vec<String>> = (0..nrows)
            .map(|i| {
                (0..ncols)
                    .map(|j| rounding::format_entry(self.value.entry(i, j), self.decimals))
                    .collect()
            })
            .collect();

        // Right-align each column to its widest entry.
        let widths: Vec<usize> = (0..ncols)
            .map(|j| cells.iter().map(|row| row[j].len()).max().unwrap_or(0))
            .collect();

        for (i, row) in cells.iter().enumerate() {
            write!(f, "|")?;
            for (j, (cell, &w)) in row.iter().zip(widths.iter()).enumerate() {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", cell, width = w)?;
            }
            write!(f, "|")?;
            if i + 1 < nrows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Four decimals, rows as `|a  b|`.
impl<T: FloatScalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Decimals::default()), f)
    }
}

impl<T: FloatScalar> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("kind", &self.kind())
            .field("rows", &self.to_rows())
            .finish()
    }
}
