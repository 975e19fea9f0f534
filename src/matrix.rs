use crate::array::FixedArray;
use crate::dimension::{flat_offset, row_offset, size_of_shape, Axis};
use crate::error::{GError, GResult, ShapeErrorKind};
use crate::view::{RowView, RowViewMut, Rows, RowsMut};
use num_traits::Zero;
use std::fmt;
use std::mem::MaybeUninit;
use std::ops::{Index, IndexMut};
use std::slice;

/// A row-major 2D matrix over a single [`FixedArray`].
///
/// Element `(row, col)` lives at offset `row * columns + col` of the
/// backing array. The shape is fixed at construction.
///
/// ```
/// use fixgrid::mat;
///
/// let m = mat![[1, 2], [3, 4], [5, 6]];
/// assert_eq!((m.rows(), m.columns()), (3, 2));
/// assert_eq!(m.at(1, 1), Ok(&4));
/// assert_eq!(m[2][0], 5);
/// assert_eq!(m.row(2)[0], 5);
/// ```
pub struct Matrix<A> {
    rows: usize,
    columns: usize,
    data: FixedArray<A>,
}

impl<A> Matrix<A> {
    /// Allocate a `rows` x `columns` matrix without initialising it.
    ///
    /// **Panics** if `rows * columns` overflows.
    pub fn uninit(rows: usize, columns: usize) -> Matrix<MaybeUninit<A>> {
        Matrix {
            rows,
            columns,
            data: FixedArray::uninit(size_of_shape(rows, columns)),
        }
    }

    /// Create a `rows` x `columns` matrix of `A::default()`.
    ///
    /// Zero rows or zero columns give an empty matrix.
    pub fn new(rows: usize, columns: usize) -> Self
    where
        A: Default,
    {
        Self::from_fn(rows, columns, |_, _| A::default())
    }

    /// Create a `rows` x `columns` matrix of zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self
    where
        A: Zero,
    {
        Self::from_fn(rows, columns, |_, _| A::zero())
    }

    /// Create a `rows` x `columns` matrix filled with clones of `elem`.
    pub fn from_elem(rows: usize, columns: usize, elem: A) -> Self
    where
        A: Clone,
    {
        Matrix {
            rows,
            columns,
            data: FixedArray::from_elem(size_of_shape(rows, columns), elem),
        }
    }

    /// Create a matrix where element `(row, col)` is `f(row, col)`,
    /// filled in row-major order.
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> A,
    {
        let size = size_of_shape(rows, columns);
        Matrix {
            rows,
            columns,
            data: FixedArray::from_fn(size, |i| f(i / columns, i % columns)),
        }
    }

    /// Copy a fixed-shape 2D array in row-major order: the outer index is
    /// the row and the inner index the column.
    pub fn from_array<const R: usize, const C: usize>(xs: [[A; C]; R]) -> Self {
        let v: Vec<A> = xs.into_iter().flatten().collect();
        Matrix {
            rows: R,
            columns: C,
            data: FixedArray::from_vec(v),
        }
    }

    /// Use `v` as the row-major elements of a `rows` x `columns` matrix.
    ///
    /// **Errors** if `v.len() != rows * columns`.
    pub fn from_shape_vec(rows: usize, columns: usize, v: Vec<A>) -> GResult<Self> {
        Self::from_storage(rows, columns, FixedArray::from_vec(v))
    }

    /// Build a matrix from runtime-sized rows.
    ///
    /// **Errors** if the rows are not all the same length.
    pub fn from_rows(xs: Vec<Vec<A>>) -> GResult<Self> {
        let rows = xs.len();
        let columns = xs.first().map_or(0, |r| r.len());
        if let Some((row, got)) = xs
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != columns)
        {
            return Err(ShapeErrorKind::RaggedRows {
                row,
                expected: columns,
                got,
            }
            .into());
        }
        let v: Vec<A> = xs.into_iter().flatten().collect();
        Self::from_shape_vec(rows, columns, v)
    }

    /// Wrap an existing array as the row-major storage of a `rows` x
    /// `columns` matrix, without copying.
    ///
    /// **Errors** if `data.len() != rows * columns`.
    pub fn from_storage(rows: usize, columns: usize, data: FixedArray<A>) -> GResult<Self> {
        let expected = size_of_shape(rows, columns);
        if data.len() != expected {
            return Err(ShapeErrorKind::IncompatibleShape {
                expected,
                got: data.len(),
            }
            .into());
        }
        Ok(Matrix {
            rows,
            columns,
            data,
        })
    }

    pub fn storage(&self) -> &FixedArray<A> {
        &self.data
    }

    /// Return the backing array, in row-major order.
    pub fn into_storage(self) -> FixedArray<A> {
        self.data
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of elements, `rows * columns`.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn as_ptr(&self) -> *const A {
        self.data.as_ptr()
    }

    pub fn as_slice(&self) -> &[A] {
        self.data.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [A] {
        self.data.as_mut_slice()
    }

    #[inline]
    fn check_row(&self, row: usize) -> GResult<()> {
        if row >= self.rows {
            return Err(GError::AxisOutOfRange {
                axis: Axis::Row,
                index: row,
                bound: self.rows,
            });
        }
        Ok(())
    }

    // row first, then column
    #[inline]
    fn check_index(&self, row: usize, col: usize) -> GResult<usize> {
        self.check_row(row)?;
        if col >= self.columns {
            return Err(GError::AxisOutOfRange {
                axis: Axis::Column,
                index: col,
                bound: self.columns,
            });
        }
        Ok(flat_offset(self.columns, row, col))
    }

    /// Return a view of row `row`.
    ///
    /// **Panics** if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> RowView<'_, A> {
        if let Err(e) = self.check_row(row) {
            panic!("{}", e);
        }
        unsafe { self.row_unchecked(row) }
    }

    /// Return a mutable view of row `row`.
    ///
    /// **Panics** if `row >= self.rows()`.
    pub fn row_mut(&mut self, row: usize) -> RowViewMut<'_, A> {
        if let Err(e) = self.check_row(row) {
            panic!("{}", e);
        }
        unsafe { self.row_unchecked_mut(row) }
    }

    /// Return a view of row `row` without bounds checking.
    ///
    /// ## Safety
    ///
    /// `row < self.rows()`
    #[inline]
    pub unsafe fn row_unchecked(&self, row: usize) -> RowView<'_, A> {
        debug_assert!(row < self.rows, "row {} out of bounds {}", row, self.rows);
        RowView::new(
            self.data.as_ptr().add(row_offset(self.columns, row)),
            self.columns,
        )
    }

    /// ## Safety
    ///
    /// `row < self.rows()`
    #[inline]
    pub unsafe fn row_unchecked_mut(&mut self, row: usize) -> RowViewMut<'_, A> {
        debug_assert!(row < self.rows, "row {} out of bounds {}", row, self.rows);
        let columns = self.columns;
        RowViewMut::new(
            self.data.as_mut_ptr().add(row_offset(columns, row)),
            columns,
        )
    }

    /// Return the element at `(row, col)`, or [`GError::AxisOutOfRange`]
    /// naming the first axis that is out of bounds.
    pub fn at(&self, row: usize, col: usize) -> GResult<&A> {
        let offset = self.check_index(row, col)?;
        Ok(unsafe { self.data.uget(offset) })
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> GResult<&mut A> {
        let offset = self.check_index(row, col)?;
        Ok(unsafe { self.data.uget_mut(offset) })
    }

    /// Perform *unchecked* indexing.
    ///
    /// ## Safety
    ///
    /// `row < self.rows()` and `col < self.columns()`.
    #[inline]
    pub unsafe fn uget(&self, (row, col): (usize, usize)) -> &A {
        debug_assert!(row < self.rows && col < self.columns);
        self.data.uget(flat_offset(self.columns, row, col))
    }

    /// ## Safety
    ///
    /// `row < self.rows()` and `col < self.columns()`.
    #[inline]
    pub unsafe fn uget_mut(&mut self, (row, col): (usize, usize)) -> &mut A {
        debug_assert!(row < self.rows && col < self.columns);
        let offset = flat_offset(self.columns, row, col);
        self.data.uget_mut(offset)
    }

    pub fn fill(&mut self, elem: A)
    where
        A: Clone,
    {
        self.data.fill(elem);
    }

    /// Iterate over all elements in row-major order.
    pub fn iter(&self) -> slice::Iter<'_, A> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, A> {
        self.data.iter_mut()
    }

    pub fn row_iter(&self) -> Rows<'_, A> {
        unsafe { Rows::new(self.data.as_ptr(), self.rows, self.columns) }
    }

    pub fn row_iter_mut(&mut self) -> RowsMut<'_, A> {
        let (rows, columns) = (self.rows, self.columns);
        unsafe { RowsMut::new(self.data.as_mut_ptr(), rows, columns) }
    }
}

impl<A> Matrix<MaybeUninit<A>> {
    /// ## Safety
    ///
    /// Every element must have been written.
    pub unsafe fn assume_init(self) -> Matrix<A> {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.assume_init(),
        }
    }
}

impl<A: Clone> Clone for Matrix<A> {
    fn clone(&self) -> Self {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.clone(),
        }
    }

    /// Reuses the existing storage when the element counts match.
    fn clone_from(&mut self, other: &Self) {
        // storage first: the shape changes only once the copy succeeded
        self.data.clone_from(&other.data);
        self.rows = other.rows;
        self.columns = other.columns;
    }
}

impl<A> Default for Matrix<A> {
    fn default() -> Self {
        Matrix {
            rows: 0,
            columns: 0,
            data: FixedArray::default(),
        }
    }
}

impl<A: PartialEq> PartialEq for Matrix<A> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl<A: Eq> Eq for Matrix<A> {}

impl<A, const R: usize, const C: usize> From<[[A; C]; R]> for Matrix<A> {
    fn from(xs: [[A; C]; R]) -> Self {
        Self::from_array(xs)
    }
}

impl<A> Index<usize> for Matrix<A> {
    type Output = [A];

    /// `m[row]` is the row as a slice, so `m[row][col]` reads one element.
    ///
    /// **Panics** if `row` is out of bounds.
    #[inline]
    fn index(&self, row: usize) -> &[A] {
        self.row(row).as_slice()
    }
}

impl<A> IndexMut<usize> for Matrix<A> {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut [A] {
        self.row_mut(row).into_slice()
    }
}

impl<A> Index<(usize, usize)> for Matrix<A> {
    type Output = A;

    /// **Panics** if either index is out of bounds.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &A {
        match self.at(row, col) {
            Ok(elem) => elem,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> IndexMut<(usize, usize)> for Matrix<A> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut A {
        match self.at_mut(row, col) {
            Ok(elem) => elem,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, A> IntoIterator for &'a Matrix<A> {
    type Item = &'a A;
    type IntoIter = slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A> IntoIterator for &'a mut Matrix<A> {
    type Item = &'a mut A;
    type IntoIter = slice::IterMut<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<A: fmt::Debug> fmt::Debug for Matrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_matrix(self, f)?;
        write!(f, ", shape=[{}, {}]", self.rows, self.columns)
    }
}

fn format_matrix<A: fmt::Debug>(m: &Matrix<A>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, row) in m.row_iter().enumerate() {
        if i > 0 {
            f.write_str(",\n ")?;
        }
        f.write_str("[")?;
        for (j, elem) in row.iter().enumerate() {
            if j > 0 {
                f.write_str(", ")?;
            }
            fmt::Debug::fmt(elem, f)?;
        }
        f.write_str("]")?;
    }
    f.write_str("]")
}
