use crate::dimension::{row_offset, Axis};
use crate::error::{GError, GResult};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::slice;

/// A read-only view of one matrix row.
///
/// The view borrows the matrix for `'a`; it owns nothing and cannot
/// outlive the matrix it came from.
pub struct RowView<'a, A> {
    ptr: NonNull<A>,
    len: usize,
    life: PhantomData<&'a A>,
}

/// A mutable view of one matrix row.
pub struct RowViewMut<'a, A> {
    ptr: NonNull<A>,
    len: usize,
    life: PhantomData<&'a mut A>,
}

#[inline]
fn check_column(index: usize, len: usize) -> GResult<()> {
    if index >= len {
        return Err(GError::AxisOutOfRange {
            axis: Axis::Column,
            index,
            bound: len,
        });
    }
    Ok(())
}

impl<'a, A> RowView<'a, A> {
    /// ## Safety
    ///
    /// `ptr` must be valid for reads of `len` elements for `'a`, and
    /// nothing may write them during `'a`.
    #[inline]
    pub(crate) unsafe fn new(ptr: *const A, len: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr as *mut A),
            len,
            life: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &'a [A] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr() as *const A, self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'a, A> {
        self.as_slice().iter()
    }

    /// Return the element in column `index`, or
    /// [`GError::AxisOutOfRange`] when `index >= self.len()`.
    pub fn at(&self, index: usize) -> GResult<&'a A> {
        check_column(index, self.len)?;
        Ok(unsafe { self.uget(index) })
    }

    /// ## Safety
    ///
    /// `index < self.len()`
    #[inline]
    pub unsafe fn uget(&self, index: usize) -> &'a A {
        debug_assert!(index < self.len, "column {} out of bounds {}", index, self.len);
        &*self.ptr.as_ptr().add(index)
    }
}

impl<'a, A> RowViewMut<'a, A> {
    /// ## Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` elements for
    /// `'a`, and nothing else may access them during `'a`.
    #[inline]
    pub(crate) unsafe fn new(ptr: *mut A, len: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr),
            len,
            life: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[A] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr() as *const A, self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [A] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Convert into a slice borrowing the matrix for the full `'a`.
    pub fn into_slice(self) -> &'a mut [A] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'_, A> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, A> {
        self.as_mut_slice().iter_mut()
    }

    pub fn at(&self, index: usize) -> GResult<&A> {
        check_column(index, self.len)?;
        Ok(unsafe { self.uget(index) })
    }

    pub fn at_mut(&mut self, index: usize) -> GResult<&mut A> {
        check_column(index, self.len)?;
        Ok(unsafe { self.uget_mut(index) })
    }

    /// ## Safety
    ///
    /// `index < self.len()`
    #[inline]
    pub unsafe fn uget(&self, index: usize) -> &A {
        debug_assert!(index < self.len, "column {} out of bounds {}", index, self.len);
        &*self.ptr.as_ptr().add(index)
    }

    /// ## Safety
    ///
    /// `index < self.len()`
    #[inline]
    pub unsafe fn uget_mut(&mut self, index: usize) -> &mut A {
        debug_assert!(index < self.len, "column {} out of bounds {}", index, self.len);
        &mut *self.ptr.as_ptr().add(index)
    }

    pub fn fill(&mut self, elem: A)
    where
        A: Clone,
    {
        self.as_mut_slice().fill(elem);
    }

    /// A shorter-lived mutable view of the same row.
    pub fn reborrow(&mut self) -> RowViewMut<'_, A> {
        unsafe { RowViewMut::new(self.ptr.as_ptr(), self.len) }
    }

    pub fn into_view(self) -> RowView<'a, A> {
        unsafe { RowView::new(self.ptr.as_ptr(), self.len) }
    }
}

impl<A> Clone for RowView<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for RowView<'_, A> {}

impl<A> Index<usize> for RowView<'_, A> {
    type Output = A;

    #[inline]
    fn index(&self, index: usize) -> &A {
        match self.at(index) {
            Ok(elem) => elem,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> Index<usize> for RowViewMut<'_, A> {
    type Output = A;

    #[inline]
    fn index(&self, index: usize) -> &A {
        match self.at(index) {
            Ok(elem) => elem,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> IndexMut<usize> for RowViewMut<'_, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut A {
        match self.at_mut(index) {
            Ok(elem) => elem,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, A> IntoIterator for RowView<'a, A> {
    type Item = &'a A;
    type IntoIter = slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A> IntoIterator for RowViewMut<'a, A> {
    type Item = &'a mut A;
    type IntoIter = slice::IterMut<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter_mut()
    }
}

impl<A: fmt::Debug> fmt::Debug for RowView<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<A: fmt::Debug> fmt::Debug for RowViewMut<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Views alias the matrix like `&[A]` / `&mut [A]` would.
unsafe impl<A: Sync> Send for RowView<'_, A> {}
unsafe impl<A: Sync> Sync for RowView<'_, A> {}
unsafe impl<A: Send> Send for RowViewMut<'_, A> {}
unsafe impl<A: Sync> Sync for RowViewMut<'_, A> {}

/// Iterator over the rows of a matrix, yielding [`RowView`]s.
pub struct Rows<'a, A> {
    ptr: NonNull<A>,
    columns: usize,
    index: usize,
    end: usize,
    life: PhantomData<&'a A>,
}

/// Iterator over the rows of a matrix, yielding [`RowViewMut`]s.
pub struct RowsMut<'a, A> {
    ptr: NonNull<A>,
    columns: usize,
    index: usize,
    end: usize,
    life: PhantomData<&'a mut A>,
}

impl<'a, A> Rows<'a, A> {
    /// ## Safety
    ///
    /// `ptr` must be valid for reads of `rows * columns` elements for `'a`.
    pub(crate) unsafe fn new(ptr: *const A, rows: usize, columns: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr as *mut A),
            columns,
            index: 0,
            end: rows,
            life: PhantomData,
        }
    }
}

impl<'a, A> RowsMut<'a, A> {
    /// ## Safety
    ///
    /// `ptr` must be valid for reads and writes of `rows * columns`
    /// elements for `'a`, with no other access during `'a`.
    pub(crate) unsafe fn new(ptr: *mut A, rows: usize, columns: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr),
            columns,
            index: 0,
            end: rows,
            life: PhantomData,
        }
    }
}

impl<'a, A> Iterator for Rows<'a, A> {
    type Item = RowView<'a, A>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        let offset = row_offset(self.columns, self.index);
        self.index += 1;
        unsafe { Some(RowView::new(self.ptr.as_ptr().add(offset), self.columns)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.index;
        (len, Some(len))
    }
}

impl<A> DoubleEndedIterator for Rows<'_, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        self.end -= 1;
        let offset = row_offset(self.columns, self.end);
        unsafe { Some(RowView::new(self.ptr.as_ptr().add(offset), self.columns)) }
    }
}

impl<A> ExactSizeIterator for Rows<'_, A> {}
impl<A> FusedIterator for Rows<'_, A> {}

impl<A> Clone for Rows<'_, A> {
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            columns: self.columns,
            index: self.index,
            end: self.end,
            life: PhantomData,
        }
    }
}

impl<'a, A> Iterator for RowsMut<'a, A> {
    type Item = RowViewMut<'a, A>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        let offset = row_offset(self.columns, self.index);
        self.index += 1;
        // rows never overlap, so handing each out as `&'a mut` is sound
        unsafe { Some(RowViewMut::new(self.ptr.as_ptr().add(offset), self.columns)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.index;
        (len, Some(len))
    }
}

impl<A> DoubleEndedIterator for RowsMut<'_, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        self.end -= 1;
        let offset = row_offset(self.columns, self.end);
        unsafe { Some(RowViewMut::new(self.ptr.as_ptr().add(offset), self.columns)) }
    }
}

impl<A> ExactSizeIterator for RowsMut<'_, A> {}
impl<A> FusedIterator for RowsMut<'_, A> {}

unsafe impl<A: Sync> Send for Rows<'_, A> {}
unsafe impl<A: Sync> Sync for Rows<'_, A> {}
unsafe impl<A: Send> Send for RowsMut<'_, A> {}
unsafe impl<A: Sync> Sync for RowsMut<'_, A> {}
