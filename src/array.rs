use crate::error::{GError, GResult};
use crate::raw::RawBuf;
use num_traits::Zero;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::MaybeUninit;
use std::ops::{Index, IndexMut};
use std::slice;

/// A contiguous heap array whose length is fixed at construction.
///
/// `FixedArray` has value semantics: `clone` makes an independent deep
/// copy, a Rust move transfers the buffer in O(1), and [`take`] moves the
/// contents out while leaving the source as an empty array.
///
/// [`take`]: FixedArray::take
pub struct FixedArray<A> {
    data: RawBuf<A>,
}

impl<A> FixedArray<A> {
    /// Allocate `len` slots without initialising them.
    ///
    /// Each slot holds an unspecified value until written; call
    /// [`assume_init`](FixedArray::assume_init) once every slot is set.
    ///
    /// ```
    /// use fixgrid::FixedArray;
    ///
    /// let mut a = FixedArray::<u32>::uninit(3);
    /// for (i, slot) in a.iter_mut().enumerate() {
    ///     slot.write(i as u32 * 10);
    /// }
    /// let a = unsafe { a.assume_init() };
    /// assert_eq!(a.as_slice(), &[0, 10, 20]);
    /// ```
    pub fn uninit(len: usize) -> FixedArray<MaybeUninit<A>> {
        FixedArray {
            data: RawBuf::uninit(len),
        }
    }

    /// Create an array of `len` elements, each `A::default()`.
    pub fn new(len: usize) -> Self
    where
        A: Default,
    {
        Self::from_fn(len, |_| A::default())
    }

    /// Create an array of `len` zeros.
    pub fn zeros(len: usize) -> Self
    where
        A: Zero,
    {
        Self::from_fn(len, |_| A::zero())
    }

    /// Create an array of `len` clones of `elem`.
    ///
    /// ```
    /// use fixgrid::FixedArray;
    ///
    /// let a = FixedArray::from_elem(3, 7);
    /// assert_eq!(a.as_slice(), &[7, 7, 7]);
    /// ```
    pub fn from_elem(len: usize, elem: A) -> Self
    where
        A: Clone,
    {
        Self {
            data: RawBuf::from_elem(len, elem),
        }
    }

    /// Create an array where element `i` is `f(i)`.
    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> A,
    {
        Self {
            data: RawBuf::from_fn(len, f),
        }
    }

    /// Take ownership of the elements of `v`, in order.
    ///
    /// The vector's block is reused when its capacity equals its length.
    pub fn from_vec(v: Vec<A>) -> Self {
        Self {
            data: RawBuf::from_vec(v),
        }
    }

    pub fn into_vec(self) -> Vec<A> {
        self.data.into_vec()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ptr(&self) -> *const A {
        self.data.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut A {
        self.data.as_ptr_mut()
    }

    pub fn as_slice(&self) -> &[A] {
        self.data.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [A] {
        self.data.as_slice_mut()
    }

    /// Perform *unchecked* indexing.
    ///
    /// ## Safety
    ///
    /// `index` must be less than `self.len()`. Only debug builds check it.
    #[inline]
    pub unsafe fn uget(&self, index: usize) -> &A {
        self.data.get_unchecked(index)
    }

    /// Perform *unchecked* mutable indexing.
    ///
    /// ## Safety
    ///
    /// `index` must be less than `self.len()`. Only debug builds check it.
    #[inline]
    pub unsafe fn uget_mut(&mut self, index: usize) -> &mut A {
        self.data.get_unchecked_mut(index)
    }

    /// Return a reference to the element at `index`, or
    /// [`GError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn at(&self, index: usize) -> GResult<&A> {
        self.check_index(index)?;
        Ok(unsafe { self.uget(index) })
    }

    pub fn at_mut(&mut self, index: usize) -> GResult<&mut A> {
        self.check_index(index)?;
        Ok(unsafe { self.uget_mut(index) })
    }

    #[inline]
    fn check_index(&self, index: usize) -> GResult<()> {
        if index >= self.len() {
            return Err(GError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// **Panics** if the array is empty.
    pub fn first(&self) -> &A {
        &self[0]
    }

    /// **Panics** if the array is empty.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self[0]
    }

    /// **Panics** if the array is empty.
    pub fn last(&self) -> &A {
        match self.as_slice().last() {
            Some(elem) => elem,
            None => panic!("last called on an empty array"),
        }
    }

    /// **Panics** if the array is empty.
    pub fn last_mut(&mut self) -> &mut A {
        match self.as_mut_slice().last_mut() {
            Some(elem) => elem,
            None => panic!("last_mut called on an empty array"),
        }
    }

    /// Overwrite every element, in order, with a clone of `elem`.
    pub fn fill(&mut self, elem: A)
    where
        A: Clone,
    {
        self.as_mut_slice().fill(elem);
    }

    /// Exchange buffers with `other`. No element is moved or cloned.
    pub fn swap(&mut self, other: &mut Self) {
        self.data.swap(&mut other.data);
    }

    /// Move the contents out in O(1), leaving `self` empty.
    ///
    /// ```
    /// use fixgrid::arr;
    ///
    /// let mut a = arr![1, 2, 3];
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(b, arr![1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> Self {
        Self {
            data: self.data.take(),
        }
    }

    /// Front-to-back iterator; `.rev()` walks back-to-front.
    pub fn iter(&self) -> slice::Iter<'_, A> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, A> {
        self.as_mut_slice().iter_mut()
    }
}

impl<A> FixedArray<MaybeUninit<A>> {
    /// ## Safety
    ///
    /// Every element must have been written.
    pub unsafe fn assume_init(self) -> FixedArray<A> {
        FixedArray {
            data: self.data.assume_init(),
        }
    }
}

impl<A: Clone> Clone for FixedArray<A> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }

    /// Reuses the existing buffer when the lengths already match, so
    /// pointers into `self` stay valid. Otherwise reallocates.
    fn clone_from(&mut self, other: &Self) {
        self.data.clone_from(&other.data);
    }
}

impl<A> Default for FixedArray<A> {
    fn default() -> Self {
        Self {
            data: RawBuf::empty(),
        }
    }
}

impl<A: PartialEq> PartialEq for FixedArray<A> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<A: Eq> Eq for FixedArray<A> {}

impl<A: Hash> Hash for FixedArray<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<A: fmt::Debug> fmt::Debug for FixedArray<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<A> Index<usize> for FixedArray<A> {
    type Output = A;

    /// **Panics** if `index` is out of bounds.
    #[inline]
    fn index(&self, index: usize) -> &A {
        match self.at(index) {
            Ok(elem) => elem,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> IndexMut<usize> for FixedArray<A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut A {
        match self.check_index(index) {
            Ok(()) => unsafe { self.uget_mut(index) },
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> AsRef<[A]> for FixedArray<A> {
    fn as_ref(&self) -> &[A] {
        self.as_slice()
    }
}

impl<A> AsMut<[A]> for FixedArray<A> {
    fn as_mut(&mut self) -> &mut [A] {
        self.as_mut_slice()
    }
}

impl<A, const N: usize> From<[A; N]> for FixedArray<A> {
    fn from(xs: [A; N]) -> Self {
        Self::from_vec(Vec::from(xs))
    }
}

impl<A> From<Vec<A>> for FixedArray<A> {
    fn from(v: Vec<A>) -> Self {
        Self::from_vec(v)
    }
}

impl<A: Clone> From<&[A]> for FixedArray<A> {
    fn from(xs: &[A]) -> Self {
        Self::from_fn(xs.len(), |i| xs[i].clone())
    }
}

impl<A> From<FixedArray<A>> for Vec<A> {
    fn from(a: FixedArray<A>) -> Self {
        a.into_vec()
    }
}

impl<A> FromIterator<A> for FixedArray<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, A> IntoIterator for &'a FixedArray<A> {
    type Item = &'a A;
    type IntoIter = slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A> IntoIterator for &'a mut FixedArray<A> {
    type Item = &'a mut A;
    type IntoIter = slice::IterMut<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<A> IntoIterator for FixedArray<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arr;
    use std::cell::Cell;

    thread_local! {
        static CLONES: Cell<usize> = Cell::new(0);
    }

    #[derive(Debug, PartialEq)]
    struct Counted(i32);

    impl Clone for Counted {
        fn clone(&self) -> Self {
            CLONES.with(|c| c.set(c.get() + 1));
            Counted(self.0)
        }
    }

    fn clones() -> usize {
        CLONES.with(|c| c.get())
    }

    #[test]
    fn test_from_elem() {
        let a = FixedArray::from_elem(3, 7);
        assert_eq!(a.len(), 3);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![7, 7, 7]);
    }

    #[test]
    fn test_fill() {
        let mut a = arr![1, 2, 3];
        a.fill(9);
        assert_eq!(a.as_slice(), &[9, 9, 9]);
    }

    #[test]
    fn test_new_and_zeros() {
        let a = FixedArray::<String>::new(4);
        assert_eq!(a.len(), 4);
        assert!(a.iter().all(|s| s.is_empty()));

        let z = FixedArray::<f64>::zeros(3);
        assert_eq!(z.as_slice(), &[0.0, 0.0, 0.0]);

        let e = FixedArray::<u8>::new(0);
        assert!(e.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let a = arr![1, 2, 3];
        let mut b = a.clone();
        assert_eq!(a, b);
        b[0] = 100;
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[100, 2, 3]);
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn test_clone_from() {
        let mut a = arr![1, 2, 3];
        let p = a.as_ptr();
        a.clone_from(&arr![4, 5, 6]);
        assert_eq!(a.as_ptr(), p);
        assert_eq!(a, arr![4, 5, 6]);

        a.clone_from(&arr![7]);
        assert_eq!(a, arr![7]);
        a.clone_from(&FixedArray::default());
        assert!(a.is_empty());
    }

    #[test]
    fn test_take() {
        let mut a = arr!["a".to_string(), "b".to_string()];
        let p = a.as_ptr();
        let b = a.take();
        assert_eq!(a.len(), 0);
        assert!(a.is_empty());
        assert_eq!(b.as_ptr(), p);
        assert_eq!(b.as_slice(), &["a", "b"]);

        // the emptied array can be assigned again
        a = b;
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_swap_does_not_clone() {
        let mut a = FixedArray::from_vec(vec![Counted(1), Counted(2)]);
        let mut b = FixedArray::from_vec(vec![Counted(3)]);
        let before = clones();
        a.swap(&mut b);
        assert_eq!(clones(), before);
        assert_eq!(a.as_slice(), &[Counted(3)]);
        assert_eq!(b.as_slice(), &[Counted(1), Counted(2)]);
    }

    #[test]
    fn test_at() {
        let mut a = arr![10, 20, 30];
        assert_eq!(a.at(0), Ok(&10));
        assert_eq!(a.at(2), Ok(&30));
        assert_eq!(a.at(3), Err(GError::IndexOutOfRange { index: 3, len: 3 }));
        *a.at_mut(1).unwrap() = 25;
        assert_eq!(a[1], 25);
        assert!(a.at_mut(7).is_err());

        let e = FixedArray::<i32>::default();
        assert_eq!(e.at(0), Err(GError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_uget() {
        let mut a = arr![1, 2, 3];
        unsafe {
            *a.uget_mut(2) += 10;
            assert_eq!(*a.uget(2), 13);
        }
    }

    #[test]
    #[should_panic(expected = "index out of range: the len is 3 but the index is 3")]
    fn test_index_out_of_bounds() {
        let a = arr![1, 2, 3];
        let _ = a[3];
    }

    #[test]
    fn test_first_last() {
        let mut a = arr![1, 2, 3];
        assert_eq!(*a.first(), 1);
        assert_eq!(*a.last(), 3);
        *a.first_mut() = 0;
        *a.last_mut() = 4;
        assert_eq!(a, arr![0, 2, 4]);

        let one = arr![5];
        assert_eq!(one.first(), one.last());
    }

    #[test]
    #[should_panic(expected = "last called on an empty array")]
    fn test_last_of_empty() {
        let a = FixedArray::<i32>::default();
        a.last();
    }

    #[test]
    #[should_panic(expected = "last_mut called on an empty array")]
    fn test_last_mut_of_empty() {
        let mut a = FixedArray::<i32>::new(0);
        a.last_mut();
    }

    #[test]
    fn test_hash_follows_contents() {
        use std::collections::hash_map::DefaultHasher;
        use std::collections::HashSet;

        fn hash_of<T: Hash + ?Sized>(t: &T) -> u64 {
            let mut h = DefaultHasher::new();
            t.hash(&mut h);
            h.finish()
        }

        let a = arr![1, 2, 3];
        assert_eq!(hash_of(&a), hash_of(&a.clone()));
        assert_eq!(hash_of(&a), hash_of(&[1, 2, 3][..]));

        let set: HashSet<_> = vec![arr![1, 2], arr![1, 2], arr![2, 1]].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&arr![2, 1]));
    }

    #[test]
    fn test_iteration_order() {
        let a = FixedArray::from_fn(5, |i| i * i);
        let fwd: Vec<_> = a.iter().copied().collect();
        let rev: Vec<_> = a.iter().rev().copied().collect();
        assert_eq!(fwd, vec![0, 1, 4, 9, 16]);
        assert_eq!(rev, vec![16, 9, 4, 1, 0]);
        // restartable
        assert_eq!(a.iter().count(), 5);

        let mut b = a.clone();
        for x in &mut b {
            *x += 1;
        }
        assert_eq!(b.into_iter().collect::<Vec<_>>(), vec![1, 2, 5, 10, 17]);
    }

    #[test]
    fn test_equality() {
        let a = arr![1, 2, 3];
        let b = arr![1, 2, 3];
        let c = arr![1, 2];
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
        assert_ne!(c, a);
        assert_ne!(a, arr![1, 2, 4]);
        assert_eq!(FixedArray::<i32>::default(), FixedArray::new(0));
    }

    #[test]
    fn test_unequal_lengths_skip_elements() {
        struct Never;
        impl PartialEq for Never {
            fn eq(&self, _: &Never) -> bool {
                panic!("elements compared");
            }
        }
        let a = FixedArray::from_fn(2, |_| Never);
        let b = FixedArray::from_fn(3, |_| Never);
        assert!(a != b);
    }

    #[test]
    fn test_conversions() {
        let a: FixedArray<_> = (0..4).collect();
        assert_eq!(a, FixedArray::from([0, 1, 2, 3]));
        assert_eq!(a, FixedArray::from(&[0, 1, 2, 3][..]));
        let v: Vec<i32> = a.into();
        assert_eq!(v, vec![0, 1, 2, 3]);
        assert_eq!(format!("{:?}", arr![1, 2]), "[1, 2]");
    }

    #[test]
    fn test_uninit() {
        let mut a = FixedArray::<String>::uninit(2);
        a[0].write("x".to_string());
        a[1].write("y".to_string());
        let a = unsafe { a.assume_init() };
        assert_eq!(a.as_slice(), &["x", "y"]);
    }
}
