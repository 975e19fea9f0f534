use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::ptr::{self, NonNull};
use log::trace;
use rawpointer::PointerExt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::slice;

#[cold]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

fn layout_for<P>(len: usize) -> Layout {
    match Layout::array::<P>(len) {
        Ok(layout) => layout,
        Err(_) => capacity_overflow(),
    }
}

fn allocate<P>(len: usize) -> NonNull<P> {
    let layout = layout_for::<P>(len);
    if layout.size() == 0 {
        return NonNull::<P>::dangling();
    }
    trace!("allocating {} bytes for {} elements", layout.size(), len);
    let ptr = unsafe { alloc(layout) } as *mut P;
    match NonNull::new(ptr) {
        Some(ptr) => ptr,
        None => handle_alloc_error(layout),
    }
}

/// ## Safety
///
/// `ptr` must come from `allocate::<P>(len)` with the same `len`.
unsafe fn deallocate<P>(ptr: NonNull<P>, len: usize) {
    let layout = layout_for::<P>(len);
    if layout.size() != 0 {
        dealloc(ptr.as_ptr() as *mut u8, layout);
    }
}

// Tracks how many leading slots of a fresh allocation hold live values.
// If construction unwinds, drops exactly those and frees the block.
struct PartialInit<P> {
    ptr: NonNull<P>,
    cap: usize,
    len: usize,
}

impl<P> PartialInit<P> {
    fn new(cap: usize) -> Self {
        Self {
            ptr: allocate(cap),
            cap,
            len: 0,
        }
    }

    fn finish(self) -> RawBuf<P> {
        debug_assert_eq!(self.len, self.cap);
        let this = ManuallyDrop::new(self);
        RawBuf {
            ptr: this.ptr,
            len: this.cap,
            _marker: PhantomData,
        }
    }
}

impl<P> Drop for PartialInit<P> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            deallocate(self.ptr, self.cap);
        }
    }
}

/// An owned, fixed-length heap block of `P`.
///
/// Every one of the `len` slots is initialised. A buffer with `len == 0`
/// owns no allocation; this is also the state left behind by `take`.
pub(crate) struct RawBuf<P> {
    ptr: NonNull<P>,
    len: usize,
    _marker: PhantomData<P>,
}

impl<P> RawBuf<P> {
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> P,
    {
        let mut guard = PartialInit::<P>::new(len);
        let mut dst = guard.ptr.as_ptr();
        while guard.len < len {
            let elem = f(guard.len);
            unsafe {
                ptr::write(dst.post_inc(), elem);
            }
            // bump after the write in case f panics on the next slot
            guard.len += 1;
        }
        guard.finish()
    }

    pub(crate) fn from_elem(len: usize, elem: P) -> Self
    where
        P: Clone,
    {
        let mut guard = PartialInit::<P>::new(len);
        let mut dst = guard.ptr.as_ptr();
        unsafe {
            // Write all elements except the last one
            for _ in 1..len {
                ptr::write(dst.post_inc(), elem.clone());
                guard.len += 1;
            }
            if len > 0 {
                // We can write the last element directly without cloning needlessly
                ptr::write(dst, elem);
                guard.len += 1;
            }
        }
        guard.finish()
    }

    pub(crate) fn from_vec(v: Vec<P>) -> Self {
        // A boxed slice is allocated with exactly `Layout::array::<P>(len)`,
        // the same layout `deallocate` uses.
        let b = v.into_boxed_slice();
        let len = b.len();
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(b) as *mut P) };
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    pub(crate) fn into_vec(self) -> Vec<P> {
        let this = ManuallyDrop::new(self);
        unsafe {
            let raw = ptr::slice_from_raw_parts_mut(this.ptr.as_ptr(), this.len);
            Box::from_raw(raw).into_vec()
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const P {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_ptr_mut(&mut self) -> *mut P {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[P] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr() as *const P, self.len) }
    }

    #[inline]
    pub(crate) fn as_slice_mut(&mut self) -> &mut [P] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// ## Safety
    ///
    /// `index < self.len()`
    #[inline]
    pub(crate) unsafe fn get_unchecked(&self, index: usize) -> &P {
        debug_assert!(index < self.len, "index {} out of bounds {}", index, self.len);
        &*self.ptr.as_ptr().add(index)
    }

    /// ## Safety
    ///
    /// `index < self.len()`
    #[inline]
    pub(crate) unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut P {
        debug_assert!(index < self.len, "index {} out of bounds {}", index, self.len);
        &mut *self.ptr.as_ptr().add(index)
    }

    /// Move the block out, leaving `self` empty.
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<P> RawBuf<MaybeUninit<P>> {
    pub(crate) fn uninit(len: usize) -> Self {
        Self {
            ptr: allocate(len),
            len,
            _marker: PhantomData,
        }
    }

    /// ## Safety
    ///
    /// Every slot must have been written.
    pub(crate) unsafe fn assume_init(self) -> RawBuf<P> {
        let this = ManuallyDrop::new(self);
        RawBuf {
            ptr: this.ptr.cast::<P>(),
            len: this.len,
            _marker: PhantomData,
        }
    }
}

impl<P: Clone> Clone for RawBuf<P> {
    fn clone(&self) -> Self {
        let src = self.as_slice();
        Self::from_fn(src.len(), |i| src[i].clone())
    }

    fn clone_from(&mut self, other: &Self) {
        if self.len == other.len {
            // same length: overwrite in place, the block is kept
            self.as_slice_mut().clone_from_slice(other.as_slice());
        } else {
            trace!("reallocating buffer from {} to {} elements", self.len, other.len);
            // the old block is released only once the copy is complete
            *self = other.clone();
        }
    }
}

impl<P> Default for RawBuf<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> Drop for RawBuf<P> {
    fn drop(&mut self) {
        // frees the block even if an element's drop panics
        let _dealloc = PartialInit {
            ptr: self.ptr,
            cap: self.len,
            len: 0,
        };
        unsafe {
            ptr::drop_in_place(self.as_slice_mut() as *mut [P]);
        }
    }
}

unsafe impl<P> Send for RawBuf<P> where P: Send {}
unsafe impl<P> Sync for RawBuf<P> where P: Sync {}
