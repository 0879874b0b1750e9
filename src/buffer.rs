//! An exclusively-owned, fully initialized array allocation.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ptr::{self, NonNull};
use core::slice;

use const_default::ConstDefault;

use crate::alloc::{Allocator, AllocatorDefault, Global};
use crate::error::StorageError;

#[inline]
pub(crate) fn array_layout<T>(count: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(count).map_err(StorageError::LayoutError)
}

/// A heap allocation of `T` slots with a single owner.
///
/// Every slot of a non-empty buffer always holds a constructed value: slots
/// are filled when the buffer is allocated and dropped when it is released.
/// The buffer may be moved but never cloned, and ownership of the allocation
/// may be handed off with [`release`](Self::release) and reclaimed with
/// [`from_raw_parts_in`](Self::from_raw_parts_in).
pub struct ArrayBuffer<T, A: Allocator = Global> {
    data: NonNull<T>,
    slots: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T, A: AllocatorDefault> ArrayBuffer<T, A> {
    /// Constructs a new, empty `ArrayBuffer`. No allocation is performed.
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(A::DEFAULT)
    }

    /// Allocate a buffer of `slots` default values, panicking if the
    /// allocation fails.
    pub fn allocate(slots: usize) -> Self
    where
        T: Default,
    {
        match Self::try_allocate(slots) {
            Ok(buf) => buf,
            Err(err) => err.panic(),
        }
    }

    /// Try to allocate a buffer of `slots` default values.
    #[inline]
    pub fn try_allocate(slots: usize) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Self::try_allocate_with_in(slots, A::DEFAULT, T::default)
    }

    /// Allocate a buffer of `slots` values produced by `f`, panicking if the
    /// allocation fails.
    pub fn allocate_with<F>(slots: usize, f: F) -> Self
    where
        F: FnMut() -> T,
    {
        match Self::try_allocate_with_in(slots, A::DEFAULT, f) {
            Ok(buf) => buf,
            Err(err) => err.panic(),
        }
    }
}

impl<T, A: Allocator> ArrayBuffer<T, A> {
    /// Constructs a new, empty `ArrayBuffer` which will allocate from `alloc`.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            data: NonNull::dangling(),
            slots: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Try to allocate a buffer of `slots` default values from `alloc`.
    #[inline]
    pub fn try_allocate_in(slots: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Self::try_allocate_with_in(slots, alloc, T::default)
    }

    /// Try to allocate a buffer of `slots` values produced by `f` from `alloc`.
    ///
    /// If `f` panics, the values produced so far are dropped and the
    /// allocation is returned to `alloc` before the panic continues.
    pub fn try_allocate_with_in<F>(slots: usize, alloc: A, mut f: F) -> Result<Self, StorageError>
    where
        F: FnMut() -> T,
    {
        if slots == 0 {
            return Ok(Self::new_in(alloc));
        }
        let layout = array_layout::<T>(slots)?;
        let data = match alloc.allocate(layout) {
            Ok(ptr) => ptr.cast::<T>(),
            Err(_) => return Err(StorageError::AllocError(layout)),
        };
        let mut fill = Filler {
            data,
            init: 0,
            layout,
            alloc: &alloc,
        };
        while fill.init < slots {
            unsafe { fill.data.as_ptr().add(fill.init).write(f()) };
            fill.init += 1;
        }
        mem::forget(fill);
        Ok(Self {
            data,
            slots,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Reassemble a buffer from parts produced by [`release`](Self::release)
    /// or [`into_raw_parts`](Self::into_raw_parts).
    ///
    /// # Safety
    /// `data` must be an allocation from `alloc` with the layout of
    /// `[T; slots]` holding `slots` initialized values, or a dangling pointer
    /// when `slots` is zero. No other owner of the allocation may remain.
    #[inline]
    pub unsafe fn from_raw_parts_in(data: NonNull<T>, slots: usize, alloc: A) -> Self {
        Self {
            data,
            slots,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the allocator instance.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// The number of slots in the allocation.
    #[inline]
    pub const fn slots(&self) -> usize {
        self.slots
    }

    /// Check whether this buffer holds an allocation.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.slots == 0
    }

    /// Access a raw pointer to the first slot.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Access a raw mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// View every slot of the buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.slots) }
    }

    /// Mutably view every slot of the buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.slots) }
    }

    /// Access a slot without checking the index.
    ///
    /// # Safety
    /// `index` must be less than the number of slots.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        &*self.data.as_ptr().add(index)
    }

    /// Mutably access a slot without checking the index.
    ///
    /// # Safety
    /// `index` must be less than the number of slots.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        &mut *self.data.as_ptr().add(index)
    }

    /// Give up ownership of the allocation, leaving this buffer empty.
    ///
    /// The caller becomes responsible for the returned slots and the memory
    /// behind them, normally by passing them back to
    /// [`from_raw_parts_in`](Self::from_raw_parts_in) with this buffer's
    /// allocator. An empty buffer returns a dangling pointer and zero slots.
    #[inline]
    #[must_use = "releasing a buffer without reclaiming it leaks the allocation"]
    pub fn release(&mut self) -> (NonNull<T>, usize) {
        let parts = (self.data, self.slots);
        self.data = NonNull::dangling();
        self.slots = 0;
        parts
    }

    /// Decompose the buffer into its allocation, slot count and allocator.
    #[inline]
    pub fn into_raw_parts(self) -> (NonNull<T>, usize, A) {
        let me = ManuallyDrop::new(self);
        let alloc = unsafe { ptr::read(&me.alloc) };
        (me.data, me.slots, alloc)
    }

    /// Exchange allocations with another buffer.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for ArrayBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, A: AllocatorDefault> ConstDefault for ArrayBuffer<T, A> {
    const DEFAULT: Self = Self::new();
}

impl<T, A: AllocatorDefault> Default for ArrayBuffer<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Drop for ArrayBuffer<T, A> {
    fn drop(&mut self) {
        if self.slots > 0 {
            unsafe {
                ptr::drop_in_place(self.as_mut_slice());
                // SAFETY: the same layout was computed successfully on allocation
                let layout = Layout::from_size_align_unchecked(
                    mem::size_of::<T>() * self.slots,
                    mem::align_of::<T>(),
                );
                self.alloc.deallocate(self.data.cast(), layout);
            }
        }
    }
}

// The buffer is the sole owner of its slots, so it is as thread-safe as its
// contents and allocator.
unsafe impl<T: Send, A: Allocator + Send> Send for ArrayBuffer<T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for ArrayBuffer<T, A> {}

struct Filler<'a, T, A: Allocator> {
    data: NonNull<T>,
    init: usize,
    layout: Layout,
    alloc: &'a A,
}

impl<T, A: Allocator> Drop for Filler<'_, T, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.data.as_ptr(),
                self.init,
            ));
            self.alloc.deallocate(self.data.cast(), self.layout);
        }
    }
}
