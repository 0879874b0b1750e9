//! A growable, contiguous array built on [`ArrayBuffer`].
//!
//! Iterators and references into a [`SimpleVec`] borrow it, so every
//! operation which may reallocate or shift elements (insertion, removal,
//! growth, `clear` and `swap_with`) ends their lifetime at compile time.

use core::borrow::{Borrow, BorrowMut};
use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut};
#[cfg(all(feature = "alloc", feature = "allocator-api2"))]
use core::ptr;

use const_default::ConstDefault;

#[cfg(feature = "zeroize")]
use crate::alloc::ZeroizingAlloc;
use crate::alloc::{Allocator, AllocatorDefault, Global};
use crate::buffer::ArrayBuffer;
use crate::error::{OutOfRange, StorageError, UpdateError};
use crate::grow::{Grow, GrowDoubling, GrowExact};

pub use self::{
    into_iter::IntoIter,
    request::{reserve, ReserveCapacity},
};

#[macro_use]
mod macros;

mod cmp;
mod into_iter;
mod request;

#[cfg(feature = "zeroize")]
/// A `SimpleVec` which automatically zeroizes its buffer when dropped.
pub type ZeroizingSimpleVec<T> = SimpleVec<T, ZeroizingAlloc<Global>>;

#[cold]
#[inline(never)]
pub(super) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[cfg(feature = "alloc")]
#[inline]
/// Create a `SimpleVec<T>` from a cloneable element T and a count of the number of elements.
pub fn from_elem<T: Clone>(elem: T, count: usize) -> SimpleVec<T> {
    from_elem_in(elem, count, Global)
}

/// Create a `SimpleVec<T, A>` from a cloneable element T, a count of the number of
/// elements, and an allocator instance.
pub fn from_elem_in<T: Clone, A: Allocator>(elem: T, count: usize, alloc: A) -> SimpleVec<T, A> {
    match SimpleVec::try_from_fn_in(count, alloc, || elem.clone()) {
        Ok(vec) => vec,
        Err(err) => err.panic(),
    }
}

/// Create a `SimpleVec<T, A>` from an array `[T; N]` and an allocator instance.
pub fn from_array_in<T, A: Allocator, const N: usize>(data: [T; N], alloc: A) -> SimpleVec<T, A> {
    let mut items = data.into_iter();
    let res = SimpleVec::try_from_fn_in(N, alloc, || match items.next() {
        Some(item) => item,
        None => index_panic(),
    });
    match res {
        Ok(vec) => vec,
        Err(err) => err.panic(),
    }
}

/// A contiguous growable array type.
///
/// The elements live in a single [`ArrayBuffer`] owned by the collection.
/// Every slot of the buffer holds a constructed value: slots beyond
/// [`len`](Self::len) contain either default values or stale values left by
/// a truncation, and are never observable through the public interface.
///
/// When an operation needs more room than the current capacity, the buffer
/// is replaced with one of `max(required, 2 * capacity)` slots. The new
/// buffer is fully prepared before it is swapped in, so a failed allocation
/// leaves the collection unchanged.
pub struct SimpleVec<T, A: Allocator = Global> {
    buffer: ArrayBuffer<T, A>,
    length: usize,
}

impl<T, A: AllocatorDefault> SimpleVec<T, A> {
    /// Constructs a new, empty `SimpleVec<T, A>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// # #[cfg(feature = "alloc")]
    /// let mut vec: simple_vec::SimpleVec<i32> = simple_vec::SimpleVec::new();
    /// ```
    pub const fn new() -> Self {
        Self::new_in(A::DEFAULT)
    }

    /// Constructs a new, empty `SimpleVec` with `capacity` reserved slots.
    pub fn with_capacity(capacity: usize) -> Self
    where
        T: Default,
    {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a new, empty `SimpleVec` with `capacity` reserved slots.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Self::try_with_capacity_in(capacity, A::DEFAULT)
    }

    /// Constructs a `SimpleVec` holding `len` default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        match Self::try_with_len(len) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a `SimpleVec` holding `len` default values.
    pub fn try_with_len(len: usize) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Self::try_with_len_in(len, A::DEFAULT)
    }

    /// Constructs a `SimpleVec` by cloning the contents of a slice.
    /// The capacity of the result is exactly the length of the slice.
    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice(data) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a `SimpleVec` by cloning the contents of a slice.
    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(data, A::DEFAULT)
    }
}

impl<T, A: Allocator> SimpleVec<T, A> {
    /// Constructs a new, empty `SimpleVec` which will allocate from `alloc`.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buffer: ArrayBuffer::new_in(alloc),
            length: 0,
        }
    }

    /// Try to construct a new, empty `SimpleVec` with `capacity` reserved
    /// slots allocated from `alloc`.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Ok(Self {
            buffer: ArrayBuffer::try_allocate_in(capacity, alloc)?,
            length: 0,
        })
    }

    /// Try to construct a `SimpleVec` holding `len` default values allocated
    /// from `alloc`.
    pub fn try_with_len_in(len: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Ok(Self {
            buffer: ArrayBuffer::try_allocate_in(len, alloc)?,
            length: len,
        })
    }

    /// Try to construct a `SimpleVec` by cloning the contents of a slice
    /// into a buffer allocated from `alloc`.
    pub fn try_from_slice_in(data: &[T], alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut items = data.iter();
        Self::try_from_fn_in(data.len(), alloc, || match items.next() {
            Some(item) => item.clone(),
            None => index_panic(),
        })
    }

    /// Try to construct a `SimpleVec` of `len` values produced by `f`, with
    /// a capacity of exactly `len`.
    pub fn try_from_fn_in<F>(len: usize, alloc: A, f: F) -> Result<Self, StorageError>
    where
        F: FnMut() -> T,
    {
        Ok(Self {
            buffer: ArrayBuffer::try_allocate_with_in(len, alloc, f)?,
            length: len,
        })
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (ArrayBuffer<T, A>, usize) {
        (self.buffer, self.length)
    }

    /// Get a reference to the allocator instance.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buffer.allocator()
    }

    /// Access a raw pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    /// Access a raw mutable pointer to the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_mut_ptr()
    }

    /// View the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer.as_slice()[..self.length]
    }

    /// View the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer.as_mut_slice()[..self.length]
    }

    /// The number of allocated slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buffer.slots()
    }

    /// The number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Check whether the collection has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Access the element at `index`, or return an error if the index is
    /// not less than the length.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let length = self.length;
        self.as_slice()
            .get(index)
            .ok_or(OutOfRange::new(index, length))
    }

    /// Mutably access the element at `index`, or return an error if the
    /// index is not less than the length.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let length = self.length;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange::new(index, length))
    }

    /// Remove all elements, retaining the allocated buffer.
    ///
    /// The removed values stay in the spare slots until they are
    /// overwritten or the buffer is released.
    #[inline]
    pub fn clear(&mut self) {
        self.length = 0;
    }

    /// Exchange the contents of two collections without moving any elements.
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.length, &mut other.length);
    }
}

impl<T: Default, A: Allocator> SimpleVec<T, A> {
    /// Remove and return the last element, or `None` if the collection is empty.
    /// The capacity is not changed.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        self.length -= 1;
        Some(mem::take(&mut self.buffer.as_mut_slice()[self.length]))
    }

    /// Remove and return the first element, or `None` if the collection is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.length == 0 {
            None
        } else {
            Some(self.remove(0))
        }
    }

    /// Remove and return the element at `index`, shifting all following
    /// elements down by one. Panics if `index` is not less than the length.
    pub fn remove(&mut self, index: usize) -> T {
        let length = self.length;
        if index >= length {
            index_panic();
        }
        let shifted = &mut self.buffer.as_mut_slice()[index..length];
        shifted.rotate_left(1);
        self.length = length - 1;
        mem::take(&mut shifted[length - 1 - index])
    }

    /// Drop the element at `index`, shifting all following elements down by
    /// one. Returns `index`, which now refers to the element following the
    /// erased one. Panics if `index` is not less than the length.
    ///
    /// No reallocation is performed.
    #[inline]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }
}

impl<T: Default, A: Allocator + Clone> SimpleVec<T, A> {
    /// Ensure the capacity is at least `capacity`, reallocating to exactly
    /// that many slots if it is currently smaller.
    ///
    /// Unlike `Vec::reserve`, the argument is a total capacity rather than a
    /// number of additional elements.
    pub fn reserve(&mut self, capacity: usize) {
        match self.try_reserve(capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to ensure the capacity is at least `capacity`.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), StorageError> {
        if capacity > self.buffer.slots() {
            let mut fresh = self.try_relocate::<GrowExact>(capacity, self.length, 0)?;
            self.buffer.swap(&mut fresh);
        }
        Ok(())
    }

    fn try_reserve_for(&mut self, additional: usize) -> Result<(), StorageError> {
        let Some(required) = self.length.checked_add(additional) else {
            return Err(StorageError::CapacityLimit);
        };
        if required > self.buffer.slots() {
            let mut fresh = self.try_relocate::<GrowDoubling>(required, self.length, 0)?;
            self.buffer.swap(&mut fresh);
        }
        Ok(())
    }

    /// Allocate a replacement buffer holding at least `required` slots, and
    /// move the current elements into it, leaving `gap` default slots at
    /// `index`. The caller completes the update by swapping it in.
    fn try_relocate<G: Grow>(
        &mut self,
        required: usize,
        index: usize,
        gap: usize,
    ) -> Result<ArrayBuffer<T, A>, StorageError> {
        let length = self.length;
        let capacity = G::next_capacity(self.buffer.slots(), required);
        let mut fresh = ArrayBuffer::try_allocate_in(capacity, self.buffer.allocator().clone())?;
        let target = fresh.as_mut_slice();
        let (head, tail) = self.buffer.as_mut_slice()[..length].split_at_mut(index);
        target[..index].swap_with_slice(head);
        target[index + gap..length + gap].swap_with_slice(tail);
        Ok(fresh)
    }

    /// Append an element, growing the buffer if it is full.
    pub fn push_back(&mut self, value: T) {
        match self.try_push_back(value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to append an element, returning it with the error if the buffer
    /// could not be grown.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<(), UpdateError<T>> {
        self.try_insert(self.length, value)?;
        Ok(())
    }

    /// Prepend an element, shifting all existing elements up by one.
    pub fn push_front(&mut self, value: T) {
        self.insert(0, value);
    }

    /// Insert an element at `index`, shifting all following elements up by
    /// one, and return the index used. Panics if `index` is greater than the
    /// length.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        match self.try_insert(index, value) {
            Ok(index) => index,
            Err(error) => error.panic(),
        }
    }

    /// Try to insert an element at `index`, returning it with the error if
    /// the buffer could not be grown.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize, UpdateError<T>> {
        let length = self.length;
        if index > length {
            index_panic();
        }
        if length == self.buffer.slots() {
            let Some(required) = length.checked_add(1) else {
                return Err(UpdateError::new(StorageError::CapacityLimit, value));
            };
            // the tail is moved directly to its final position in the new buffer
            let mut fresh = match self.try_relocate::<GrowDoubling>(required, index, 1) {
                Ok(fresh) => fresh,
                Err(error) => return Err(UpdateError::new(error, value)),
            };
            fresh.as_mut_slice()[index] = value;
            self.buffer.swap(&mut fresh);
        } else {
            let shifted = &mut self.buffer.as_mut_slice()[index..=length];
            shifted[length - index] = value;
            shifted.rotate_right(1);
        }
        self.length = length + 1;
        Ok(index)
    }

    /// Change the length of the collection.
    ///
    /// Shrinking only adjusts the length. Growing exposes slots which are
    /// reset to default values, reallocating if the capacity is exceeded.
    pub fn resize(&mut self, new_len: usize) {
        match self.try_resize(new_len) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to change the length of the collection.
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), StorageError> {
        let length = self.length;
        if new_len > self.buffer.slots() {
            // slots in a new buffer are already default values
            let mut fresh = self.try_relocate::<GrowDoubling>(new_len, length, 0)?;
            self.buffer.swap(&mut fresh);
        } else if new_len > length {
            self.buffer.as_mut_slice()[length..new_len].fill_with(T::default);
        }
        self.length = new_len;
        Ok(())
    }

    /// Append clones of all the elements of a slice.
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to append clones of all the elements of a slice.
    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_reserve_for(items.len())?;
        for item in items {
            let length = self.length;
            self.buffer.as_mut_slice()[length] = item.clone();
            self.length = length + 1;
        }
        Ok(())
    }
}

impl<T, A: Allocator> AsRef<[T]> for SimpleVec<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for SimpleVec<T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Borrow<[T]> for SimpleVec<T, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for SimpleVec<T, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for SimpleVec<T, A> {
    /// Copy the elements into a new buffer sized to the current length.
    /// Spare capacity is not carried over.
    fn clone(&self) -> Self {
        match Self::try_from_slice_in(self, self.allocator().clone()) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }
}

impl<T, A: AllocatorDefault> ConstDefault for SimpleVec<T, A> {
    const DEFAULT: Self = Self::new();
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for SimpleVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, A: AllocatorDefault> Default for SimpleVec<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Deref for SimpleVec<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for SimpleVec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: Default, A: Allocator + Clone> Extend<T> for SimpleVec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        if let Err(error) = self.try_reserve_for(iter.size_hint().0) {
            error.panic();
        }
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Clone + Default + 'a, A: Allocator + Clone> Extend<&'a T> for SimpleVec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned())
    }
}

impl<T: Default, A: AllocatorDefault> FromIterator<T> for SimpleVec<T, A> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, A: AllocatorDefault, const N: usize> From<[T; N]> for SimpleVec<T, A> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        from_array_in(data, A::DEFAULT)
    }
}

impl<T: Clone, A: AllocatorDefault> From<&[T]> for SimpleVec<T, A> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, A: AllocatorDefault, const N: usize> From<&[T; N]> for SimpleVec<T, A> {
    #[inline]
    fn from(data: &[T; N]) -> Self {
        Self::from_slice(data)
    }
}

#[cfg(feature = "alloc")]
impl<T> From<SimpleVec<T, Global>> for alloc_crate::vec::Vec<T> {
    fn from(vec: SimpleVec<T, Global>) -> Self {
        let (buffer, length) = vec.into_parts();
        let (data, slots, _alloc) = buffer.into_raw_parts();
        let mut res = unsafe { alloc_crate::vec::Vec::from_raw_parts(data.as_ptr(), slots, slots) };
        res.truncate(length);
        res
    }
}

#[cfg(all(feature = "alloc", feature = "allocator-api2"))]
impl<T, A: Allocator> From<SimpleVec<T, A>> for allocator_api2::vec::Vec<T, A> {
    fn from(vec: SimpleVec<T, A>) -> Self {
        let (buffer, length) = vec.into_parts();
        let (data, slots, alloc) = buffer.into_raw_parts();
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                data.as_ptr().add(length),
                slots - length,
            ));
            allocator_api2::vec::Vec::from_raw_parts_in(data.as_ptr(), length, slots, alloc)
        }
    }
}

impl<T, A: Allocator> IntoIterator for SimpleVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a SimpleVec<T, A> {
    type Item = &'a T;
    type IntoIter = <&'a [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut SimpleVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = <&'a mut [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: Allocator + Clone> zeroize::Zeroize for SimpleVec<T, ZeroizingAlloc<A>> {
    #[inline]
    fn zeroize(&mut self) {
        let alloc = self.allocator().clone();
        self.length = 0;
        drop(mem::replace(&mut self.buffer, ArrayBuffer::new_in(alloc)));
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: Allocator> zeroize::ZeroizeOnDrop for SimpleVec<T, ZeroizingAlloc<A>> {}
