use core::alloc::Layout;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ops::Range;
use core::ptr::{self, NonNull};
use core::slice;

use crate::alloc::Allocator;

use super::SimpleVec;

/// An iterator which moves the elements out of a [`SimpleVec`].
///
/// Remaining elements and any spare slots of the buffer are dropped along
/// with the iterator.
pub struct IntoIter<T, A: Allocator> {
    data: NonNull<T>,
    slots: usize,
    length: usize,
    remain: Range<usize>,
    alloc: A,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(super) fn new(vec: SimpleVec<T, A>) -> Self {
        let (buffer, length) = vec.into_parts();
        let (data, slots, alloc) = buffer.into_raw_parts();
        Self {
            data,
            slots,
            length,
            remain: Range {
                start: 0,
                end: length,
            },
            alloc,
        }
    }

    /// Get a reference to the allocator instance.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// View the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(
                self.data.as_ptr().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    /// View the remaining elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(
                self.data.as_ptr().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    /// The number of remaining elements.
    pub const fn len(&self) -> usize {
        self.remain.end - self.remain.start
    }

    /// Check whether the iterator is exhausted.
    pub const fn is_empty(&self) -> bool {
        self.remain.end == self.remain.start
    }
}

impl<T, A: Allocator> AsRef<[T]> for IntoIter<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for IntoIter<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.remain.start;
        if index != self.remain.end {
            self.remain.start = index + 1;
            unsafe { Some(ptr::read(self.data.as_ptr().add(index))) }
        } else {
            None
        }
    }

    #[inline]
    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.len()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut index = self.remain.end;
        if index != self.remain.start {
            index -= 1;
            self.remain.end = index;
            unsafe { Some(ptr::read(self.data.as_ptr().add(index))) }
        } else {
            None
        }
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        if self.slots == 0 {
            return;
        }
        let remain = mem::replace(&mut self.remain, Range { start: 0, end: 0 });
        unsafe {
            let base = self.data.as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                base.add(remain.start),
                remain.len(),
            ));
            // spare slots past the length are still initialized
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                base.add(self.length),
                self.slots - self.length,
            ));
            let layout = Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.slots,
                mem::align_of::<T>(),
            );
            self.alloc.deallocate(self.data.cast(), layout);
        }
    }
}

unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}
