//! Equality, ordering and hashing for `SimpleVec`.
//!
//! Equality is element-wise over the logical contents: capacity and spare
//! slots never take part. Ordering is lexicographic, so a proper prefix
//! compares less than any longer collection it begins. The derived
//! operators (`<=`, `>`, `>=`) are only consistent when the element type
//! is totally ordered.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::alloc::Allocator;

use super::SimpleVec;

impl<T1, A1, T2, A2> PartialEq<SimpleVec<T2, A2>> for SimpleVec<T1, A1>
where
    A1: Allocator,
    A2: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &SimpleVec<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, A: Allocator> Eq for SimpleVec<T, A> {}

impl<T1, A1, T2> PartialEq<[T2]> for SimpleVec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, A1, T2> PartialEq<&[T2]> for SimpleVec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<[T2; N]> for SimpleVec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<&[T2; N]> for SimpleVec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T1, T2, A2> PartialEq<SimpleVec<T2, A2>> for [T1]
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &SimpleVec<T2, A2>) -> bool {
        self.eq(other.as_slice())
    }
}

impl<T1, T2, A2> PartialEq<SimpleVec<T2, A2>> for &[T1]
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &SimpleVec<T2, A2>) -> bool {
        (*self).eq(other.as_slice())
    }
}

impl<T1, T2, A2, const N: usize> PartialEq<SimpleVec<T2, A2>> for [T1; N]
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &SimpleVec<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T1, A1, T2> PartialEq<alloc_crate::vec::Vec<T2>> for SimpleVec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &alloc_crate::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T1, T2, A2> PartialEq<SimpleVec<T2, A2>> for alloc_crate::vec::Vec<T1>
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &SimpleVec<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: PartialOrd, A1: Allocator, A2: Allocator> PartialOrd<SimpleVec<T, A2>>
    for SimpleVec<T, A1>
{
    #[inline]
    fn partial_cmp(&self, other: &SimpleVec<T, A2>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for SimpleVec<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for SimpleVec<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}
