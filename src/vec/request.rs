use crate::alloc::AllocatorDefault;

use super::SimpleVec;

/// A request for an empty collection with preallocated capacity, produced
/// by [`reserve`].
///
/// ```
/// # #[cfg(feature = "alloc")] {
/// use simple_vec::{reserve, SimpleVec};
///
/// let v: SimpleVec<u32> = reserve(5).into();
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 5);
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReserveCapacity(pub usize);

impl ReserveCapacity {
    /// The number of slots to reserve.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.0
    }
}

/// Construct a capacity reservation request.
#[inline]
pub const fn reserve(capacity: usize) -> ReserveCapacity {
    ReserveCapacity(capacity)
}

impl<T: Default, A: AllocatorDefault> From<ReserveCapacity> for SimpleVec<T, A> {
    #[inline]
    fn from(req: ReserveCapacity) -> Self {
        Self::with_capacity(req.0)
    }
}
