//! Capacity growth policies.

use core::fmt::Debug;

/// Growth behavior for collections which have exceeded their available storage
pub trait Grow: Debug {
    /// Calculate the next capacity to request, given the current capacity and
    /// the minimum capacity required by the pending operation.
    fn next_capacity(prev: usize, minimum: usize) -> usize;
}

/// Growth behavior which never requests extra capacity
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowExact;

impl Grow for GrowExact {
    #[inline]
    fn next_capacity(_prev: usize, minimum: usize) -> usize {
        minimum
    }
}

/// Growth behavior which doubles the previous capacity, never returning
/// less than the required minimum.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowDoubling;

impl Grow for GrowDoubling {
    #[inline]
    fn next_capacity(prev: usize, minimum: usize) -> usize {
        prev.saturating_mul(2).max(minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_with_floor() {
        assert_eq!(GrowDoubling::next_capacity(0, 1), 1);
        assert_eq!(GrowDoubling::next_capacity(1, 2), 2);
        assert_eq!(GrowDoubling::next_capacity(3, 4), 6);
        assert_eq!(GrowDoubling::next_capacity(4, 20), 20);
        assert_eq!(GrowDoubling::next_capacity(usize::MAX, usize::MAX), usize::MAX);
    }

    #[test]
    fn exact() {
        assert_eq!(GrowExact::next_capacity(0, 5), 5);
        assert_eq!(GrowExact::next_capacity(10, 11), 11);
    }
}
