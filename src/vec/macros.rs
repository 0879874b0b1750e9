/// Construct a [`SimpleVec`](crate::vec::SimpleVec) from a list of elements
/// or from a repeated element, optionally in a specific allocator.
///
/// ```
/// # #[cfg(feature = "alloc")] {
/// let v = simple_vec::simple_vec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// let z = simple_vec::simple_vec![0u8; 4];
/// assert_eq!(z.len(), 4);
/// # }
/// ```
#[macro_export]
macro_rules! simple_vec {
    (in $alloc:expr $(;)?) => (
        $crate::vec::SimpleVec::new_in($alloc)
    );
    (in $alloc:expr; $elem:expr; $n:expr) => (
        $crate::vec::from_elem_in($elem, $n, $alloc)
    );
    (in $alloc:expr; $($x:expr),+ $(,)?) => (
        $crate::vec::from_array_in([$($x),+], $alloc)
    );
    () => (
        $crate::vec::SimpleVec::<_>::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        <$crate::vec::SimpleVec<_>>::from([$($x),+])
    );
}
