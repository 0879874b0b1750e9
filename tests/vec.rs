#![cfg(feature = "alloc")]

use core::alloc::Layout;
use core::cell::Cell;
use core::mem;
use core::ptr::NonNull;
use std::rc::Rc;

use rstest::rstest;
use simple_vec::{
    alloc::{AllocError, Allocator, Global},
    reserve, simple_vec, SimpleVec, StorageError,
};

const SLICE: &[usize] = &[1, 2, 3, 4, 5];

#[derive(Debug, Default, Clone)]
struct Counted(Option<Rc<Cell<usize>>>);

impl Counted {
    fn new(drops: &Rc<Cell<usize>>) -> Self {
        Self(Some(drops.clone()))
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        if let Some(drops) = self.0.as_ref() {
            drops.set(drops.get() + 1);
        }
    }
}

/// Allocates from the global allocator until `limit` bytes are requested.
#[derive(Debug, Clone, Copy)]
struct LimitAlloc {
    limit: usize,
}

unsafe impl Allocator for LimitAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if layout.size() > self.limit {
            Err(AllocError)
        } else {
            Global.allocate(layout)
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        Global.deallocate(ptr, layout)
    }
}

#[test]
fn vec_new_global() {
    let v = SimpleVec::<usize>::new();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
    assert!(v.is_empty());
}

#[test]
fn vec_with_len() {
    let v = SimpleVec::<u32>::with_len(4);
    assert_eq!(v, [0, 0, 0, 0]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn vec_from_elem() {
    let v = simple_vec!["a"; 3];
    assert_eq!(v, ["a", "a", "a"]);
    assert_eq!(v.capacity(), 3);
    let v: SimpleVec<u8> = simple_vec![7; 0];
    assert!(v.is_empty());
}

#[test]
fn vec_macro_forms() {
    let v: SimpleVec<u8> = simple_vec![];
    assert!(v.is_empty());
    let v = simple_vec![1, 2, 3,];
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
    let v = simple_vec![in Global; 5u16; 2];
    assert_eq!(v, [5, 5]);
    let v = simple_vec![in Global; 1u16, 2];
    assert_eq!(v, [1, 2]);
    let v: SimpleVec<u8, Global> = simple_vec![in Global];
    assert!(v.is_empty());
}

#[test]
fn vec_from_reserve() {
    let v: SimpleVec<usize> = reserve(5).into();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 5);
    let v = SimpleVec::<usize>::with_capacity(3);
    assert_eq!((v.len(), v.capacity()), (0, 3));
}

#[test]
fn vec_from_slice() {
    let v = SimpleVec::<usize>::from_slice(SLICE);
    assert_eq!(v.as_slice(), SLICE);
    assert_eq!(v.capacity(), SLICE.len());
    let v: SimpleVec<usize> = SLICE.into();
    assert_eq!(v, SLICE);
}

#[test]
fn vec_check_capacity_growth() {
    let mut res = [0usize; 10];
    let mut vec = SimpleVec::<usize>::new();
    for cap in res.iter_mut() {
        vec.push_back(1);
        *cap = vec.capacity();
    }
    assert_eq!(res, [1, 2, 4, 4, 8, 8, 8, 8, 16, 16]);
}

#[test]
fn vec_push_then_at() {
    let mut v = simple_vec![1, 2, 3];
    v.push_back(10);
    assert_eq!(v.at(v.len() - 1), Ok(&10));
    assert_eq!(v.len(), 4);
    assert_eq!(v.capacity(), 6);
    v.push_back(11);
    assert_eq!(v.capacity(), 6);
}

#[test]
fn vec_at_matches_index() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    for i in 0..v.len() {
        assert_eq!(v.at(i), Ok(&v[i]));
    }
    let err = v.at(5).unwrap_err();
    assert_eq!((err.index(), err.length()), (5, 5));
    *v.at_mut(0).unwrap() = 9;
    assert_eq!(v[0], 9);
    assert!(v.at_mut(7).is_err());
}

#[test]
fn vec_at_ignores_spare_slots() {
    let mut v = simple_vec![1, 2, 3];
    v.resize(1);
    assert_eq!(v.capacity(), 3);
    assert!(v.at(1).is_err());
}

#[test]
fn vec_pop_back() {
    let mut v = SimpleVec::<usize>::new();
    assert_eq!(v.pop_back(), None);
    assert_eq!(v.len(), 0);

    let mut v = simple_vec![1, 2, 3];
    assert_eq!(v.pop_back(), Some(3));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn vec_pop_back_moves_value() {
    let drops = Rc::new(Cell::new(0));
    let mut v = SimpleVec::<_>::from([Counted::new(&drops), Counted::new(&drops)]);
    let item = v.pop_back();
    assert!(item.is_some());
    assert_eq!(drops.get(), 0);
    drop(item);
    assert_eq!(drops.get(), 1);
    drop(v);
    assert_eq!(drops.get(), 2);
}

#[test]
fn vec_insert_example() {
    let mut v = simple_vec![1, 2, 3];
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.insert(1, 99), 1);
    assert_eq!(v, [1, 99, 2, 3]);
    assert_eq!(v.len(), 4);
    assert_eq!(v.capacity(), 6);
}

#[test]
fn vec_erase_example() {
    let mut v = simple_vec![1, 2, 3];
    assert_eq!(v.erase(0), 0);
    assert_eq!(v, [2, 3]);
    assert_eq!(v.capacity(), 3);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
fn vec_insert_erase_restores(#[case] pos: usize) {
    for spare in [0, 4] {
        let mut v = SimpleVec::<usize>::with_capacity(SLICE.len() + spare);
        v.extend_from_slice(SLICE);
        let idx = v.insert(pos, 100);
        assert_eq!(idx, pos);
        assert_eq!(v[pos], 100);
        assert_eq!(v.len(), SLICE.len() + 1);
        let next = v.erase(idx);
        assert_eq!(next, pos);
        assert_eq!(v, SLICE);
    }
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn vec_insert_past_end() {
    let mut v = simple_vec![1, 2, 3];
    v.insert(4, 0);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn vec_erase_at_end() {
    let mut v = simple_vec![1, 2, 3];
    v.erase(3);
}

#[test]
fn vec_push_front_pop_front() {
    let mut v = SimpleVec::<usize>::new();
    v.push_front(3);
    v.push_front(2);
    v.push_front(1);
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.pop_front(), Some(1));
    assert_eq!(v.remove(1), 3);
    assert_eq!(v, [2]);
    assert_eq!(v.pop_front(), Some(2));
    assert_eq!(v.pop_front(), None);
}

#[test]
fn vec_clear_keeps_buffer() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    let ptr = v.as_ptr();
    v.clear();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), SLICE.len());
    for i in 0..SLICE.len() {
        v.push_back(i);
    }
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v.capacity(), SLICE.len());
    v.push_back(99);
    assert_eq!(v.capacity(), SLICE.len() * 2);
}

#[rstest]
#[case(0, &[])]
#[case(2, &[1, 2])]
#[case(5, &[1, 2, 3, 4, 5])]
#[case(7, &[1, 2, 3, 4, 5, 0, 0])]
#[case(12, &[1, 2, 3, 4, 5, 0, 0, 0, 0, 0, 0, 0])]
fn vec_resize(#[case] len: usize, #[case] expect: &[usize]) {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    v.resize(len);
    assert_eq!(v, expect);
    assert!(v.capacity() >= len);
}

#[test]
fn vec_resize_growth_policy() {
    let mut v = simple_vec![1, 2, 3];
    v.resize(4);
    assert_eq!(v.capacity(), 6);
    v.resize(20);
    assert_eq!(v.capacity(), 20);
}

#[test]
fn vec_resize_resets_stale_slots() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    v.resize(1);
    v.resize(4);
    assert_eq!(v, [1, 0, 0, 0]);
    assert_eq!(v.capacity(), SLICE.len());
}

#[test]
fn vec_reserve_exact() {
    let mut v = simple_vec![1, 2, 3];
    v.reserve(2);
    assert_eq!(v.capacity(), 3);
    v.reserve(10);
    assert_eq!(v.capacity(), 10);
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn vec_extend_new_global() {
    let mut v = SimpleVec::<usize>::new();
    v.extend(SLICE.iter().cloned());
    assert!(v.capacity() >= SLICE.len());
    assert_eq!(v.len(), SLICE.len());
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_extend_ref() {
    let mut v = simple_vec![0usize];
    v.extend(SLICE);
    assert_eq!(v, [0, 1, 2, 3, 4, 5]);
}

#[test]
fn vec_extend_from_slice_growth() {
    let mut v = simple_vec![1, 2, 3];
    v.extend_from_slice(&[4]);
    assert_eq!(v.capacity(), 6);
    v.extend_from_slice(&[5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
    assert_eq!(v.capacity(), 14);
    assert_eq!(v.len(), 14);
}

#[test]
fn vec_from_iter() {
    let v: SimpleVec<usize> = (1..=5).collect();
    assert_eq!(v, SLICE);
}

#[test]
fn vec_clone_trims_capacity() {
    let mut v = SimpleVec::<usize>::with_capacity(10);
    v.extend_from_slice(SLICE);
    let c = v.clone();
    assert_eq!(c, v);
    assert_eq!(c.capacity(), SLICE.len());
    assert_ne!(c.as_ptr(), v.as_ptr());
}

#[test]
fn vec_take_resets_source() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    let moved = mem::take(&mut v);
    assert_eq!(moved, SLICE);
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vec_swap_with() {
    let mut a = SimpleVec::<usize>::from_slice(SLICE);
    let mut b = SimpleVec::<usize>::with_capacity(9);
    b.push_back(42);
    let (pa, pb) = (a.as_ptr(), b.as_ptr());
    a.swap_with(&mut b);
    assert_eq!(a, [42]);
    assert_eq!(a.capacity(), 9);
    assert_eq!(a.as_ptr(), pb);
    assert_eq!(b, SLICE);
    assert_eq!(b.capacity(), SLICE.len());
    assert_eq!(b.as_ptr(), pa);
}

#[test]
fn vec_compare() {
    let a = simple_vec![1, 2, 3];
    let b = simple_vec![1, 2, 3];
    let prefix = simple_vec![1, 2];
    assert_eq!(a, b);
    assert!(prefix < a);
    assert!(prefix <= a);
    assert!(a > prefix);
    assert!(a >= b);
    assert!(simple_vec![1, 3] > a);
    assert_ne!(a, prefix);
    assert_eq!(a.cmp(&b), core::cmp::Ordering::Equal);
    assert_eq!(a, vec![1, 2, 3]);
    assert_eq!(vec![1, 2, 3], a);
    assert_eq!(&[1, 2, 3][..], a);
}

#[test]
fn vec_compare_ignores_capacity() {
    let mut a = SimpleVec::<usize>::with_capacity(20);
    a.extend_from_slice(&[1, 2]);
    let mut b = simple_vec![1usize, 2, 3, 4];
    b.resize(2);
    assert_eq!(a, b);
}

#[test]
fn vec_iter_mut() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    for item in &mut v {
        *item *= 2;
    }
    let doubled: std::vec::Vec<usize> = v.iter().copied().collect();
    assert_eq!(doubled, [2, 4, 6, 8, 10]);
}

#[test]
fn vec_into_iter() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    v.resize(4);
    let mut iter = v.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.as_slice(), &[1, 2, 3]);
    assert_eq!(iter.collect::<std::vec::Vec<_>>(), [1, 2, 3]);
}

#[test]
fn vec_into_iter_drops_remaining() {
    let drops = Rc::new(Cell::new(0));
    let mut v = SimpleVec::<_>::from([
        Counted::new(&drops),
        Counted::new(&drops),
        Counted::new(&drops),
    ]);
    v.resize(2);
    let mut iter = v.into_iter();
    drop(iter.next());
    assert_eq!(drops.get(), 1);
    drop(iter);
    // the stale value in the spare slot is released with the buffer
    assert_eq!(drops.get(), 3);
}

#[test]
fn vec_into_std_vec() {
    let mut v = SimpleVec::<usize>::from_slice(SLICE);
    v.resize(3);
    let std_vec: std::vec::Vec<usize> = v.into();
    assert_eq!(std_vec, [1, 2, 3]);
}

#[test]
fn vec_try_push_failure_returns_value() {
    let mut v = SimpleVec::<u64, _>::new_in(LimitAlloc { limit: 16 });
    v.push_back(1);
    v.push_back(2);
    assert_eq!(v.capacity(), 2);
    let err = v.try_push_back(3).unwrap_err();
    assert_eq!(err.error(), &StorageError::AllocError(Layout::array::<u64>(4).unwrap()));
    assert_eq!(err.into_value(), 3);
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 2);
}

#[test]
fn vec_try_insert_failure_unchanged() {
    let mut v = SimpleVec::<u64, _>::try_from_slice_in(&[1, 2], LimitAlloc { limit: 16 }).unwrap();
    let err = v.try_insert(1, 9).unwrap_err();
    assert_eq!(err.into_value(), 9);
    assert_eq!(v, [1, 2]);
    assert!(v.try_resize(3).is_err());
    assert!(v.try_reserve(3).is_err());
    assert!(v.try_extend_from_slice(&[3]).is_err());
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 2);
}

#[test]
fn vec_capacity_overflow() {
    let mut v = SimpleVec::<u64>::new();
    assert!(matches!(
        v.try_reserve(usize::MAX),
        Err(StorageError::LayoutError(_))
    ));
    assert!(v.is_empty());
}

#[test]
fn vec_zst() {
    let mut v = SimpleVec::<()>::new();
    for _ in 0..10 {
        v.push_back(());
    }
    assert_eq!(v.len(), 10);
    v.erase(3);
    assert_eq!(v.len(), 9);
    assert_eq!(v.into_iter().count(), 9);
}

#[test]
fn vec_debug() {
    let mut v = simple_vec![1, 2, 3];
    v.resize(2);
    assert_eq!(format!("{:?}", v), "[1, 2]");
}

#[cfg(feature = "allocator-api2")]
#[test]
fn vec_into_allocator_api2_vec() {
    let drops = Rc::new(Cell::new(0));
    let mut v = SimpleVec::<_>::from([Counted::new(&drops), Counted::new(&drops)]);
    v.resize(1);
    let converted: allocator_api2::vec::Vec<Counted, Global> = v.into();
    // the truncated value is dropped during conversion
    assert_eq!(drops.get(), 1);
    assert_eq!(converted.len(), 1);
    assert_eq!(converted.capacity(), 2);
    drop(converted);
    assert_eq!(drops.get(), 2);
}
