use std::ptr;

use rallocator::{Allocator, SegregatedFreeList, VecRegion};

fn new_allocator() -> Allocator<VecRegion, SegregatedFreeList> {
  Allocator::new(VecRegion::new(1 << 20)).unwrap()
}

#[test]
fn allocate_zero_is_null() {
  let mut a = new_allocator();
  assert!(a.allocate(0).is_null());
}

#[test]
fn free_of_null_is_a_noop() {
  let mut a = new_allocator();
  a.free(ptr::null_mut());
  a.check("free_of_null_is_a_noop");
}

#[test]
fn reallocate_null_behaves_like_allocate() {
  let mut a = new_allocator();
  let p = a.reallocate(ptr::null_mut(), 48);
  assert!(!p.is_null());
}

#[test]
fn reallocate_to_zero_frees_and_returns_null() {
  let mut a = new_allocator();
  let p = a.allocate(48);
  assert!(a.reallocate(p, 0).is_null());
  a.check("reallocate_to_zero_frees_and_returns_null");
}

#[test]
fn zalloc_overflow_returns_null() {
  let mut a = new_allocator();
  assert!(a.zalloc(usize::MAX, 2).is_null());
  a.check("zalloc_overflow_returns_null");
}

#[test]
fn zalloc_zeroes_every_byte() {
  let mut a = new_allocator();
  let p = a.zalloc(16, 4);
  assert!(!p.is_null());
  unsafe {
    for i in 0..64 {
      assert_eq!(*p.add(i), 0);
    }
  }
  a.free(p);
}
