//! Fit search (component C5).
//!
//! A thin seam over [`FreeListIndex::find_fit`]: the index owns the search
//! order (segregated-bucket walk vs. single-list scan), this module is
//! simply the named call site the allocator's `allocate` path goes through,
//! kept separate so the policy boundary documented in the component design
//! stays visible in the module layout.

use crate::freelist::FreeListIndex;
use crate::heap::Heap;
use crate::region::Region;

/// Locate a free block of at least `size` bytes, or `None` if the index has
/// none. `size` must already be an aligned block size (≥ 16, multiple of 8).
pub fn find_fit<R: Region, I: FreeListIndex<R>>(heap: &Heap<R>, index: &I, size: usize) -> Option<*mut u8> {
  index.find_fit(heap, size)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::align::WSIZE;
  use crate::block;
  use crate::freelist::SegregatedFreeList;
  use crate::region::VecRegion;

  #[test]
  fn find_fit_returns_none_on_an_empty_index() {
    let heap = Heap::new(VecRegion::new(4096)).unwrap();
    let index = SegregatedFreeList;
    assert!(find_fit(&heap, &index, 32).is_none());
  }

  #[test]
  fn find_fit_finds_an_inserted_block() {
    let mut heap = Heap::new(VecRegion::new(4096)).unwrap();
    let mut index = SegregatedFreeList;
    let bp = heap.extend(16).unwrap();
    unsafe { block::set_block(bp, 16 * WSIZE, false) };
    index.insert(&mut heap, bp);

    assert_eq!(find_fit(&heap, &index, 16 * WSIZE), Some(bp));
    assert!(find_fit(&heap, &index, 17 * WSIZE).is_none());
  }
}
