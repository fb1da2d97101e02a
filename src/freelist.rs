//! Free-list index (component C3).
//!
//! Two policies implement [`FreeListIndex`] over the same block layout:
//! [`SegregatedFreeList`], the production index with 29 size-class buckets
//! stored in-band in the heap's bucket-head array, and [`ExplicitFreeList`],
//! a single LIFO list kept for callers (and tests) that want a simpler,
//! O(n)-search policy to cross-check the segregated index's behavior
//! against.
//!
//! Neither implementation reads or writes a block's allocated bit; callers
//! must clear it before `insert` and must pair `remove` with a transition
//! to allocated.

use crate::heap::{BUCKET_COUNT, Heap};
use crate::region::Region;
use crate::{align::WSIZE, block};

/// A policy for tracking free blocks and finding one that fits a request.
pub trait FreeListIndex<R: Region> {
  /// Default region-extension size when no fit is found, in bytes.
  const CHUNK: usize;

  /// Splice `bp` (already marked free in its header/footer, not yet
  /// linked anywhere) into the index.
  fn insert(&mut self, heap: &mut Heap<R>, bp: *mut u8);

  /// Unlink `bp` from the index. `bp` must currently be present.
  fn remove(&mut self, heap: &mut Heap<R>, bp: *mut u8);

  /// Find a free block of at least `size` bytes, if one exists.
  fn find_fit(&self, heap: &Heap<R>, size: usize) -> Option<*mut u8>;

  /// Visit every free block currently tracked by this index, in whatever
  /// order is convenient. Used only by the checker; never on a hot path.
  fn for_each(&self, heap: &Heap<R>, visit: &mut dyn FnMut(*mut u8));
}

/// Size-class bucket for a block whose total size is `words` 4-byte words.
///
/// Widths up to 32 words get one bucket per even width (`(words-4)/2`);
/// beyond that, buckets double in range, selected by
/// `15 + floor(log2(words / 64))` and clamped to the last bucket.
pub fn bucket_for(words: usize) -> usize {
  if words <= 32 {
    (words - 4) / 2
  } else {
    let shifted_log = words.ilog2() as i64 - 6;
    (15 + shifted_log).clamp(0, (BUCKET_COUNT - 1) as i64) as usize
  }
}

fn words_of(size: usize) -> usize {
  size / WSIZE
}

/// Production free-list index: 29 segregated LIFO buckets stored in-band
/// in the heap's bucket-head array. Holds no state of its own.
#[derive(Default, Clone, Copy)]
pub struct SegregatedFreeList;

impl<R: Region> FreeListIndex<R> for SegregatedFreeList {
  /// Matches the size-class spread the 29 buckets are built for.
  const CHUNK: usize = 2 * 1024 * 1024;

  fn insert(&mut self, heap: &mut Heap<R>, bp: *mut u8) {
    let bucket = bucket_for(words_of(unsafe { block::size(bp) }));
    let head = heap.bucket_head(bucket);
    unsafe {
      block::set_prev_link(bp, 0);
      block::set_next_link(bp, head);
      if head != 0 {
        let head_bp = heap.ptr_at(head);
        block::set_prev_link(head_bp, heap.offset_of(bp));
      }
    }
    heap.set_bucket_head(bucket, heap.offset_of(bp));
  }

  fn remove(&mut self, heap: &mut Heap<R>, bp: *mut u8) {
    let bucket = bucket_for(words_of(unsafe { block::size(bp) }));
    let prev = unsafe { block::prev_link(bp) };
    let next = unsafe { block::next_link(bp) };
    if prev != 0 {
      let prev_bp = heap.ptr_at(prev);
      unsafe { block::set_next_link(prev_bp, next) };
    } else {
      heap.set_bucket_head(bucket, next);
    }
    if next != 0 {
      let next_bp = heap.ptr_at(next);
      unsafe { block::set_prev_link(next_bp, prev) };
    }
  }

  fn find_fit(&self, heap: &Heap<R>, size: usize) -> Option<*mut u8> {
    let start = bucket_for(words_of(size));
    for bucket in start..BUCKET_COUNT {
      let mut offset = heap.bucket_head(bucket);
      while offset != 0 {
        let bp = heap.ptr_at(offset);
        if unsafe { block::size(bp) } >= size {
          return Some(bp);
        }
        offset = unsafe { block::next_link(bp) };
      }
    }
    None
  }

  fn for_each(&self, heap: &Heap<R>, visit: &mut dyn FnMut(*mut u8)) {
    for bucket in 0..BUCKET_COUNT {
      let mut offset = heap.bucket_head(bucket);
      while offset != 0 {
        let bp = heap.ptr_at(offset);
        visit(bp);
        offset = unsafe { block::next_link(bp) };
      }
    }
  }
}

/// Secondary free-list index: a single LIFO list, searched first-fit from
/// the head. Kept for callers who want the simpler O(n) policy and for
/// cross-checking the segregated index in tests.
#[derive(Default, Clone, Copy)]
pub struct ExplicitFreeList {
  root: u32,
}

impl<R: Region> FreeListIndex<R> for ExplicitFreeList {
  const CHUNK: usize = 4 * 1024;

  fn insert(&mut self, heap: &mut Heap<R>, bp: *mut u8) {
    let head = self.root;
    unsafe {
      block::set_prev_link(bp, 0);
      block::set_next_link(bp, head);
      if head != 0 {
        let head_bp = heap.ptr_at(head);
        block::set_prev_link(head_bp, heap.offset_of(bp));
      }
    }
    self.root = heap.offset_of(bp);
  }

  fn remove(&mut self, heap: &mut Heap<R>, bp: *mut u8) {
    let prev = unsafe { block::prev_link(bp) };
    let next = unsafe { block::next_link(bp) };
    if prev != 0 {
      let prev_bp = heap.ptr_at(prev);
      unsafe { block::set_next_link(prev_bp, next) };
    } else {
      self.root = next;
    }
    if next != 0 {
      let next_bp = heap.ptr_at(next);
      unsafe { block::set_prev_link(next_bp, prev) };
    }
  }

  fn find_fit(&self, heap: &Heap<R>, size: usize) -> Option<*mut u8> {
    let mut offset = self.root;
    while offset != 0 {
      let bp = heap.ptr_at(offset);
      if unsafe { block::size(bp) } >= size {
        return Some(bp);
      }
      offset = unsafe { block::next_link(bp) };
    }
    None
  }

  fn for_each(&self, heap: &Heap<R>, visit: &mut dyn FnMut(*mut u8)) {
    let mut offset = self.root;
    while offset != 0 {
      let bp = heap.ptr_at(offset);
      visit(bp);
      offset = unsafe { block::next_link(bp) };
    }
  }
}
