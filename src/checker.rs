//! Checker (component C8).
//!
//! Walks the region from the prologue to the epilogue, independently walks
//! the free-list index, and cross-validates both against every invariant in
//! the data model. Never invoked from `allocate`/`free`/`reallocate`/
//! `zalloc` themselves — it is a caller-driven diagnostic, not part of the
//! hot path, and it never allocates.

use std::collections::HashSet;

use crate::align::{MIN_BLOCK, WSIZE};
use crate::block;
use crate::freelist::FreeListIndex;
use crate::heap::Heap;
use crate::region::Region;

fn fail(tag: &str, invariant: &str) -> ! {
  log::error!("heap check '{tag}' failed: {invariant}");
  panic!("heap check '{tag}' failed: {invariant}");
}

/// Walk `heap`'s region and `index`'s free list, verifying every invariant
/// of the data model. Panics on the first violation found.
pub fn check<R: Region, I: FreeListIndex<R>>(heap: &Heap<R>, index: &I, tag: &str) {
  let mut region_free = HashSet::new();
  let mut total_size: usize = 0;
  let mut prev_was_free = false;

  let mut bp = heap.prologue();
  loop {
    let header = block::header_addr(bp);
    let size = unsafe { block::size_at(header) };
    if size == 0 {
      // The epilogue: header-only, always allocated.
      if !unsafe { block::alloc_at(header) } {
        fail(tag, "epilogue must be marked allocated");
      }
      break;
    }

    let alloc = unsafe { block::alloc_at(header) };
    let footer = block::footer_addr_for(bp, size);
    let footer_size = unsafe { block::size_at(footer) };
    let footer_alloc = unsafe { block::alloc_at(footer) };
    if size != footer_size || alloc != footer_alloc {
      fail(tag, "header and footer disagree on size or allocated bit");
    }

    let is_prologue = bp == heap.prologue();
    if !is_prologue && (size % 8 != 0 || size < MIN_BLOCK) {
      fail(tag, "block size is not a multiple of 8 and at least MIN_BLOCK");
    }

    if !alloc {
      if prev_was_free {
        fail(tag, "two adjacent free blocks were not coalesced");
      }
      region_free.insert(bp as usize);

      let prev_link = unsafe { block::prev_link(bp) };
      let next_link = unsafe { block::next_link(bp) };
      if prev_link != 0 {
        let linked = heap.ptr_at(prev_link);
        if unsafe { block::next_link(linked) } != heap.offset_of(bp) {
          fail(tag, "free-list back-pointer is not mutually consistent");
        }
      }
      if next_link != 0 {
        let linked = heap.ptr_at(next_link);
        if unsafe { block::prev_link(linked) } != heap.offset_of(bp) {
          fail(tag, "free-list back-pointer is not mutually consistent");
        }
      }
    }

    total_size += size;
    prev_was_free = !alloc;
    bp = unsafe { block::next_block(bp) };
  }

  let mut index_free = HashSet::new();
  index.for_each(heap, &mut |b| {
    index_free.insert(b as usize);
  });

  if region_free != index_free {
    fail(tag, "free blocks found walking the region don't match the free-list index");
  }

  let prefix = block::header_addr(heap.prologue()) as usize - heap.low() as usize;
  let region_span = heap.high() as usize - heap.low() as usize;
  if prefix + total_size + WSIZE != region_span {
    fail(tag, "sum of block sizes plus fixed overhead doesn't cover the whole region");
  }
}
