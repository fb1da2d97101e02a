//! Coalescer (component C4).
//!
//! Merges a just-freed block with free neighbors using the boundary tags,
//! updating whichever index is in use. Never inserts the result; the caller
//! (either `Allocator::free` or the post-extend path of `Allocator::allocate`)
//! decides what happens to the merged block next.

use crate::block;
use crate::freelist::FreeListIndex;
use crate::heap::Heap;
use crate::region::Region;

/// Merge `bp` — already marked free in its own header/footer, not yet
/// linked into any index — with an adjacent free predecessor and/or
/// successor. Returns the payload pointer of the (possibly larger)
/// resulting free block.
///
/// # Safety
/// `bp` must be a valid payload pointer whose header/footer are already
/// up to date (allocated bit cleared) and whose neighbors' headers/footers
/// are valid.
pub unsafe fn coalesce<R: Region, I: FreeListIndex<R>>(heap: &mut Heap<R>, index: &mut I, bp: *mut u8) -> *mut u8 {
  unsafe {
    // The prologue's footer always reads as allocated, so a block sitting
    // right after it sees `prev_alloc == true` with no special case.
    let prev_alloc = block::is_alloc(block::prev_block(bp));
    let next_alloc = block::is_alloc(block::next_block(bp));
    let size = block::size(bp);

    match (prev_alloc, next_alloc) {
      (true, true) => {
        log::trace!("coalesce: {bp:p} has no free neighbors");
        bp
      }
      (true, false) => {
        let next = block::next_block(bp);
        let merged = size + block::size(next);
        index.remove(heap, next);
        block::set_block(bp, merged, false);
        log::trace!("coalesce: merged {bp:p} with right neighbor, new size {merged}");
        bp
      }
      (false, true) => {
        let prev = block::prev_block(bp);
        let merged = block::size(prev) + size;
        index.remove(heap, prev);
        block::set_block(prev, merged, false);
        log::trace!("coalesce: merged {bp:p} with left neighbor {prev:p}, new size {merged}");
        prev
      }
      (false, false) => {
        let prev = block::prev_block(bp);
        let next = block::next_block(bp);
        let merged = block::size(prev) + size + block::size(next);
        index.remove(heap, prev);
        index.remove(heap, next);
        block::set_block(prev, merged, false);
        log::trace!("coalesce: merged {bp:p} with both neighbors, new size {merged}");
        prev
      }
    }
  }
}
