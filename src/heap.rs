//! Region adapter (component C2, heap half).
//!
//! `Heap<R>` turns a raw [`Region`] into the fixed layout the rest of the
//! block manager assumes: an in-band bucket-head array, a one-word alignment
//! pad, an 8-byte allocated prologue, and an always-present zero-sized
//! epilogue at the tail. Every call to [`Heap::extend`] slides the epilogue
//! forward and hands back the payload pointer of a brand new, uncoalesced
//! free block covering the extension.

use crate::align::{DSIZE, WSIZE};
use crate::block;
use crate::region::Region;

/// Number of segregated free-list buckets the in-band array reserves space
/// for, whether or not the chosen index actually uses them.
pub const BUCKET_COUNT: usize = 29;

/// One extra word after the real buckets keeps the array's byte length a
/// multiple of 8, so the classical padding-word/prologue/epilogue prefix
/// that follows stays 8-aligned regardless of the region's own alignment.
const BUCKET_ARRAY_WORDS: usize = BUCKET_COUNT + 1;
const BUCKET_ARRAY_BYTES: usize = BUCKET_ARRAY_WORDS * WSIZE;

/// Bytes reserved before the first real block: bucket array, plus the
/// classical four words (alignment pad, prologue header, prologue footer,
/// epilogue header).
pub const FIXED_OVERHEAD: usize = BUCKET_ARRAY_BYTES + 4 * WSIZE;

/// The region adapter: owns the `Region`, the bucket-head array, and the
/// running tail (the address of the current epilogue header).
pub struct Heap<R: Region> {
  region: R,
  base: *mut u8,
  prologue_bp: *mut u8,
  tail: *mut u8,
}

impl<R: Region> Heap<R> {
  /// Reserve the fixed overhead from `region` and write the bucket array,
  /// alignment pad, prologue, and initial (zero-sized) epilogue.
  ///
  /// Returns `None` if the region cannot supply [`FIXED_OVERHEAD`] bytes.
  pub fn new(mut region: R) -> Option<Self> {
    let base = region.extend(FIXED_OVERHEAD)?;

    for i in 0..BUCKET_COUNT {
      unsafe { block::write_word(base.add(i * WSIZE), 0) };
    }
    let align_pad = unsafe { base.add(BUCKET_ARRAY_BYTES) };
    unsafe { block::write_word(align_pad, 0) };

    let prologue_bp = unsafe { align_pad.add(2 * WSIZE) };
    unsafe { block::set_block(prologue_bp, DSIZE, true) };

    // The epilogue header is the last word of the reserved range, i.e.
    // `header_addr(next_block(prologue_bp))`: the prologue's own block
    // spans [prologue_bp - WSIZE, prologue_bp - WSIZE + DSIZE), so its
    // successor's header starts one word after `prologue_bp`.
    let tail = unsafe { prologue_bp.add(WSIZE) };
    unsafe { block::set_header_word(tail, 0, true) };

    log::debug!("heap initialised, fixed overhead {FIXED_OVERHEAD} bytes");
    Some(Self { region, base, prologue_bp, tail })
  }

  /// Grow the managed region by at least `words` 4-byte words (rounded up
  /// to an even count so the extension stays 8-aligned) and format the
  /// new bytes as one free block followed by a fresh epilogue.
  ///
  /// Returns the payload pointer of the new block, **uncoalesced** with
  /// whatever free block may already sit at the old tail; the caller is
  /// responsible for coalescing before inserting it into an index.
  pub fn extend(&mut self, words: usize) -> Option<*mut u8> {
    let words = if words % 2 != 0 { words + 1 } else { words };
    let bytes = words * WSIZE;

    let old_tail = self.tail;
    let bp = self.region.extend(bytes)?;
    debug_assert_eq!(bp, unsafe { old_tail.add(WSIZE) }, "region must grow contiguously at its tail");

    // The new block's header reuses the 4 bytes that held the old
    // epilogue header (`old_tail`) rather than consuming fresh bytes for
    // it; only the payload, footer, and new epilogue come from the
    // bytes `region.extend` just granted.
    unsafe { block::set_block(bp, bytes, false) };

    let new_epilogue = unsafe { bp.add(bytes - WSIZE) };
    unsafe { block::set_header_word(new_epilogue, 0, true) };
    self.tail = new_epilogue;

    log::debug!("heap extended by {bytes} bytes at {old_tail:p}");
    Some(bp)
  }

  /// Payload pointer of the prologue sentinel — the starting point for a
  /// left-to-right walk of the region's blocks.
  pub fn prologue(&self) -> *mut u8 {
    self.prologue_bp
  }

  /// Address of the current epilogue header — one past the last live
  /// block in the region.
  pub fn tail(&self) -> *mut u8 {
    self.tail
  }

  /// Base address of the in-band bucket-head array (also the region's
  /// lowest address).
  pub fn base(&self) -> *mut u8 {
    self.base
  }

  /// Read the head pointer (a region-relative offset, 0 = empty) of
  /// bucket `idx`.
  pub fn bucket_head(&self, idx: usize) -> u32 {
    debug_assert!(idx < BUCKET_COUNT);
    unsafe { block::read_word(self.base.add(idx * WSIZE)) }
  }

  /// Overwrite the head pointer of bucket `idx`.
  pub fn set_bucket_head(&mut self, idx: usize, value: u32) {
    debug_assert!(idx < BUCKET_COUNT);
    unsafe { block::write_word(self.base.add(idx * WSIZE), value) };
  }

  /// Encode a payload pointer as a region-relative offset for storage in
  /// a free-list link field.
  pub fn offset_of(&self, bp: *mut u8) -> u32 {
    (bp as usize - self.base as usize) as u32
  }

  /// Decode a region-relative offset back into a payload pointer. `0`
  /// is the sentinel for "no link" and must be checked by the caller
  /// before calling this.
  pub fn ptr_at(&self, offset: u32) -> *mut u8 {
    unsafe { self.base.add(offset as usize) }
  }

  /// Lowest address ever handed out by the underlying region.
  pub fn low(&self) -> *mut u8 {
    self.region.low()
  }

  /// Highest address currently available from the underlying region.
  pub fn high(&self) -> *mut u8 {
    self.region.high()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::region::VecRegion;

  #[test]
  fn new_heap_has_allocated_prologue_and_zero_epilogue() {
    let heap = Heap::new(VecRegion::new(4096)).unwrap();
    unsafe {
      assert_eq!(block::size(heap.prologue()), DSIZE);
      assert!(block::is_alloc(heap.prologue()));
      assert_eq!(block::size_at(heap.tail()), 0);
      assert!(block::alloc_at(heap.tail()));
    }
    for i in 0..BUCKET_COUNT {
      assert_eq!(heap.bucket_head(i), 0);
    }
  }

  #[test]
  fn extend_formats_a_free_block_and_moves_the_epilogue() {
    let mut heap = Heap::new(VecRegion::new(4096)).unwrap();
    let old_tail = heap.tail();
    let bp = heap.extend(64).unwrap();
    assert_eq!(bp, unsafe { old_tail.add(WSIZE) });
    unsafe {
      assert_eq!(block::size(bp), 64 * WSIZE);
      assert!(!block::is_alloc(bp));
      assert_eq!(block::size_at(heap.tail()), 0);
      assert!(block::alloc_at(heap.tail()));
    }
    assert_eq!(heap.tail(), unsafe { old_tail.add(64 * WSIZE) });
  }

  #[test]
  fn extend_rounds_odd_word_counts_up_to_even() {
    let mut heap = Heap::new(VecRegion::new(4096)).unwrap();
    let bp = heap.extend(5).unwrap();
    unsafe {
      assert_eq!(block::size(bp), 6 * WSIZE);
    }
  }

  #[test]
  fn bucket_head_round_trips() {
    let mut heap = Heap::new(VecRegion::new(4096)).unwrap();
    heap.set_bucket_head(3, 0xABCD);
    assert_eq!(heap.bucket_head(3), 0xABCD);
    assert_eq!(heap.bucket_head(4), 0);
  }
}
