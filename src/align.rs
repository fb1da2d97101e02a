//! Alignment and sizing constants shared by every layer of the block manager.

/// Size of one machine word, i.e. the size of a header, footer, or free-list
/// link field (bytes).
pub const WSIZE: usize = 4;

/// Double-word size: the allocator's base alignment unit, and the unit block
/// sizes are always rounded up to (bytes).
pub const DSIZE: usize = 8;

/// Smallest possible block: header + footer + two free-list link words.
pub const MIN_BLOCK: usize = 16;

/// Round `n` up to the next multiple of `alignment` (`alignment` must be a
/// power of two).
pub const fn align_up(n: usize, alignment: usize) -> usize {
  (n + alignment - 1) & !(alignment - 1)
}

/// Adjust a user-requested payload size to an aligned block size with room
/// for a header and a footer: `max(MIN_BLOCK, DSIZE * ceil((n + DSIZE) / DSIZE))`.
///
/// Returns 0 for `n == 0`; callers treat that as "ignore this request"
/// rather than rounding it up to [`MIN_BLOCK`].
pub const fn block_size_for(n: usize) -> usize {
  if n == 0 {
    return 0;
  }
  let padded = align_up(n + DSIZE, DSIZE);
  if padded < MIN_BLOCK { MIN_BLOCK } else { padded }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn align_up_rounds_to_next_multiple() {
    assert_eq!(align_up(1, 8), 8);
    assert_eq!(align_up(8, 8), 8);
    assert_eq!(align_up(9, 8), 16);
    assert_eq!(align_up(0, 8), 0);
  }

  #[test]
  fn block_size_for_enforces_the_minimum() {
    assert_eq!(block_size_for(0), 0);
    assert_eq!(block_size_for(1), MIN_BLOCK);
    assert_eq!(block_size_for(8), MIN_BLOCK);
    // 9 bytes of payload need a 9+8=17 byte block, rounded up to 24.
    assert_eq!(block_size_for(9), 24);
    assert_eq!(block_size_for(16), 24);
    assert_eq!(block_size_for(17), 32);
  }

  #[test]
  fn block_size_for_is_always_a_multiple_of_dsize() {
    for n in 0..256 {
      assert_eq!(block_size_for(n) % DSIZE, 0);
    }
  }
}
