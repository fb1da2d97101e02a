//! Raw header/footer/link primitives (component C1).
//!
//! Every byte these functions touch lies outside of any user-owned buffer:
//! header words, footer words, and (for free blocks) the two link words. A
//! block is simultaneously "an allocated payload container" and "a free-list
//! node", so nothing here is expressed through a typed `#[repr(C)]` overlay —
//! only raw pointer arithmetic and unaligned word accesses, which is the only
//! way to avoid implying exclusive typed access the allocator cannot prove.
//!
//! All addresses here are "payload pointers" (`bp`): the address one word
//! past a block's header, which is also the address returned to callers of
//! `allocate`.

use crate::align::{DSIZE, WSIZE};
use core::ptr;

const ALLOC_BIT: u32 = 0x1;
const SIZE_MASK: u32 = !0x7;

#[inline]
pub(crate) unsafe fn read_word(addr: *mut u8) -> u32 {
  unsafe { ptr::read_unaligned(addr.cast()) }
}

#[inline]
pub(crate) unsafe fn write_word(addr: *mut u8, value: u32) {
  unsafe { ptr::write_unaligned(addr.cast(), value) }
}

/// Pack a size (a multiple of 8, or 0 for the zero-sized epilogue) and an
/// allocated flag into one header/footer word.
pub const fn pack(size: usize, alloc: bool) -> u32 {
  (size as u32 & SIZE_MASK) | (alloc as u32)
}

/// Address of `bp`'s header word (one word before the payload).
pub fn header_addr(bp: *mut u8) -> *mut u8 {
  unsafe { bp.sub(WSIZE) }
}

/// Size encoded in the header/footer word at `word_addr`.
///
/// # Safety
/// `word_addr` must point at a live header or footer word inside a managed
/// region.
pub unsafe fn size_at(word_addr: *mut u8) -> usize {
  unsafe { (read_word(word_addr) & SIZE_MASK) as usize }
}

/// Allocated bit encoded in the header/footer word at `word_addr`.
///
/// # Safety
/// Same as [`size_at`].
pub unsafe fn alloc_at(word_addr: *mut u8) -> bool {
  unsafe { read_word(word_addr) & ALLOC_BIT != 0 }
}

/// Size of the block whose payload pointer is `bp`.
///
/// # Safety
/// `bp` must be a valid payload pointer into a managed region.
pub unsafe fn size(bp: *mut u8) -> usize {
  unsafe { size_at(header_addr(bp)) }
}

/// Whether the block whose payload pointer is `bp` is allocated.
///
/// # Safety
/// Same as [`size`].
pub unsafe fn is_alloc(bp: *mut u8) -> bool {
  unsafe { alloc_at(header_addr(bp)) }
}

/// Address of the footer word for a block at `bp` of the given `size`.
///
/// Takes `size` explicitly, rather than reading the header, so a block's
/// header and footer can be written in either order while its size is
/// changing (e.g. while splitting).
pub fn footer_addr_for(bp: *mut u8, size: usize) -> *mut u8 {
  unsafe { bp.add(size - DSIZE) }
}

/// Address of the footer word for the block currently at `bp`.
///
/// # Safety
/// `bp` must be a valid payload pointer whose header is already up to date.
pub unsafe fn footer_addr(bp: *mut u8) -> *mut u8 {
  unsafe { footer_addr_for(bp, size(bp)) }
}

/// Write matching header and footer words for a block of `size` bytes
/// starting at `bp`.
///
/// # Safety
/// `[header_addr(bp), bp + size)` must lie inside the managed region.
pub unsafe fn set_block(bp: *mut u8, size: usize, alloc: bool) {
  unsafe {
    write_word(header_addr(bp), pack(size, alloc));
    write_word(footer_addr_for(bp, size), pack(size, alloc));
  }
}

/// Write a single header word with no matching footer.
///
/// Used only for the zero-sized epilogue sentinel, which has no footer and
/// no payload to speak of.
///
/// # Safety
/// `word_addr` must point at 4 live bytes inside the managed region.
pub unsafe fn set_header_word(word_addr: *mut u8, size: usize, alloc: bool) {
  unsafe { write_word(word_addr, pack(size, alloc)) }
}

/// Payload pointer of the block immediately to the right of `bp`.
///
/// # Safety
/// `bp`'s header must be valid and the result must still lie inside the
/// managed region (true for every block up to and including the epilogue).
pub unsafe fn next_block(bp: *mut u8) -> *mut u8 {
  unsafe { bp.add(size(bp)) }
}

/// Payload pointer of the block immediately to the left of `bp`, found via
/// its footer word (the boundary tag).
///
/// # Safety
/// The DSIZE bytes immediately before `bp` must hold a valid footer word,
/// i.e. `bp` must not be the very first block in the region (the prologue
/// has no predecessor).
pub unsafe fn prev_block(bp: *mut u8) -> *mut u8 {
  unsafe {
    let prev_footer = bp.sub(DSIZE);
    let prev_size = size_at(prev_footer);
    bp.sub(prev_size)
  }
}

/// Read this free block's `prev` free-list link: a region-relative 32-bit
/// offset, 0 meaning "none".
///
/// # Safety
/// `bp` must address a free block (the link words alias user payload once
/// allocated).
pub unsafe fn prev_link(bp: *mut u8) -> u32 {
  unsafe { read_word(bp) }
}

/// Read this free block's `next` free-list link.
///
/// # Safety
/// Same as [`prev_link`].
pub unsafe fn next_link(bp: *mut u8) -> u32 {
  unsafe { read_word(bp.add(WSIZE)) }
}

/// # Safety
/// Same as [`prev_link`].
pub unsafe fn set_prev_link(bp: *mut u8, value: u32) {
  unsafe { write_word(bp, value) }
}

/// # Safety
/// Same as [`prev_link`].
pub unsafe fn set_next_link(bp: *mut u8, value: u32) {
  unsafe { write_word(bp.add(WSIZE), value) }
}
