//! Region-extension primitive (component C2, trait half).
//!
//! The block manager never talks to the operating system directly; it asks
//! a `Region` for more bytes at the tail of a monotonically growing extent.
//! This crate ships two implementations: [`SbrkRegion`], which extends the
//! process break via `libc::sbrk`, and [`VecRegion`], a pinned in-memory
//! stand-in used by tests so the allocator's invariants can be exercised
//! without touching real process state.

use libc::{intptr_t, sbrk};

/// A monotonically growing byte source.
///
/// `extend` may only ever grow the region at its current tail; it must
/// never move or shrink bytes already handed out. `low`/`high` report the
/// current extent and must remain valid for the region's whole lifetime.
pub trait Region {
  /// Grow the region by `bytes` and return a pointer to the start of the
  /// newly available range, or `None` if the region could not grow.
  fn extend(&mut self, bytes: usize) -> Option<*mut u8>;

  /// Address of the first byte ever handed out by this region.
  fn low(&self) -> *mut u8;

  /// Address one past the last byte currently available.
  fn high(&self) -> *mut u8;
}

/// Production region backed by `libc::sbrk`.
///
/// Moves the process break forward on every `extend` call. Never shrinks
/// the break; a freed region is simply left idle for the allocator to
/// reuse, matching the classical C allocator's relationship with `sbrk`.
pub struct SbrkRegion {
  low: *mut u8,
  high: *mut u8,
}

impl SbrkRegion {
  /// Snapshot the current program break as the region's base.
  ///
  /// Returns `None` if `sbrk(0)` itself fails, which in practice only
  /// happens on platforms without a usable `brk`/`sbrk` pair.
  pub fn new() -> Option<Self> {
    let base = unsafe { sbrk(0) };
    if base as usize == usize::MAX {
      return None;
    }
    let base = base as *mut u8;
    Some(Self { low: base, high: base })
  }
}

impl Region for SbrkRegion {
  fn extend(&mut self, bytes: usize) -> Option<*mut u8> {
    let old_break = unsafe { sbrk(bytes as intptr_t) };
    if old_break as isize == -1 {
      return None;
    }
    let old_break = old_break as *mut u8;
    self.high = unsafe { old_break.add(bytes) };
    Some(old_break)
  }

  fn low(&self) -> *mut u8 {
    self.low
  }

  fn high(&self) -> *mut u8 {
    self.high
  }
}

/// In-memory region used by tests and doctests.
///
/// Backed by a fixed-capacity `Box<[u8]>` allocated up front and never
/// moved, so pointers handed out by `extend` stay valid for the region's
/// entire lifetime the same way a real heap's addresses do. `extend`
/// simply advances a cursor within that buffer and fails once the
/// pre-allocated capacity is exhausted.
pub struct VecRegion {
  buf: Box<[u8]>,
  used: usize,
}

impl VecRegion {
  /// Reserve `capacity` bytes up front. `extend` calls beyond this
  /// capacity return `None`, the same way a real OS eventually refuses
  /// to grow the process break.
  pub fn new(capacity: usize) -> Self {
    Self {
      buf: vec![0u8; capacity].into_boxed_slice(),
      used: 0,
    }
  }
}

impl Region for VecRegion {
  fn extend(&mut self, bytes: usize) -> Option<*mut u8> {
    if self.used + bytes > self.buf.len() {
      return None;
    }
    let ptr = unsafe { self.buf.as_mut_ptr().add(self.used) };
    self.used += bytes;
    Some(ptr)
  }

  fn low(&self) -> *mut u8 {
    self.buf.as_ptr() as *mut u8
  }

  fn high(&self) -> *mut u8 {
    unsafe { self.buf.as_ptr().add(self.used) as *mut u8 }
  }
}
