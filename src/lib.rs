//! # rallocator - A segregated-fit memory allocator
//!
//! This crate replaces the bump allocator this crate started life as with an
//! explicit, boundary-tagged block manager: free blocks are tracked in a
//! segregated-fit index, found blocks are split to size, and neighbors are
//! coalesced on free. The design follows the classical CS:APP allocator lab
//! layout rather than inventing a new one.
//!
//! ## Block layout
//!
//! ```text
//!   Allocated block:                Free block:
//!   ┌───────────────┐               ┌───────────────┐
//!   │ header (size|a)│               │ header (size|a)│
//!   ├───────────────┤               ├───────────────┤
//!   │                │               │  prev link    │
//!   │   payload      │               ├───────────────┤
//!   │                │               │  next link    │
//!   ├───────────────┤               │      ...       │
//!   │ footer (size|a)│               ├───────────────┤
//!   └───────────────┘               │ footer (size|a)│
//!                                    └───────────────┘
//! ```
//!
//! Every block carries a header and footer word encoding its size and
//! allocated bit; the footer lets [`block::prev_block`] step backwards
//! without a separate index, and an 8-byte prologue plus a zero-sized
//! epilogue sentinel remove the first/last block edge cases from every
//! neighbor lookup.
//!
//! ## Crate structure
//!
//! ```text
//!   rallocator
//!   ├── align      - word/double-word sizes, alignment helpers
//!   ├── block      - header/footer encoding, neighbor and link accessors (internal)
//!   ├── region     - Region trait: SbrkRegion (sbrk-backed) and VecRegion (test double)
//!   ├── heap       - Region adapter: bucket-head array, prologue/epilogue, extend()
//!   ├── freelist   - FreeListIndex trait: SegregatedFreeList and ExplicitFreeList
//!   ├── coalesce   - four-case boundary-tag coalescing
//!   ├── fit        - find_fit: delegates to the configured index
//!   ├── place      - splits a found block to size, reinserts the remainder
//!   ├── error      - OutOfMemory
//!   ├── allocator  - Allocator<R, I> facade and the GlobalHeap GlobalAlloc wrapper
//!   └── checker    - cross-validates the region walk against the free-list index
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use rallocator::{Allocator, SbrkRegion, SegregatedFreeList};
//!
//! let region = SbrkRegion::new().expect("sbrk unavailable");
//! let mut allocator: Allocator<SbrkRegion, SegregatedFreeList> =
//!     Allocator::new(region).expect("initial heap extension failed");
//!
//! let p = allocator.allocate(64);
//! assert!(!p.is_null());
//! allocator.free(p);
//! ```
//!
//! ## As a `#[global_allocator]`
//!
//! ```rust,ignore
//! use rallocator::GlobalHeap;
//!
//! #[global_allocator]
//! static HEAP: GlobalHeap = GlobalHeap::new();
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded allocator, mutex-guarded only at the `GlobalAlloc`
//!   seam**: `Allocator` itself holds no lock; `GlobalHeap`'s `spin::Mutex`
//!   exists only to satisfy `GlobalAlloc`'s `Sync` bound.
//! - **Unix-only** in its `SbrkRegion` backing: requires `libc` and `sbrk`.
//! - **Never returns memory to the OS**: freed blocks are coalesced and
//!   reused, but the region never shrinks.

pub mod align;
mod block;
pub mod region;
pub mod heap;
pub mod freelist;
pub mod coalesce;
pub mod fit;
pub mod place;
pub mod error;
pub mod allocator;
pub mod checker;

pub use allocator::{Allocator, GlobalHeap};
pub use error::OutOfMemory;
pub use freelist::{ExplicitFreeList, FreeListIndex, SegregatedFreeList};
pub use heap::Heap;
pub use region::{Region, SbrkRegion, VecRegion};
