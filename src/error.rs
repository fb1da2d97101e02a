//! Error types (component C9).
//!
//! The four hot-path operations (`allocate`, `free`, `reallocate`, `zalloc`)
//! follow the classical C allocator contract of a null return on failure —
//! they never return `Result`. `OutOfMemory` exists for the one call site
//! that can fail observably at construction time, and for the private
//! helpers inside `Heap` that want a typed error to propagate with `?`
//! before translating it to null at the public boundary.

use thiserror::Error;

/// The managed region could not supply the bytes requested.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("region exhausted: failed to extend the heap")]
pub struct OutOfMemory;
