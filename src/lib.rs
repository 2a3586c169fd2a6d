//! # xheap - a minimal split/coalesce heap manager
//!
//! [`Heap`] hands out word-aligned memory from a single growable arena and
//! takes it back through [`Heap::release`]. The arena is overlaid with
//! variable-size blocks kept in address order: allocation runs a first-fit
//! scan and splits oversized free blocks, release coalesces the block with a
//! free neighbor, and when nothing fits the arena grows at its high end
//! through a [`Morecore`] collaborator. Memory is never returned to the
//! system.
//!
//! Every allocation is preceded in the arena by a fixed-size header, and the
//! pointer handed to the caller is the first byte after it:
//!
//! ```text
//! arena base
//! v
//! +--------+------------------+--------+------------------+- - -
//! | header |      payload     | header |      payload     |
//! +--------+------------------+--------+------------------+- - -
//!          ^ returned pointer          ^ returned pointer
//! ```
//!
//! Recovering the block from a returned pointer is the inverse constant-time
//! step, checked against the header's seal, so releasing a foreign pointer
//! or releasing twice is rejected instead of corrupting the arena.
//!
//! ## Quick start
//!
//! ```rust
//! use xheap::{FixedArena, Heap};
//!
//! let mut heap = Heap::new(FixedArena::new(4096));
//!
//! let ptr = heap.allocate(24).expect("arena has room");
//! unsafe { ptr.as_ptr().write_bytes(0, 24) };
//! heap.release(ptr.as_ptr());
//! ```
//!
//! [`SystemBreak`] grows the arena on the real process heap instead. A
//! `Heap` is strictly single threaded; share one only behind an exclusive
//! lock.

mod block;
mod heap;
mod list;
mod morecore;
mod utils;

pub use heap::Heap;
pub use morecore::{FixedArena, Morecore, SystemBreak};
