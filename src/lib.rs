//! A priority queue that supports O(log n) removal and priority updates of
//! arbitrary keys.
//!
//! A plain array-based binary heap can only reach an arbitrary element by
//! linear scan. [`IndexedHeap`] pairs the heap array with a key-to-position
//! map kept in lockstep across every swap, so any key can be located,
//! removed, or re-prioritized in logarithmic time.
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::IndexedHeap;
//!
//! let mut heap = IndexedHeap::max_heap();
//! heap.push("build", 5).unwrap();
//! heap.push("test", 3).unwrap();
//! heap.push("deploy", 8).unwrap();
//!
//! assert_eq!(heap.peek(), Some((&"deploy", &8)));
//!
//! // Re-prioritize an arbitrary key without draining the heap.
//! heap.update(&"test", 100).unwrap();
//! assert_eq!(heap.pop(), Ok(("test", 100)));
//! ```

pub mod error;
pub mod indexed_heap;

pub use error::HeapError;
pub use indexed_heap::{IndexedHeap, OrdCompare};
