//! A mergeable priority queue backed by a Fibonacci heap.
//!
//! This crate provides a single data structure, [`FibonacciHeap`], keyed by
//! **value** rather than by opaque handle: every entry pairs a unique value
//! with a priority, and later mutations (priority increases, arbitrary
//! deletes) address the entry by its value through an internal hash index.
//!
//! # Operations
//!
//! | Operation | Amortized cost |
//! |---|---|
//! | `push` | O(1) |
//! | `peek` | O(1) |
//! | `increase_priority` | O(1) |
//! | `pop` | O(log n) |
//! | `delete` | O(log n) |
//! | `meld` | O(min(n, m)) disjointness scan, O(1) splice |
//!
//! The ordering is supplied by the caller as a strict connected relation
//! `higher(x, y)` together with a reserved *sentinel* priority that outranks
//! everything else; see [`FibonacciHeap::new`]. With `|a, b| a < b` the heap
//! is a min-queue, with `|a, b| a > b` a max-queue.
//!
//! # Example
//!
//! ```rust
//! use fibqueue::FibonacciHeap;
//!
//! # fn main() -> Result<(), fibqueue::HeapError> {
//! let mut queue = FibonacciHeap::new(|a: &i64, b: &i64| a < b, i64::MIN);
//! queue.push("reindex", 20)?;
//! queue.push("compact", 5)?;
//! queue.push("flush", 40)?;
//!
//! queue.increase_priority(&"flush", 1)?;
//! assert_eq!(queue.pop()?, "flush");
//! assert_eq!(queue.pop()?, "compact");
//!
//! queue.delete(&"reindex")?;
//! assert!(queue.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! The heap is a plain single-threaded container: no interior locking, no
//! persistence, no ordering guarantee between entries of equal priority.

pub mod error;
pub mod heap;
mod node;

pub use error::HeapError;
pub use heap::FibonacciHeap;
