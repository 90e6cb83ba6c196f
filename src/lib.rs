//! Addressable d-ary priority queue for Rust
//!
//! This crate provides [`DHeap`], a priority queue laid out as an implicit
//! d-ary tree in a flat vector, with:
//!
//! - **Configurable branching factor** `d >= 2` and **min or max ordering**,
//!   both fixed at construction
//! - **O(log_d n)** insert and **O(d log_d n)** extract-top
//! - **O(n)** bulk construction from an existing collection
//! - **Arbitrary removal and priority updates** by element equality (O(n),
//!   found with a linear scan; no position index is maintained)
//! - **Deterministic ties**: the leftmost child wins during a downward walk
//!
//! The [`pathfinding`] module uses the heap the way a shortest-path search
//! does: every node seeded at infinite cost, then lowered with `update`.
//!
//! The heap is a plain single-threaded value. Wrap it in a mutex if it must
//! be shared.
//!
//! # Example
//!
//! ```rust
//! use rust_dary_heap::{DHeap, HeapOrder};
//!
//! let mut heap = DHeap::from_parts(
//!     4,
//!     HeapOrder::Min,
//!     vec!["n0", "n1", "n2", "n3"],
//!     vec![u32::MAX; 4],
//! )
//! .unwrap();
//! heap.update(&"n2", 0).unwrap();
//! assert_eq!(heap.extract_top(), Ok("n2"));
//! assert_eq!(heap.len(), 3);
//! ```

pub mod config;
pub mod dheap;
pub mod error;
pub mod order;
pub mod pathfinding;

pub use config::HeapConfig;
pub use dheap::DHeap;
pub use error::{ConfigError, HeapError, HeapResult};
pub use order::HeapOrder;
