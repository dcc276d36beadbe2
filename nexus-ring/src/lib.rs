//! Sentinel-headed circular string queues over slab storage.
//!
//! A [`Queue`] is a circular doubly-linked list anchored by a sentinel node.
//! Nodes do not live behind pointers: every node, sentinels included, is a
//! slot in a [`Storage`] and links are stable slot indices. That keeps
//! splicing between queues O(1) and makes dangling links impossible to
//! create from safe code.
//!
//! ```text
//! Storage (BoxedStorage / slab)  - owns every node, hands out stable indices
//! Queue                          - index of a sentinel, nothing else
//! ```
//!
//! On top of the plain queue operations the crate provides in-place
//! algorithms that only rewire links:
//!
//! | Operation | Cost | Releases elements |
//! |-----------|------|-------------------|
//! | [`Queue::reverse`], [`Queue::swap_pairs`], [`Queue::reverse_k_groups`] | O(n) | no |
//! | [`Queue::delete_duplicates`], [`Queue::delete_middle`] | O(n) | yes |
//! | [`Queue::monotonic_filter`] | O(n), one pass from the tail | yes |
//! | [`Queue::sort`] | O(n log n), stable, no recursion | no |
//! | [`merge`] | O(1) per queue + one sort | no |
//!
//! # Quick Start
//!
//! ```
//! use nexus_ring::{BoxedRingStorage, Queue, SortOrder};
//!
//! // One storage, sized up front: sentinel + elements.
//! let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
//! let mut queue = Queue::new(&mut storage).unwrap();
//!
//! for v in ["cherry", "apple", "banana"] {
//!     queue.insert_tail(&mut storage, v).unwrap();
//! }
//!
//! queue.sort(&mut storage, SortOrder::Ascending);
//! assert_eq!(queue.iter(&storage).collect::<Vec<_>>(), ["apple", "banana", "cherry"]);
//!
//! let first = queue.remove_head(&mut storage).unwrap();
//! assert_eq!(first.value(), "apple");
//!
//! queue.free(&mut storage);
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! A queue must always be used with the storage it was created in. A handle
//! whose sentinel is not live in the storage passed in behaves as an absent
//! queue (no-op mutators, zero-sized queries).
//!
//! # Storage Options
//!
//! | Storage | Capacity | Insert when exhausted |
//! |---------|----------|-----------------------|
//! | [`BoxedRingStorage`] | Fixed (runtime) | [`InsertError::Full`] |
//! | `SlabRingStorage` | Growable | never fails |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab` and `SlabRingStorage`

#![warn(missing_docs)]

mod element;
mod error;
mod filter;
mod index;
mod link;
mod merge;
mod queue;
mod sort;
mod storage;
mod transform;

#[cfg(test)]
mod testing;

pub use element::Element;
pub use error::InsertError;
pub use filter::Direction;
pub use index::Index;
pub use link::{Link, Node};
pub use merge::{QueueContext, merge};
pub use queue::{Iter, Queue};
pub use sort::SortOrder;
pub use storage::{BoxedStorage, Full, Storage};

/// Fixed-capacity node storage for queues.
pub type BoxedRingStorage<Idx = u32> = BoxedStorage<Node<Idx>, Idx>;

/// Growable node storage for queues backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabRingStorage = slab::Slab<Node<usize>>;
