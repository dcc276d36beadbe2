//! Merging a chain of sorted queues into the first one.
//!
//! All queues in a chain must share one storage. Moving a whole queue is a
//! single O(1) splice, so the cost is dominated by the final sort.

use crate::link::Ring;
use crate::{Index, Node, Queue, SortOrder, Storage};

/// A queue registered in a merge chain.
///
/// Does not own the queue's nodes (the storage does); it pairs the handle
/// with a caller-visible identifier and the size last recorded for it.
#[derive(Debug)]
pub struct QueueContext<Idx: Index = u32> {
    /// The queue itself.
    pub queue: Queue<Idx>,
    /// Element count as of the last [`merge`] or [`QueueContext::refresh_size`].
    pub size: usize,
    /// Caller-chosen identifier.
    pub id: usize,
}

impl<Idx: Index> QueueContext<Idx> {
    /// Wraps `queue`, recording its current size.
    pub fn new<S>(storage: &S, queue: Queue<Idx>, id: usize) -> Self
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        let size = queue.size(storage);
        Self { queue, size, id }
    }

    /// Recounts the queue and stores the result in `size`.
    pub fn refresh_size<S>(&mut self, storage: &S) -> usize
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        self.size = self.queue.size(storage);
        self.size
    }
}

/// Merges every queue of `chain` into the first one, sorted by `order`.
///
/// Each queue after the first is spliced onto the first in chain order and
/// left empty with `size == 0`; the first context's `size` becomes the total.
/// Unless the chain held a single queue, the combined queue is then sorted.
/// Inputs are expected to be sorted in `order` already; this is not checked.
///
/// Returns the total element count, 0 for an empty chain or a dead first
/// queue. Dead queues later in the chain are skipped.
///
/// ```
/// use nexus_ring::{BoxedRingStorage, Queue, QueueContext, SortOrder, merge};
///
/// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(16);
/// let mut chain = Vec::new();
/// for (id, values) in [["1", "3", "5"], ["2", "4", "6"]].into_iter().enumerate() {
///     let mut queue = Queue::new(&mut storage).unwrap();
///     for v in values {
///         queue.insert_tail(&mut storage, v).unwrap();
///     }
///     chain.push(QueueContext::new(&storage, queue, id));
/// }
///
/// assert_eq!(merge(&mut storage, &mut chain, SortOrder::Ascending), 6);
/// assert_eq!(
///     chain[0].queue.iter(&storage).collect::<Vec<_>>(),
///     ["1", "2", "3", "4", "5", "6"]
/// );
/// assert!(chain[1].queue.is_empty(&storage));
/// ```
pub fn merge<S, Idx>(storage: &mut S, chain: &mut [QueueContext<Idx>], order: SortOrder) -> usize
where
    Idx: Index,
    S: Storage<Node<Idx>, Index = Idx>,
{
    let Some((first, rest)) = chain.split_first_mut() else {
        return 0;
    };
    if !first.queue.is_live(storage) {
        return 0;
    }

    let target = first.queue.head();
    for ctx in rest.iter_mut() {
        if ctx.queue.is_live(storage) {
            storage.splice_tail(ctx.queue.head(), target);
        }
        ctx.size = 0;
    }

    let total = first.refresh_size(storage);
    if !rest.is_empty() {
        first.queue.sort(storage, order);
    }

    tracing::debug!(queues = rest.len() + 1, total, ?order, "merged queue chain");
    total
}
