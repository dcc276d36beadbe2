//! Order-only transforms: whole reversal, pair swaps and k-group reversal.
//!
//! None of these allocate or release anything; they only rewire links.

use crate::link::Ring;
use crate::{Index, Node, Queue, Storage};

impl<Idx: Index> Queue<Idx> {
    /// Reverses the queue in place by swapping `next`/`prev` at every link,
    /// the sentinel included.
    pub fn reverse<S>(&mut self, storage: &mut S)
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if !self.is_live(storage) {
            return;
        }
        storage.ring_reverse(self.head());
    }

    /// Swaps every two adjacent elements.
    ///
    /// With an odd element count the last element stays where it is.
    ///
    /// ```
    /// use nexus_ring::{BoxedRingStorage, Queue};
    ///
    /// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
    /// let mut queue = Queue::new(&mut storage).unwrap();
    /// for v in ["1", "2", "3", "4", "5"] {
    ///     queue.insert_tail(&mut storage, v).unwrap();
    /// }
    ///
    /// queue.swap_pairs(&mut storage);
    /// assert_eq!(queue.iter(&storage).collect::<Vec<_>>(), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn swap_pairs<S>(&mut self, storage: &mut S)
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if self.is_empty(storage) {
            return;
        }

        let head = self.head();
        let mut node = storage.next_of(head);
        while node != head {
            let partner = storage.next_of(node);
            if partner == head {
                break;
            }
            storage.unlink(node);
            storage.link_after(node, partner);
            node = storage.next_of(node);
        }
    }

    /// Reverses each consecutive run of exactly `k` elements.
    ///
    /// A trailing run shorter than `k` keeps its order, so `k <= 1` or `k`
    /// larger than the queue is a no-op. Each run is closed into a ring of
    /// its own (its first node standing in for a sentinel), reversed, and
    /// spliced back between its outside neighbours.
    ///
    /// ```
    /// use nexus_ring::{BoxedRingStorage, Queue};
    ///
    /// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
    /// let mut queue = Queue::new(&mut storage).unwrap();
    /// for v in ["1", "2", "3", "4", "5"] {
    ///     queue.insert_tail(&mut storage, v).unwrap();
    /// }
    ///
    /// queue.reverse_k_groups(&mut storage, 3);
    /// assert_eq!(queue.iter(&storage).collect::<Vec<_>>(), ["3", "2", "1", "4", "5"]);
    /// ```
    pub fn reverse_k_groups<S>(&mut self, storage: &mut S, k: usize)
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if k <= 1 || self.is_empty(storage) {
            return;
        }
        if k == 2 {
            return self.swap_pairs(storage);
        }

        let head = self.head();
        let mut before = head;
        let mut groups = 0usize;

        'runs: loop {
            let first = storage.next_of(before);
            let mut last = first;
            for _ in 0..k {
                if last == head {
                    break 'runs;
                }
                last = storage.next_of(last);
            }
            // `last` overshot by one: it is the node after the run.
            let after = last;
            let last = storage.prev_of(after);

            storage.close_run(first, last);
            storage.ring_reverse(first);
            storage.reopen_run(last, first, before, after);

            before = first;
            groups += 1;
        }

        tracing::trace!(k, groups, "reversed queue in groups");
    }
}
