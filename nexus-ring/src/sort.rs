//! Stable, non-recursive bottom-up merge sort over queue links.
//!
//! The ring is consumed left to right as singleton runs. Runs are pushed on a
//! small stack whose sizes mirror the binary digits of the number of nodes
//! seen so far: after pushing the `c`-th node, the top two runs are merged
//! `c.trailing_zeros()` times, which is exactly the carry of incrementing a
//! binary counter.
//!
//! ```text
//! c = 1  [1]
//! c = 2  [1 1]     -> [2]
//! c = 3  [2 1]
//! c = 4  [2 1 1]   -> [2 2] -> [4]
//! c = 5  [4 1]
//! c = 6  [4 1 1]   -> [4 2]
//! ```
//!
//! While sorting, runs are `next`-only chains ending in [`Index::NONE`] and
//! `prev` links are stale. A final pass rebuilds the ring from `next`.

use crate::link::Ring;
use crate::{Index, Node, Queue, Storage};

/// Byte-wise lexicographic direction of a sort or merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest value first.
    #[default]
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortOrder {
    /// Maps a `descend` flag to an order.
    #[inline]
    pub const fn from_descend(descend: bool) -> Self {
        if descend {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    /// Returns `true` if `left` may stay in front of `right`.
    ///
    /// Equal values are in order, which keeps merges stable.
    #[inline]
    pub fn in_order(self, left: &str, right: &str) -> bool {
        match self {
            SortOrder::Ascending => left <= right,
            SortOrder::Descending => left >= right,
        }
    }
}

impl<Idx: Index> Queue<Idx> {
    /// Sorts the queue in place, stably, by relinking nodes.
    ///
    /// O(n log n) comparisons, no recursion, and no value is copied or moved
    /// between slots.
    ///
    /// ```
    /// use nexus_ring::{BoxedRingStorage, Queue, SortOrder};
    ///
    /// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
    /// let mut queue = Queue::new(&mut storage).unwrap();
    /// for v in ["pear", "apple", "fig", "apple"] {
    ///     queue.insert_tail(&mut storage, v).unwrap();
    /// }
    ///
    /// queue.sort(&mut storage, SortOrder::Ascending);
    /// assert_eq!(
    ///     queue.iter(&storage).collect::<Vec<_>>(),
    ///     ["apple", "apple", "fig", "pear"]
    /// );
    /// ```
    pub fn sort<S>(&mut self, storage: &mut S, order: SortOrder)
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if self.is_empty(storage) || storage.ring_is_singular(self.head()) {
            return;
        }

        let head = self.head();

        // Open the ring into a `next`-only chain.
        let last = storage.prev_of(head);
        storage.set_next(last, Idx::NONE);

        let mut pending: Vec<Idx> = Vec::with_capacity(usize::BITS as usize);
        let mut count = 0usize;
        let mut rest = storage.next_of(head);

        while rest.is_some() {
            let run = rest;
            rest = storage.next_of(run);
            storage.set_next(run, Idx::NONE);
            pending.push(run);
            count += 1;

            for _ in 0..count.trailing_zeros() {
                merge_top(storage, &mut pending, order);
            }
        }

        while pending.len() > 1 {
            merge_top(storage, &mut pending, order);
        }

        if let Some(run) = pending.pop() {
            rebuild(storage, head, run);
        }

        tracing::trace!(count, ?order, "sorted queue");
    }
}

/// Pops `right` (top) then `left` and pushes their merge.
#[inline]
fn merge_top<S, Idx>(storage: &mut S, pending: &mut Vec<Idx>, order: SortOrder)
where
    Idx: Index,
    S: Storage<Node<Idx>, Index = Idx>,
{
    let Some(right) = pending.pop() else {
        return;
    };
    let Some(left) = pending.pop() else {
        pending.push(right);
        return;
    };
    pending.push(merge_runs(storage, left, right, order));
}

/// Merges two `next`-only runs; ties take `left` first.
///
/// Once either side is exhausted the other is attached whole.
pub(crate) fn merge_runs<S, Idx>(storage: &mut S, mut left: Idx, mut right: Idx, order: SortOrder) -> Idx
where
    Idx: Index,
    S: Storage<Node<Idx>, Index = Idx>,
{
    let mut first = Idx::NONE;
    let mut tail = Idx::NONE;

    while left.is_some() && right.is_some() {
        let taken = if order.in_order(storage.value_of(left), storage.value_of(right)) {
            let taken = left;
            left = storage.next_of(left);
            taken
        } else {
            let taken = right;
            right = storage.next_of(right);
            taken
        };
        append(storage, &mut first, &mut tail, taken);
    }

    let remainder = if left.is_some() { left } else { right };
    append(storage, &mut first, &mut tail, remainder);
    first
}

#[inline]
fn append<S, Idx>(storage: &mut S, first: &mut Idx, tail: &mut Idx, idx: Idx)
where
    Idx: Index,
    S: Storage<Node<Idx>, Index = Idx>,
{
    if tail.is_none() {
        *first = idx;
    } else {
        storage.set_next(*tail, idx);
    }
    *tail = idx;
}

/// Closes the `next`-only chain starting at `run` into the ring at `head`,
/// restoring every `prev`.
fn rebuild<S, Idx>(storage: &mut S, head: Idx, run: Idx)
where
    Idx: Index,
    S: Storage<Node<Idx>, Index = Idx>,
{
    let mut prev = head;
    let mut cur = run;
    while cur.is_some() {
        storage.set_next(prev, cur);
        storage.set_prev(cur, prev);
        prev = cur;
        cur = storage.next_of(cur);
    }
    storage.set_next(prev, head);
    storage.set_prev(head, prev);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxedRingStorage;
    use crate::testing::{assert_well_formed, queue_of, values};

    #[test]
    fn sorts_ascending_and_descending() {
        let input = ["delta", "alpha", "echo", "charlie", "bravo"];
        let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(16);
        let mut up = queue_of(&mut storage, &input);
        let mut down = queue_of(&mut storage, &input);

        up.sort(&mut storage, SortOrder::Ascending);
        down.sort(&mut storage, SortOrder::Descending);

        assert_eq!(
            values(&storage, &up),
            ["alpha", "bravo", "charlie", "delta", "echo"]
        );
        assert_eq!(
            values(&storage, &down),
            ["echo", "delta", "charlie", "bravo", "alpha"]
        );
        assert_well_formed(&storage, &up);
        assert_well_formed(&storage, &down);
    }

    #[test]
    fn byte_order_not_numeric() {
        let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
        let mut queue = queue_of(&mut storage, &["10", "9", "1", "B", "a"]);

        queue.sort(&mut storage, SortOrder::Ascending);

        assert_eq!(values(&storage, &queue), ["1", "10", "9", "B", "a"]);
    }

    #[test]
    fn stable_for_equal_values() {
        let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(16);
        let mut queue = queue_of(&mut storage, &[]);
        let input = ["b", "a", "b", "a", "c", "a", "b"];
        let keys: Vec<u32> = input
            .iter()
            .map(|v| queue.insert_tail(&mut storage, v).unwrap())
            .collect();

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            queue.sort(&mut storage, order);

            // Same-valued nodes keep insertion order (their keys ascend).
            for value in ["a", "b", "c"] {
                let in_queue: Vec<u32> = keys_in_order(&storage, &queue)
                    .into_iter()
                    .filter(|k| storage.value_of(*k) == value)
                    .collect();
                let inserted: Vec<u32> = keys
                    .iter()
                    .copied()
                    .filter(|k| storage.value_of(*k) == value)
                    .collect();
                assert_eq!(in_queue, inserted, "{order:?} {value}");
            }
        }
    }

    fn keys_in_order(storage: &BoxedRingStorage, queue: &Queue) -> Vec<u32> {
        let mut out = Vec::new();
        let mut cur = storage.next_of(queue.head());
        while cur != queue.head() {
            out.push(cur);
            cur = storage.next_of(cur);
        }
        out
    }

    #[test]
    fn sizes_around_powers_of_two() {
        for n in 0..=33usize {
            let input: Vec<String> = (0..n).map(|i| format!("{:03}", (i * 17) % 37)).collect();
            let refs: Vec<&str> = input.iter().map(String::as_str).collect();

            let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(64);
            let mut queue = queue_of(&mut storage, &refs);

            queue.sort(&mut storage, SortOrder::Ascending);

            let mut expected = input.clone();
            expected.sort();
            assert_eq!(values(&storage, &queue), expected, "n = {n}");
            assert_well_formed(&storage, &queue);
        }
    }

    #[test]
    fn already_sorted_and_reversed() {
        let sorted = ["a", "b", "c", "d", "e", "f"];
        let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(16);
        let mut queue = queue_of(&mut storage, &sorted);

        queue.sort(&mut storage, SortOrder::Ascending);
        assert_eq!(values(&storage, &queue), sorted);

        queue.reverse(&mut storage);
        queue.sort(&mut storage, SortOrder::Ascending);
        assert_eq!(values(&storage, &queue), sorted);
        assert_well_formed(&storage, &queue);
    }

    #[test]
    fn merge_runs_attaches_remainder() {
        let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(16);
        let queue = queue_of(&mut storage, &["a", "c", "b", "d", "e", "f"]);
        let keys = keys_in_order(&storage, &queue);

        // Cut the ring into two chains: [a, c] and [b, d, e, f].
        storage.set_next(keys[1], u32::NONE);
        storage.set_next(keys[5], u32::NONE);

        let merged = merge_runs(&mut storage, keys[0], keys[2], SortOrder::Ascending);

        let mut order = Vec::new();
        let mut cur = merged;
        while cur.is_some() {
            order.push(storage.value_of(cur).to_string());
            cur = storage.next_of(cur);
        }
        assert_eq!(order, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn from_descend_flag() {
        assert_eq!(SortOrder::from_descend(false), SortOrder::Ascending);
        assert_eq!(SortOrder::from_descend(true), SortOrder::Descending);
        assert!(SortOrder::Ascending.in_order("a", "a"));
        assert!(SortOrder::Descending.in_order("a", "a"));
        assert!(!SortOrder::Descending.in_order("a", "b"));
    }
}
