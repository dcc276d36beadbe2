//! Value-driven deletions: duplicate runs, the middle element, and the
//! monotonic filter.
//!
//! These are the only transforms that release elements. Every excised node
//! is unlinked first and then removed from storage, so traversal never steps
//! onto a vacant slot.

use crate::link::Ring;
use crate::queue::detach;
use crate::{Index, Node, Queue, Storage};

/// Which way the survivors of [`Queue::monotonic_filter`] must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Drop every element with a strictly smaller value to its right.
    /// Survivors are non-decreasing.
    Ascend,
    /// Drop every element with a strictly greater value to its right.
    /// Survivors are non-increasing.
    Descend,
}

impl Direction {
    /// Returns `true` if `value` must go because of `right`, a value to its
    /// right.
    #[inline]
    pub fn violates(self, value: &str, right: &str) -> bool {
        match self {
            Direction::Ascend => right < value,
            Direction::Descend => right > value,
        }
    }
}

impl<Idx: Index> Queue<Idx> {
    /// Deletes every value that occurs more than once in a sorted queue.
    ///
    /// Each maximal run of two or more equal adjacent values is removed
    /// entirely; no copy of it is kept. Unsorted input is not detected and
    /// only adjacent runs are considered.
    ///
    /// Returns `false` for an empty or dead queue.
    ///
    /// ```
    /// use nexus_ring::{BoxedRingStorage, Queue};
    ///
    /// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
    /// let mut queue = Queue::new(&mut storage).unwrap();
    /// for v in ["a", "a", "b", "c", "c", "c"] {
    ///     queue.insert_tail(&mut storage, v).unwrap();
    /// }
    ///
    /// assert!(queue.delete_duplicates(&mut storage));
    /// assert_eq!(queue.iter(&storage).collect::<Vec<_>>(), ["b"]);
    /// ```
    pub fn delete_duplicates<S>(&mut self, storage: &mut S) -> bool
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if self.is_empty(storage) {
            return false;
        }

        let head = self.head();
        // Last node kept so far, and whether it heads a run being deleted.
        let mut kept: Option<Idx> = None;
        let mut in_run = false;

        let mut cur = storage.next_of(head);
        while cur != head {
            let next = storage.next_of(cur);
            let repeat = kept.is_some_and(|k| storage.value_of(k) == storage.value_of(cur));

            if repeat {
                in_run = true;
                detach(storage, cur);
            } else {
                if in_run {
                    if let Some(k) = kept {
                        detach(storage, k);
                    }
                    in_run = false;
                }
                kept = Some(cur);
            }
            cur = next;
        }

        if in_run {
            if let Some(k) = kept {
                detach(storage, k);
            }
        }
        true
    }

    /// Deletes the middle element, zero-based index `n / 2`.
    ///
    /// Located with a fast/slow walk: the slow cursor advances once for
    /// every two steps of the fast one. Returns `false` for an empty or dead
    /// queue.
    pub fn delete_middle<S>(&mut self, storage: &mut S) -> bool
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if self.is_empty(storage) {
            return false;
        }

        let head = self.head();
        let mut slow = storage.next_of(head);
        let mut fast = slow;
        loop {
            let step = storage.next_of(fast);
            if step == head {
                break;
            }
            fast = storage.next_of(step);
            slow = storage.next_of(slow);
            if fast == head {
                break;
            }
        }

        detach(storage, slow);
        true
    }

    /// Removes every element that has a strictly more extreme value anywhere
    /// to its right, leaving the survivors monotonic in `direction`.
    ///
    /// Scans once from the tail. The nearest surviving element to the right
    /// of the scan position is the extreme of everything to its right, so
    /// each element is compared once and either released or kept. Equal
    /// values never remove each other.
    ///
    /// Returns the number of remaining elements (0 for an empty or dead
    /// queue).
    ///
    /// ```
    /// use nexus_ring::{BoxedRingStorage, Direction, Queue};
    ///
    /// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(8);
    /// let mut queue = Queue::new(&mut storage).unwrap();
    /// for v in ["5", "2", "7", "1", "8"] {
    ///     queue.insert_tail(&mut storage, v).unwrap();
    /// }
    ///
    /// assert_eq!(queue.monotonic_filter(&mut storage, Direction::Ascend), 2);
    /// assert_eq!(queue.iter(&storage).collect::<Vec<_>>(), ["1", "8"]);
    /// ```
    pub fn monotonic_filter<S>(&mut self, storage: &mut S, direction: Direction) -> usize
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if self.is_empty(storage) {
            return 0;
        }

        let head = self.head();
        let mut top = storage.prev_of(head);
        let mut kept = 1;

        let mut cur = storage.prev_of(top);
        while cur != head {
            // Captured before `cur` may be released.
            let prev = storage.prev_of(cur);
            if direction.violates(storage.value_of(cur), storage.value_of(top)) {
                detach(storage, cur);
            } else {
                top = cur;
                kept += 1;
            }
            cur = prev;
        }

        kept
    }

    /// [`Queue::monotonic_filter`] with [`Direction::Ascend`].
    #[inline]
    pub fn ascend<S>(&mut self, storage: &mut S) -> usize
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        self.monotonic_filter(storage, Direction::Ascend)
    }

    /// [`Queue::monotonic_filter`] with [`Direction::Descend`].
    #[inline]
    pub fn descend<S>(&mut self, storage: &mut S) -> usize
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        self.monotonic_filter(storage, Direction::Descend)
    }
}
