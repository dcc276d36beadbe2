//! Sentinel-headed circular queue of strings over external storage.
//!
//! A [`Queue`] is nothing but the index of its sentinel node; the nodes live
//! in a [`Storage`] the caller owns. Many queues can share one storage, which
//! is what lets [`merge`](crate::merge) move elements between them in O(1).
//!
//! # Storage Invariant
//!
//! A queue must always be used with the storage it was created in. A handle
//! whose sentinel is not live in the storage passed in is treated as an
//! absent queue: queries return `0`/`None` and mutators do nothing. Any other
//! mix-up (a different storage that happens to hold a sentinel at the same
//! index) is the caller's responsibility, the same discipline as the `slab`
//! crate.
//!
//! # Example
//!
//! ```
//! use nexus_ring::{BoxedRingStorage, Queue};
//!
//! let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(16);
//! let mut queue = Queue::new(&mut storage).unwrap();
//!
//! queue.insert_tail(&mut storage, "b").unwrap();
//! queue.insert_tail(&mut storage, "c").unwrap();
//! queue.insert_head(&mut storage, "a").unwrap();
//!
//! assert_eq!(queue.size(&storage), 3);
//! assert_eq!(queue.iter(&storage).collect::<Vec<_>>(), ["a", "b", "c"]);
//!
//! let head = queue.remove_head(&mut storage).unwrap();
//! assert_eq!(head.value(), "a");
//!
//! queue.free(&mut storage);
//! assert_eq!(storage.len(), 0);
//! ```

use crate::link::Ring;
use crate::{Element, Index, InsertError, Node, Storage};

/// A circular doubly-linked queue of strings.
///
/// The handle is move-only: [`Queue::free`] consumes it, so a freed queue
/// cannot be used again. Dropping a handle without freeing it leaves its
/// nodes in storage.
#[derive(Debug, PartialEq, Eq)]
pub struct Queue<Idx: Index = u32> {
    head: Idx,
}

impl<Idx: Index> Queue<Idx> {
    /// Creates an empty queue, allocating its sentinel in `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::Full`] if storage has no free slot.
    pub fn new<S>(storage: &mut S) -> Result<Self, InsertError>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        let head = storage.try_insert(Node::sentinel()).map_err(|_| {
            tracing::debug!("queue storage full, sentinel not allocated");
            InsertError::Full
        })?;
        storage.ring_init(head);
        Ok(Self { head })
    }

    /// Returns the index of the sentinel node.
    #[inline]
    pub const fn head(&self) -> Idx {
        self.head
    }

    /// Returns `true` if the sentinel is live in `storage`.
    #[inline]
    pub fn is_live<S>(&self, storage: &S) -> bool
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        storage.is_live_sentinel(self.head)
    }

    /// Releases every element, then the sentinel.
    ///
    /// Does nothing if the queue is not live in `storage`.
    pub fn free<S>(self, storage: &mut S)
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if !self.is_live(storage) {
            return;
        }

        let mut released = 0usize;
        let mut cur = storage.next_of(self.head);
        while cur != self.head {
            let next = storage.next_of(cur);
            storage.remove(cur);
            released += 1;
            cur = next;
        }
        storage.remove(self.head);

        tracing::debug!(released, "freed queue");
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Copies `value` into a new element at the head.
    ///
    /// Returns the element's stable index.
    ///
    /// # Errors
    ///
    /// See [`InsertError`]. On error the queue is unchanged.
    #[inline]
    pub fn insert_head<S>(&mut self, storage: &mut S, value: &str) -> Result<Idx, InsertError>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        let idx = self.allocate(storage, value)?;
        storage.link_after(idx, self.head);
        Ok(idx)
    }

    /// Copies `value` into a new element at the tail.
    ///
    /// Returns the element's stable index.
    ///
    /// # Errors
    ///
    /// See [`InsertError`]. On error the queue is unchanged.
    #[inline]
    pub fn insert_tail<S>(&mut self, storage: &mut S, value: &str) -> Result<Idx, InsertError>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        let idx = self.allocate(storage, value)?;
        storage.link_before(idx, self.head);
        Ok(idx)
    }

    fn allocate<S>(&self, storage: &mut S, value: &str) -> Result<Idx, InsertError>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if !self.is_live(storage) {
            return Err(InsertError::InvalidQueue);
        }

        let element = Element::try_new(value)?;
        storage.try_insert(Node::with_element(element)).map_err(|_| {
            tracing::debug!(len = value.len(), "queue storage full, element not inserted");
            InsertError::Full
        })
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Unlinks the head element and hands it to the caller.
    ///
    /// Returns `None` if the queue is empty or not live.
    #[inline]
    pub fn remove_head<S>(&mut self, storage: &mut S) -> Option<Element>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if !self.is_live(storage) || storage.ring_is_empty(self.head) {
            return None;
        }
        let idx = storage.next_of(self.head);
        detach(storage, idx)
    }

    /// Unlinks the tail element and hands it to the caller.
    ///
    /// Returns `None` if the queue is empty or not live.
    #[inline]
    pub fn remove_tail<S>(&mut self, storage: &mut S) -> Option<Element>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if !self.is_live(storage) || storage.ring_is_empty(self.head) {
            return None;
        }
        let idx = storage.prev_of(self.head);
        detach(storage, idx)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Counts the elements by walking the ring. O(n).
    ///
    /// Returns 0 for an empty or dead queue.
    pub fn size<S>(&self, storage: &S) -> usize
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        if !self.is_live(storage) {
            return 0;
        }

        let mut count = 0;
        let mut cur = storage.next_of(self.head);
        while cur != self.head {
            count += 1;
            cur = storage.next_of(cur);
        }
        count
    }

    /// Returns `true` if the queue holds no elements (or is not live).
    #[inline]
    pub fn is_empty<S>(&self, storage: &S) -> bool
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        !self.is_live(storage) || storage.ring_is_empty(self.head)
    }

    /// Returns `true` if the queue holds exactly one element.
    #[inline]
    pub fn is_singular<S>(&self, storage: &S) -> bool
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        self.is_live(storage) && storage.ring_is_singular(self.head)
    }

    /// Returns the head value.
    #[inline]
    pub fn front<'a, S>(&self, storage: &'a S) -> Option<&'a str>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        self.iter(storage).next()
    }

    /// Returns the tail value.
    #[inline]
    pub fn back<'a, S>(&self, storage: &'a S) -> Option<&'a str>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        self.iter(storage).next_back()
    }

    /// Returns an iterator over values, head to tail.
    #[inline]
    pub fn iter<'a, S>(&self, storage: &'a S) -> Iter<'a, Idx, S>
    where
        S: Storage<Node<Idx>, Index = Idx>,
    {
        let (front, back) = if self.is_live(storage) {
            (storage.next_of(self.head), storage.prev_of(self.head))
        } else {
            (self.head, self.head)
        };

        Iter {
            storage,
            head: self.head,
            front,
            back,
        }
    }
}

/// Unlinks `idx` and takes its element out of storage.
#[inline]
pub(crate) fn detach<S, Idx>(storage: &mut S, idx: Idx) -> Option<Element>
where
    Idx: Index,
    S: Storage<Node<Idx>, Index = Idx>,
{
    storage.unlink(idx);
    storage.remove(idx).and_then(|node| node.element)
}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over queue values.
pub struct Iter<'a, Idx: Index, S> {
    storage: &'a S,
    head: Idx,
    front: Idx,
    back: Idx,
}

impl<'a, Idx: Index, S> Iterator for Iter<'a, Idx, S>
where
    S: Storage<Node<Idx>, Index = Idx>,
{
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.head {
            return None;
        }

        let idx = self.front;
        // Met in the middle
        if self.front == self.back {
            self.front = self.head;
            self.back = self.head;
        } else {
            self.front = self.storage.next_of(idx);
        }

        Some(self.storage.value_of(idx))
    }
}

impl<'a, Idx: Index, S> DoubleEndedIterator for Iter<'a, Idx, S>
where
    S: Storage<Node<Idx>, Index = Idx>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back == self.head {
            return None;
        }

        let idx = self.back;
        if self.front == self.back {
            self.front = self.head;
            self.back = self.head;
        } else {
            self.back = self.storage.prev_of(idx);
        }

        Some(self.storage.value_of(idx))
    }
}
