//! Node linkage primitives for sentinel-headed circular lists.
//!
//! A ring is identified by its sentinel node. An empty ring's sentinel points
//! at itself both ways. Every primitive here is pure index rewiring: payloads
//! never move, and apart from [`Ring::ring_reverse`] nothing is O(n).
//!
//! ```text
//!        ┌───────────────────────────────────────────────┐
//!        ↓                                               │
//!   ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//!   │ sentinel │ ──→ │  "alpha" │ ──→ │  "beta"  │ ──────┘
//!   │  (none)  │ ←── │          │ ←── │          │ ←─────┐
//!   └──────────┘     └──────────┘     └──────────┘       │
//!        │                                               │
//!        └───────────────────────────────────────────────┘
//! ```
//!
//! The primitives are crate-internal: callers only ever see whole, well
//! formed rings through [`Queue`](crate::Queue).

use crate::{Element, Index, Storage};

const VACANT: &str = "ring link points at a vacant slot";

/// The `prev`/`next` pair embedded in every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<Idx: Index = u32> {
    pub(crate) prev: Idx,
    pub(crate) next: Idx,
}

impl<Idx: Index> Link<Idx> {
    const UNLINKED: Self = Self {
        prev: Idx::NONE,
        next: Idx::NONE,
    };

    /// Index of the previous node.
    #[inline]
    pub fn prev(&self) -> Idx {
        self.prev
    }

    /// Index of the next node.
    #[inline]
    pub fn next(&self) -> Idx {
        self.next
    }
}

/// One storage slot: a link plus, for everything but a sentinel, an element.
///
/// Nodes can be inspected through the storage by the index an insert
/// returned:
///
/// ```
/// use nexus_ring::{BoxedRingStorage, Queue, Storage};
///
/// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(4);
/// let mut queue = Queue::new(&mut storage).unwrap();
/// let a = queue.insert_tail(&mut storage, "a").unwrap();
/// let b = queue.insert_tail(&mut storage, "b").unwrap();
///
/// let node = storage.get(a).unwrap();
/// assert_eq!(node.element().map(|e| e.value()), Some("a"));
/// assert_eq!(node.link().prev(), queue.head());
/// assert_eq!(node.link().next(), b);
///
/// let sentinel = storage.get(queue.head()).unwrap();
/// assert!(sentinel.is_sentinel());
/// assert!(sentinel.element().is_none());
/// assert_eq!(sentinel.link().prev(), b);
/// ```
#[derive(Debug)]
pub struct Node<Idx: Index = u32> {
    pub(crate) link: Link<Idx>,
    pub(crate) element: Option<Element>,
}

impl<Idx: Index> Node<Idx> {
    #[inline]
    pub(crate) fn sentinel() -> Self {
        Self {
            link: Link::UNLINKED,
            element: None,
        }
    }

    #[inline]
    pub(crate) fn with_element(element: Element) -> Self {
        Self {
            link: Link::UNLINKED,
            element: Some(element),
        }
    }

    /// Returns the node's link.
    #[inline]
    pub fn link(&self) -> &Link<Idx> {
        &self.link
    }

    /// Returns the element, or `None` for a sentinel.
    #[inline]
    pub fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }

    /// Returns `true` if this node anchors a ring.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.element.is_none()
    }
}

/// Ring surgery over any node storage.
///
/// Indices handed to these methods must be occupied; a vacant index means a
/// ring invariant is already broken and the access panics.
pub(crate) trait Ring<Idx: Index>: Storage<Node<Idx>, Index = Idx> {
    #[inline]
    fn node(&self, idx: Idx) -> &Node<Idx> {
        self.get(idx).expect(VACANT)
    }

    #[inline]
    fn node_mut(&mut self, idx: Idx) -> &mut Node<Idx> {
        self.get_mut(idx).expect(VACANT)
    }

    #[inline]
    fn next_of(&self, idx: Idx) -> Idx {
        self.node(idx).link.next
    }

    #[inline]
    fn prev_of(&self, idx: Idx) -> Idx {
        self.node(idx).link.prev
    }

    #[inline]
    fn set_next(&mut self, idx: Idx, next: Idx) {
        self.node_mut(idx).link.next = next;
    }

    #[inline]
    fn set_prev(&mut self, idx: Idx, prev: Idx) {
        self.node_mut(idx).link.prev = prev;
    }

    /// Value of an element node. Sentinels read as the empty string.
    #[inline]
    fn value_of(&self, idx: Idx) -> &str {
        let node = self.node(idx);
        debug_assert!(!node.is_sentinel(), "value read from a sentinel");
        node.element.as_ref().map_or("", Element::value)
    }

    /// Returns `true` if `head` is an occupied sentinel slot.
    #[inline]
    fn is_live_sentinel(&self, head: Idx) -> bool {
        self.get(head).is_some_and(Node::is_sentinel)
    }

    /// Makes `head` its own one-node ring.
    #[inline]
    fn ring_init(&mut self, head: Idx) {
        let link = &mut self.node_mut(head).link;
        link.prev = head;
        link.next = head;
    }

    #[inline]
    fn ring_is_empty(&self, head: Idx) -> bool {
        self.next_of(head) == head
    }

    #[inline]
    fn ring_is_singular(&self, head: Idx) -> bool {
        let next = self.next_of(head);
        next != head && next == self.prev_of(head)
    }

    /// Links `new` between two adjacent nodes.
    #[inline]
    fn link_between(&mut self, new: Idx, prev: Idx, next: Idx) {
        {
            let link = &mut self.node_mut(new).link;
            link.prev = prev;
            link.next = next;
        }
        self.set_next(prev, new);
        self.set_prev(next, new);
    }

    #[inline]
    fn link_after(&mut self, new: Idx, anchor: Idx) {
        let next = self.next_of(anchor);
        self.link_between(new, anchor, next);
    }

    #[inline]
    fn link_before(&mut self, new: Idx, anchor: Idx) {
        let prev = self.prev_of(anchor);
        self.link_between(new, prev, anchor);
    }

    /// Removes `idx` from its ring and leaves it self-looped.
    #[inline]
    fn unlink(&mut self, idx: Idx) {
        let Link { prev, next } = self.node(idx).link;
        self.set_next(prev, next);
        self.set_prev(next, prev);
        self.ring_init(idx);
    }

    /// Moves every element of ring `src` between `prev` and `next` (which
    /// must be adjacent in another ring) and resets `src` to empty.
    #[inline]
    fn splice_between(&mut self, src: Idx, prev: Idx, next: Idx) {
        if self.ring_is_empty(src) {
            return;
        }

        let first = self.next_of(src);
        let last = self.prev_of(src);

        self.set_next(prev, first);
        self.set_prev(first, prev);
        self.set_next(last, next);
        self.set_prev(next, last);

        self.ring_init(src);
    }

    /// O(1): moves all of `src` to the end of ring `dst`.
    #[inline]
    fn splice_tail(&mut self, src: Idx, dst: Idx) {
        let prev = self.prev_of(dst);
        self.splice_between(src, prev, dst);
    }

    /// Swaps `prev`/`next` at every node of the ring containing `anchor`.
    fn ring_reverse(&mut self, anchor: Idx) {
        let mut cur = anchor;
        loop {
            let link = &mut self.node_mut(cur).link;
            core::mem::swap(&mut link.prev, &mut link.next);
            // The old `next` now sits in `prev`.
            cur = link.prev;
            if cur == anchor {
                break;
            }
        }
    }

    /// Closes the contiguous run `first..=last` into a ring of its own.
    ///
    /// The run's outside neighbours keep pointing at it until
    /// [`Ring::reopen_run`] splices it back.
    #[inline]
    fn close_run(&mut self, first: Idx, last: Idx) {
        self.set_next(last, first);
        self.set_prev(first, last);
    }

    /// Splices the closed run `first..=last` back between `before` and `after`.
    #[inline]
    fn reopen_run(&mut self, first: Idx, last: Idx, before: Idx, after: Idx) {
        self.set_next(before, first);
        self.set_prev(first, before);
        self.set_next(last, after);
        self.set_prev(after, last);
    }
}

impl<Idx: Index, S> Ring<Idx> for S where S: Storage<Node<Idx>, Index = Idx> + ?Sized {}
