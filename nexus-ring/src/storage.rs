//! Slab-like node storage with stable indices.
//!
//! Every node of every ring (sentinels included) lives in a [`Storage`]. An
//! index stays valid until its slot is removed, so rings link nodes by index
//! and moving a node between rings never touches its payload.

use thiserror::Error;

use crate::Index;

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// # Implementations
///
/// - [`BoxedStorage<T>`] - fixed capacity chosen at runtime (in this crate)
/// - `slab::Slab<T>` - growable, never full (feature `slab`)
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Inserts a value, returning its stable index.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` when no slot is available.
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Full<T>>;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;
}

/// Error returned when fixed-capacity storage is full.
///
/// Carries the rejected value so the caller can retry elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("storage is full")]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

// =============================================================================
// BoxedStorage - runtime capacity, single allocation, intrusive free list
// =============================================================================

#[derive(Debug)]
enum Slot<T, Idx> {
    Occupied(T),
    Vacant { next_free: Idx },
}

/// Fixed-capacity storage with runtime-determined size.
///
/// All slots are allocated up front in one boxed slice. Vacant slots form a
/// LIFO free list threaded through the slots themselves, so insertion never
/// allocates and a freshly removed slot is the next one reused.
///
/// # Example
///
/// ```
/// use nexus_ring::{BoxedStorage, Storage};
///
/// let mut storage: BoxedStorage<u64> = BoxedStorage::with_capacity(2);
///
/// let a = storage.try_insert(1).unwrap();
/// let _b = storage.try_insert(2).unwrap();
/// assert!(storage.try_insert(3).is_err());
///
/// assert_eq!(storage.remove(a), Some(1));
/// assert_eq!(storage.try_insert(4).unwrap(), a);
/// ```
#[derive(Debug)]
pub struct BoxedStorage<T, Idx: Index = u32> {
    slots: Box<[Slot<T, Idx>]>,
    /// Head of the free list, `Idx::NONE` when full.
    free_head: Idx,
    len: usize,
}

impl<T, Idx: Index> BoxedStorage<T, Idx> {
    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the index type (the index
    /// type's `MAX` is reserved as [`Index::NONE`]).
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= Idx::NONE.as_usize(),
            "capacity exceeds index type maximum"
        );

        let slots = (0..capacity)
            .map(|i| Slot::Vacant {
                next_free: if i + 1 < capacity {
                    Idx::from_usize(i + 1)
                } else {
                    Idx::NONE
                },
            })
            .collect();

        Self {
            slots,
            free_head: Idx::from_usize(0),
            len: 0,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }
}

impl<T, Idx: Index> Storage<T> for BoxedStorage<T, Idx> {
    type Index = Idx;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Idx, Full<T>> {
        if self.free_head.is_none() {
            return Err(Full(value));
        }

        let idx = self.free_head;
        let slot = &mut self.slots[idx.as_usize()];
        self.free_head = match *slot {
            Slot::Vacant { next_free } => next_free,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        };
        *slot = Slot::Occupied(value);
        self.len += 1;

        Ok(idx)
    }

    #[inline]
    fn remove(&mut self, index: Idx) -> Option<T> {
        let slot = self.slots.get_mut(index.as_usize())?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = index;
        self.len -= 1;

        match core::mem::replace(slot, vacant) {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn get(&self, index: Idx) -> Option<&T> {
        match self.slots.get(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, index: Idx) -> Option<&mut T> {
        match self.slots.get_mut(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }
}
