//! Slot indices with a reserved "no node" value.
//!
//! Rings never need a null link (an empty ring points at its own sentinel),
//! but the sort engine temporarily turns a ring into `next`-only chains that
//! end in [`Index::NONE`]. Reserving `MAX` keeps a [`Link`](crate::Link) at two
//! plain integers instead of two `Option`s.

/// A copyable slot index with a sentinel "none" value.
///
/// # Example
///
/// ```
/// use nexus_ring::Index;
///
/// let idx: u32 = 7;
/// assert!(idx.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), idx);
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug + 'static {
    /// Reserved value marking the end of a `next`-only chain.
    const NONE: Self;

    /// Returns `true` if this is [`Index::NONE`].
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this refers to a slot.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Widens the index for slot addressing.
    fn as_usize(self) -> usize;

    /// Narrows a slot position into the index type.
    ///
    /// Storage guarantees the position fits (capacity is checked against
    /// `NONE` at construction).
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }
            }
        )*
    };
}

impl_index_for_unsigned!(u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_index_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!((0 as $ty).is_some());
                    assert!((<$ty>::MAX - 1).is_some());
                    assert_eq!(<$ty>::from_usize(42).as_usize(), 42);
                }
            )*
        };
    }

    test_index_sentinel!(
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );
}
