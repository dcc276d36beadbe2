//! The string payload carried by every non-sentinel node.

use std::collections::TryReserveError;
use std::fmt;

/// An owned string value removed from, or living in, a queue.
///
/// Inside a queue the element sits next to its [`Link`](crate::Link) in one
/// storage slot. [`Queue::remove_head`](crate::Queue::remove_head) and
/// [`Queue::remove_tail`](crate::Queue::remove_tail) hand the element back to
/// the caller; dropping it releases the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    /// Copies `value` into a freshly allocated element.
    ///
    /// The copy reserves exactly `value.len()` bytes and reports allocation
    /// failure instead of aborting.
    pub(crate) fn try_new(value: &str) -> Result<Self, TryReserveError> {
        let mut owned = String::new();
        owned.try_reserve_exact(value.len())?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the element, returning its value.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into a fixed-size, NUL-terminated byte buffer.
    ///
    /// Writes at most `buf.len() - 1` bytes followed by a `0` terminator and
    /// truncates silently. Returns the number of payload bytes written. An
    /// empty buffer receives nothing.
    ///
    /// ```
    /// use nexus_ring::{BoxedRingStorage, Queue};
    ///
    /// let mut storage: BoxedRingStorage = BoxedRingStorage::with_capacity(4);
    /// let mut queue = Queue::new(&mut storage).unwrap();
    /// queue.insert_tail(&mut storage, "gerbil").unwrap();
    ///
    /// let element = queue.remove_head(&mut storage).unwrap();
    /// let mut buf = [0xffu8; 4];
    /// assert_eq!(element.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"ger\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };

        let bytes = self.value.as_bytes();
        let n = bytes.len().min(room);
        buf[..n].copy_from_slice(&bytes[..n]);
        buf[n] = 0;
        n
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
