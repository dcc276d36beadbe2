//! Error types for queue construction and insertion.

use std::collections::TryReserveError;

use thiserror::Error;

/// Why a node could not be added to a queue.
///
/// The queue is left exactly as it was whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// Node storage has no free slot.
    #[error("queue storage is full")]
    Full,

    /// Copying the value could not reserve memory.
    #[error("failed to allocate element value: {0}")]
    Alloc(#[from] TryReserveError),

    /// The queue's sentinel is not live in the storage passed in.
    #[error("queue handle is not live in this storage")]
    InvalidQueue,
}
