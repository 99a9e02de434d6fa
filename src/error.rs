use std::time::Duration;

use thiserror::Error;

/// Why a collection refused an element.
///
/// Every variant carries the element back so the caller can retry,
/// reroute, or drop it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InsertError<T> {
    /// A bounded collection is at capacity.
    #[error("collection is full (capacity {capacity})")]
    Full { value: T, capacity: usize },

    /// A predicated decorator declined the element.
    #[error("element rejected by predicate")]
    Rejected { value: T },

    /// A blocking push gave up waiting for space.
    #[error("push timed out after {after:?}")]
    TimedOut { value: T, after: Duration },

    /// The buffer stopped accepting writes.
    #[error("buffer is closed")]
    Closed { value: T },
}

impl<T> InsertError<T> {
    /// Recovers the element that was not inserted.
    pub fn into_value(self) -> T {
        match self {
            InsertError::Full { value, .. }
            | InsertError::Rejected { value }
            | InsertError::TimedOut { value, .. }
            | InsertError::Closed { value } => value,
        }
    }
}
