//! Error type shared by the table, its iterators and the capacity policy.

/// Failures surfaced by `HashTable` operations.
///
/// Every error is reported by the call that caused it and leaves the table
/// exactly as it was before that call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An absent key (or, for `put`, an absent value) was passed in.
    #[error("called HashTable::{op} with an absent {what}")]
    InvalidArgument {
        op: &'static str,
        what: &'static str,
    },
    /// `try_next` was called on an iterator with nothing left.
    #[error("{0}::next called on exhausted iterator")]
    ExhaustedIterator(&'static str),
    /// Growth was requested past the last entry of the capacity table.
    #[error("capacity of HashTable can't grow beyond {max}")]
    CapacityExceeded { max: usize },
}

impl TableError {
    pub(crate) fn absent_key(op: &'static str) -> Self {
        TableError::InvalidArgument { op, what: "key" }
    }

    pub(crate) fn absent_value(op: &'static str) -> Self {
        TableError::InvalidArgument { op, what: "value" }
    }
}
