//! Error types for document operations.
//!
//! Every variant signals an invariant or contract violation: operations fed
//! out of order, anchors referencing unknown items, positions past the end
//! of the document, or a merge input that is not causally closed. None of
//! these are recovered locally; they propagate to the caller.

use std::fmt;

/// Result alias for fallible document operations.
pub type Result<T> = std::result::Result<T, CrdtError>;

/// An invariant or contract violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrdtError {
    /// An item was integrated with a non-consecutive sequence number for
    /// its agent.
    OutOfOrder {
        /// The sequence number the item carried.
        seq: u32,
        /// The sequence number the document expected next.
        expected: u32,
    },

    /// A non-boundary anchor identifier was not found in the document.
    ItemNotFound,

    /// A position exceeded the visible length of the document.
    PositionOutOfRange {
        /// The requested position.
        pos: usize,
        /// The visible length at the time of the request.
        len: usize,
    },

    /// A merge pass integrated nothing while items remained, meaning the
    /// source document references history the destination can never obtain.
    UnresolvableDependency {
        /// Number of items still waiting when progress stopped.
        remaining: usize,
    },
}

impl fmt::Display for CrdtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrdtError::OutOfOrder { seq, expected } => {
                write!(f, "operation out of order: got seq {}, expected {}", seq, expected)
            }
            CrdtError::ItemNotFound => {
                write!(f, "anchor identifier not found in document")
            }
            CrdtError::PositionOutOfRange { pos, len } => {
                write!(f, "position {} past end of document (visible length {})", pos, len)
            }
            CrdtError::UnresolvableDependency { remaining } => {
                write!(f, "merge made no progress with {} items remaining", remaining)
            }
        }
    }
}

impl std::error::Error for CrdtError {}
