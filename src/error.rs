//! Error surface for heap operations.

use thiserror::Error;

/// Error returned by the fallible heap operations.
///
/// Every error is raised before any mutation, so a failed operation leaves
/// the heap exactly as it found it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no entries.
    #[error("empty heap")]
    EmptyHeap,
    /// A push or priority increase used the priority reserved for `delete`.
    #[error("highest priority is reserved for internal use")]
    ReservedPriority,
    /// A caller broke an operation's precondition: a duplicate value on
    /// push, an absent value on increase-priority or delete, a priority
    /// change that does not improve on the current one, or a meld of heaps
    /// with intersecting value sets. The payload names the offender.
    #[error("{0}")]
    ContractViolation(String),
}
