//! Domain error types.
//!
//! These errors represent validation failures in the network model and
//! itinerary construction. They are distinct from loading/IO errors.

use super::LineId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A line identifier was empty or whitespace
    #[error("line identifier must not be empty")]
    EmptyLineId,

    /// Two lines in one network share an identifier
    #[error("duplicate line identifier: {0}")]
    DuplicateLineId(LineId),

    /// A line reference does not point into the network
    #[error("invalid line reference: out of bounds")]
    InvalidLineRef,

    /// Invalid bus segment construction (e.g., alight before board)
    #[error("invalid bus segment: {0}")]
    InvalidSegment(&'static str),

    /// Route has no segments
    #[error("route must have at least one segment")]
    EmptyRoute,
}
