// Caller-facing failure categories shared by every core service.
//
// Each service error maps onto exactly one of these, so whatever sits on top
// of the core (the console here, an HTTP layer elsewhere) can pick a distinct
// status per category without matching on every variant.

/// Broad category of a failed core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A liquor, review, store or filter word id did not resolve
    NotFound,
    /// Review text failed moderation
    ValidationRejected,
    /// The (word, kind) pair is already registered
    DuplicateFilterWord,
    /// Out-of-range index, malformed identifier, bad field value
    InvalidInput,
    /// The backing store failed
    Storage,
}
