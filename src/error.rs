use thiserror::Error;

/// Error raised when `front` or `back` is asked of an empty tree.
///
/// This is the only raised error condition of the container. Everything else
/// that can "fail" (inserting a duplicate, removing an absent value, moving
/// a cursor past a boundary) is a no-op reported through the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("underflow: {op} called on an empty tree")]
pub struct Underflow {
    /// Name of the operation that was attempted.
    pub op: &'static str,
}

impl Underflow {
    pub(crate) fn new(op: &'static str) -> Self {
        Self { op }
    }
}
