use std::fmt;

/// Error type for heap operations that violate an operation's contract.
///
/// Errors are reported synchronously to the caller of the offending
/// operation and never leave the heap partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `pop` was called on an empty heap.
    Empty,
    /// `push` was called with a key that is already present.
    DuplicateKey,
    /// `update` was called with a key that is not present.
    KeyNotFound,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::DuplicateKey => write!(f, "key is already present in the heap"),
            HeapError::KeyNotFound => write!(f, "key is not present in the heap"),
        }
    }
}

impl std::error::Error for HeapError {}
