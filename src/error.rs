//! Error types for the page tree library.
//!
//! This module defines all error types that can occur while navigating,
//! resolving, or editing a page tree held in an [`ObjectStore`](crate::store::ObjectStore).

/// Result type alias for page tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during page tree processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Referenced object is not present in the store
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Page tree structure is unusable for the requested operation
    #[error("Invalid page tree: {0}")]
    InvalidPageTree(String),

    /// Index outside of a kids array
    #[error("Index {index} out of bounds for kids array of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Current array length
        len: usize,
    },

    /// Circular reference detected in object graph
    #[error("Circular reference detected: object {0}")]
    CircularReference(crate::object::ObjectRef),

    /// Recursion depth limit exceeded
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// Every object number up to `u32::MAX` has been handed out
    #[error("No object numbers left to allocate")]
    ObjectIdsExhausted,
}

impl Error {
    /// Build an [`Error::InvalidObjectType`] from an expected type and the object found.
    pub(crate) fn wrong_type(expected: &str, found: &crate::object::Object) -> Self {
        Error::InvalidObjectType {
            expected: expected.to_string(),
            found: found.type_name().to_string(),
        }
    }
}
