//! Error types for buffer operations.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type for buffer operations.
pub type StrBufResult<T> = Result<T, StrBufError>;

/// Errors that can occur while growing or writing into a buffer.
///
/// Every failing operation leaves the buffer exactly as it was before
/// the call.
#[derive(Debug, Error)]
pub enum StrBufError {
    /// The allocator could not satisfy a growth request.
    #[error("allocation of {requested} bytes failed: {source}")]
    AllocationFailed {
        /// The capacity that was requested.
        requested: usize,
        /// The underlying reservation error.
        #[source]
        source: TryReserveError,
    },

    /// The required capacity does not fit in `usize`.
    #[error("capacity overflow: length {len} + {extra} extra bytes")]
    CapacityOverflow {
        /// Length of the buffer when growth was attempted.
        len: usize,
        /// Bytes that were about to be written.
        extra: usize,
    },

    /// The content is not valid UTF-8.
    #[error("invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },

    /// The formatted arguments could not be rendered.
    #[error("formatting failed: {message}")]
    Format {
        /// Description of the formatting failure.
        message: String,
    },
}

impl StrBufError {
    /// Create a capacity overflow error.
    pub fn capacity_overflow(len: usize, extra: usize) -> Self {
        Self::CapacityOverflow { len, extra }
    }

    /// Create a formatting error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Returns true if this error came from the allocator.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
