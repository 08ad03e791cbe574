//! # strbuf core
//!
//! A small growable string builder.
//!
//! [`StringBuilder`] accumulates bytes with amortized O(1) appends and
//! keeps its content zero-terminated, so it can be handed to C string
//! consumers without copying.
//!
//! ## Growth
//!
//! - The first allocation is 32 bytes, or twice the first write when that
//!   write is longer than 16 bytes
//! - Later growth doubles the capacity until the write and its terminator fit
//! - Capacity is never given back by [`StringBuilder::reset`]; only
//!   [`StringBuilder::release`] frees it
//!
//! The thresholds live in [`GrowthPolicy`].
//!
//! ## Usage
//!
//! ```
//! use strbuf_core::{appendf, StringBuilder};
//!
//! let mut sb = StringBuilder::new();
//! sb.append_str("answer: ").unwrap();
//! appendf!(sb, "{}", 42).unwrap();
//! assert_eq!(sb.to_str().unwrap(), "answer: 42");
//!
//! sb.release();
//! assert_eq!(sb.capacity(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;

pub use builder::StringBuilder;
pub use config::{
    GrowthPolicy, DEFAULT_FIRST_WRITE_FACTOR, DEFAULT_INITIAL_CAPACITY,
    DEFAULT_SMALL_WRITE_THRESHOLD,
};
pub use error::{StrBufError, StrBufResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Appends formatted text to a [`StringBuilder`].
///
/// Takes the same arguments as [`format!`] after the builder and
/// evaluates to a [`StrBufResult<()>`].
///
/// ```
/// use strbuf_core::{appendf, StringBuilder};
///
/// let mut sb = StringBuilder::new();
/// appendf!(sb, "{} + {} = {}\n", 2, 2, 4).unwrap();
/// assert_eq!(sb.as_bytes(), b"2 + 2 = 4\n");
/// ```
#[macro_export]
macro_rules! appendf {
    ($sb:expr, $($arg:tt)*) => {
        $sb.append_formatted(::std::format_args!($($arg)*))
    };
}
