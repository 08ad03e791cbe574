//! # strbuf FFI
//!
//! C ABI for the strbuf string builder.
//!
//! This crate provides:
//! - An opaque `SbHandle` owned by Rust (`sb_new` / `sb_free`)
//! - Append, reset and release functions returning `SbResult` codes
//! - Zero-copy access to the null-terminated content (`sb_to_str`)
//! - A thread-local last-error message
//!
//! Formatted appends are not exported; C callers format with `snprintf`
//! and pass the result to `sb_append_bytes`.

#![warn(missing_docs)]

mod builder;
mod error;

pub use builder::{
    sb_append_bytes, sb_append_char, sb_append_str, sb_capacity, sb_destroy, sb_free, sb_len,
    sb_new, sb_reset, sb_to_str, SbHandle,
};
pub use error::{sb_clear_last_error, sb_get_last_error, ErrorCode, SbResult};
