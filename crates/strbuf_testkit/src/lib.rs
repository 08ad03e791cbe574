//! # strbuf Testkit
//!
//! Test utilities for the strbuf string builder.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A reference model that mirrors the builder with a plain `Vec<u8>`
//! - Invariant checks shared by the property tests

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use generators::*;
pub use model::*;
