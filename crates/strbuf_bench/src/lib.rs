//! Benchmark utilities.

#![warn(missing_docs)]

pub mod utils;
