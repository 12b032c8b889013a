//! Shared primitives and traits for the orfscan crates.
//!
//! `orfscan-core` provides the foundation the sequence and scanning crate
//! builds on:
//!
//! - **Error types** — [`OrfscanError`] and [`Result`] for structured error handling
//! - **Traits** — [`Sequence`], [`ReverseComplement`], [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{OrfscanError, Result};
pub use traits::*;
