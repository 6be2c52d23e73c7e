//! Core functionality for Thistle property-based testing.
//!
//! This crate provides the generation and shrinking algebra: generators
//! ([`Gen`]), values bundled with their lazy shrink candidates
//! ([`Shrinkable`]), the combinator library, a type-indexed registry of
//! default generators, and the greedy search for minimal counterexamples.

pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod registry;
pub mod shrink;
pub mod shrinkable;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use registry::*;
pub use shrink::*;
pub use shrinkable::*;
