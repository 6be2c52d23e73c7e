//! Thistle property-based testing library.
//!
//! This is the main entry point for Thistle, re-exporting the generators,
//! shrinking and property runner from `thistle-core`.

pub use thistle_core::*;
