//! Core functionality for urchin property-based testing.
//!
//! This crate provides the fundamental building blocks for property-based testing
//! with integrated shrinking: splittable seeds, size-dependent ranges, lazy shrink
//! trees, generator combinators, and the property runner that searches for and
//! shrinks counterexamples.

pub mod data;
pub mod error;
pub mod gen;
pub mod journal;
pub mod property;
pub mod range;
pub mod recheck;
pub mod report;
mod runner;
pub mod shrink;
pub mod tree;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use journal::*;
pub use property::*;
pub use range::*;
pub use recheck::*;
pub use report::*;
pub use tree::*;
