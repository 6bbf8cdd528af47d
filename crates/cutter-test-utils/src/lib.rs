//! Shared test utilities for the Cutter workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`SourceTree`] builder for temporary source directories
//! - [`sources`]: sample sources carrying version directives

pub mod sources;
pub mod tree;

pub use tree::SourceTree;
