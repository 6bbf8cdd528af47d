//! Version-aware directive checkers for Cutter.
//!
//! A [`VersionChecker`] answers directive expressions such as `>=1.20` or
//! `~1.19.2` by testing them against a target version fixed at construction.
//! How versions and predicates are read is up to the [`VersionScheme`]:
//!
//! - [`SemverScheme`] understands semantic versions and range predicates.
//! - [`OpaqueScheme`] understands nothing, for setups without a resolver.

pub mod checker;
pub mod error;
pub mod predicate;
pub mod scheme;

pub use checker::VersionChecker;
pub use error::{Error, Result};
pub use predicate::{VersionPredicate, normalize_version};
pub use scheme::{OpaqueScheme, SchemeKind, SemverScheme, VersionScheme};
