//! Error types for cutter-version

/// Errors raised while parsing versions and predicates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid version string.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    /// Predicate text that is not a version predicate.
    #[error("invalid predicate '{predicate}': {reason}")]
    InvalidPredicate { predicate: String, reason: String },

    /// The scheme cannot evaluate predicates at all.
    #[error("the {scheme} scheme does not evaluate predicates")]
    Unsupported { scheme: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
