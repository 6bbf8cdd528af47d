//! Version schemes: how target versions and predicates are read.

use crate::checker::VersionChecker;
use crate::error::{Error, Result};
use crate::predicate::{VersionPredicate, normalize_version};
use cutter_core::Checker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parses target versions and tests predicates against them.
pub trait VersionScheme: Send + Sync {
    type Version: Send + Sync + fmt::Debug;

    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn parse_version(&self, raw: &str) -> Result<Self::Version>;

    /// Test `predicate` against `version`. Errors mean the predicate is not
    /// something this scheme understands.
    fn test(&self, version: &Self::Version, predicate: &str) -> Result<bool>;
}

/// Semantic versions with `major.minor` shorthand; see [`crate::predicate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverScheme;

impl VersionScheme for SemverScheme {
    type Version = semver::Version;

    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse_version(&self, raw: &str) -> Result<Self::Version> {
        normalize_version(raw)
    }

    fn test(&self, version: &Self::Version, predicate: &str) -> Result<bool> {
        Ok(VersionPredicate::parse(predicate)?.matches(version))
    }
}

/// Keeps the target as an opaque string and understands no predicate.
///
/// Used when no real resolver is available: processing still runs, but every
/// version expression is left for other checkers (and fails if none match).
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueScheme;

impl VersionScheme for OpaqueScheme {
    type Version = String;

    fn name(&self) -> &'static str {
        "opaque"
    }

    fn parse_version(&self, raw: &str) -> Result<Self::Version> {
        Ok(raw.trim().to_string())
    }

    fn test(&self, _version: &Self::Version, _predicate: &str) -> Result<bool> {
        Err(Error::Unsupported {
            scheme: self.name(),
        })
    }
}

/// Scheme selection for configuration files and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    #[default]
    Semver,
    Opaque,
}

impl SchemeKind {
    /// Build a checker for `target` under this scheme.
    pub fn checker(self, target: &str) -> Result<Box<dyn Checker>> {
        Ok(match self {
            Self::Semver => Box::new(VersionChecker::new(SemverScheme, target)?),
            Self::Opaque => Box::new(VersionChecker::new(OpaqueScheme, target)?),
        })
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Semver => "semver",
            Self::Opaque => "opaque",
        })
    }
}

impl std::str::FromStr for SchemeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "semver" => Ok(Self::Semver),
            "opaque" => Ok(Self::Opaque),
            other => Err(format!("unknown version scheme '{other}' (expected semver or opaque)")),
        }
    }
}
