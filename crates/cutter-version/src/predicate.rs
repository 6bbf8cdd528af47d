//! Version predicate parsing and matching.
//!
//! A predicate is a list of terms separated by whitespace or commas; a
//! version satisfies the predicate when it satisfies every term.
//!
//! - `>=1.19`, `>1.19`, `<=1.20.4`, `<1.21`, `=1.20.1`, `!=1.20`
//! - `~1.20.1`: at least 1.20.1 within 1.20.*
//! - `^1.20.1`: at least 1.20.1 within 1.*
//! - `1.20.1`: exactly that version
//! - `1.20.x`, `1.x`, `*`: any version with that prefix
//!
//! Missing components default to zero (`1.20` is `1.20.0`).
//!
//! # Examples
//!
//! ```
//! use cutter_version::predicate::{VersionPredicate, normalize_version};
//!
//! let predicate = VersionPredicate::parse(">=1.19 <1.21").unwrap();
//! assert!(predicate.matches(&normalize_version("1.20.4").unwrap()));
//! assert!(!predicate.matches(&normalize_version("1.21").unwrap()));
//!
//! let predicate = VersionPredicate::parse("~1.20.1").unwrap();
//! assert!(predicate.matches(&normalize_version("1.20.6").unwrap()));
//! assert!(!predicate.matches(&normalize_version("1.21.0").unwrap()));
//! ```

use crate::error::{Error, Result};
use semver::Version;
use std::fmt;

const OPERATOR_CHARS: &[char] = &['>', '<', '=', '!', '~', '^'];
const WILDCARDS: &[&str] = &["x", "X", "*"];

/// A single version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    /// `>=`
    Gte,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `<`
    Lt,
    /// `=`, `==` or no operator
    Eq,
    /// `!=`
    Ne,
    /// `~`
    Tilde,
    /// `^`
    Caret,
}

#[derive(Debug, Clone)]
enum Term {
    Compare { op: CompareOp, version: Version },
    /// `1.20.x` and friends. `None` components match anything.
    Prefix {
        major: Option<u64>,
        minor: Option<u64>,
    },
}

impl Term {
    fn matches(&self, candidate: &Version) -> bool {
        match self {
            Self::Compare { op, version } => match op {
                CompareOp::Gte => candidate >= version,
                CompareOp::Gt => candidate > version,
                CompareOp::Lte => candidate <= version,
                CompareOp::Lt => candidate < version,
                CompareOp::Eq => candidate == version,
                CompareOp::Ne => candidate != version,
                CompareOp::Tilde => {
                    candidate >= version
                        && candidate.major == version.major
                        && candidate.minor == version.minor
                }
                CompareOp::Caret => candidate >= version && candidate.major == version.major,
            },
            Self::Prefix { major, minor } => {
                major.is_none_or(|m| candidate.major == m)
                    && minor.is_none_or(|m| candidate.minor == m)
            }
        }
    }
}

/// A parsed version predicate.
#[derive(Debug, Clone)]
pub struct VersionPredicate {
    terms: Vec<Term>,
    /// The original predicate string for display.
    raw: String,
}

impl VersionPredicate {
    /// Parse a predicate string.
    ///
    /// An operator may be separated from its version by spaces (`>= 1.20`).
    pub fn parse(predicate: &str) -> Result<Self> {
        let raw = predicate.trim().to_string();
        let mut terms = Vec::new();
        let mut pending_op = String::new();

        for token in raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
                pending_op.push_str(token);
                continue;
            }
            let term = format!("{pending_op}{token}");
            pending_op.clear();
            terms.push(parse_term(&term)?);
        }

        if !pending_op.is_empty() {
            return Err(Error::InvalidPredicate {
                predicate: raw,
                reason: format!("operator '{pending_op}' without a version"),
            });
        }
        if terms.is_empty() {
            return Err(Error::InvalidPredicate {
                predicate: raw,
                reason: "empty predicate".to_string(),
            });
        }

        Ok(Self { terms, raw })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.terms.iter().all(|term| term.matches(version))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a single term like `>=1.20` or `1.20.x`.
fn parse_term(s: &str) -> Result<Term> {
    let (op, version_str) = if let Some(rest) = s.strip_prefix(">=") {
        (CompareOp::Gte, rest)
    } else if let Some(rest) = s.strip_prefix("<=") {
        (CompareOp::Lte, rest)
    } else if let Some(rest) = s.strip_prefix("!=") {
        (CompareOp::Ne, rest)
    } else if let Some(rest) = s.strip_prefix("==") {
        (CompareOp::Eq, rest)
    } else if let Some(rest) = s.strip_prefix('>') {
        (CompareOp::Gt, rest)
    } else if let Some(rest) = s.strip_prefix('<') {
        (CompareOp::Lt, rest)
    } else if let Some(rest) = s.strip_prefix('=') {
        (CompareOp::Eq, rest)
    } else if let Some(rest) = s.strip_prefix('~') {
        (CompareOp::Tilde, rest)
    } else if let Some(rest) = s.strip_prefix('^') {
        (CompareOp::Caret, rest)
    } else {
        // Bare version implies =
        (CompareOp::Eq, s)
    };

    let version_str = version_str.trim();
    let invalid = |reason: String| Error::InvalidPredicate {
        predicate: s.to_string(),
        reason,
    };

    if version_str.split('.').any(|part| WILDCARDS.contains(&part)) {
        if op != CompareOp::Eq {
            return Err(invalid("wildcards only combine with '='".to_string()));
        }
        return parse_prefix(version_str).ok_or_else(|| invalid(format!("invalid wildcard version: {version_str}")));
    }

    let version = normalize_version(version_str)
        .map_err(|_| invalid(format!("invalid version: {version_str}")))?;
    Ok(Term::Compare { op, version })
}

/// Parse `1.20.x`, `1.x` or `*`. Everything after the first wildcard must be
/// a wildcard too.
fn parse_prefix(s: &str) -> Option<Term> {
    let mut numbers = Vec::new();
    let mut wild = false;
    for part in s.split('.') {
        if WILDCARDS.contains(&part) {
            wild = true;
        } else if wild {
            return None;
        } else {
            numbers.push(part.parse::<u64>().ok()?);
        }
    }
    match numbers.as_slice() {
        [] => Some(Term::Prefix {
            major: None,
            minor: None,
        }),
        [major] => Some(Term::Prefix {
            major: Some(*major),
            minor: None,
        }),
        [major, minor] => Some(Term::Prefix {
            major: Some(*major),
            minor: Some(*minor),
        }),
        _ => None,
    }
}

/// Parse a version, appending `.0` for missing minor and patch components.
///
/// - `"1.20"` -> `1.20.0`
/// - `"1.21-rc1"` -> `1.21.0-rc1`
/// - `"1.20.1"` -> `1.20.1`
pub fn normalize_version(s: &str) -> Result<Version> {
    let s = s.trim();
    let first_error = match Version::parse(s) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };

    let split = s.find(['-', '+']).unwrap_or(s.len());
    let (core, suffix) = s.split_at(split);
    let padding = match core.split('.').count() {
        1 => ".0.0",
        2 => ".0",
        _ => "",
    };
    if padding.is_empty() {
        return Err(Error::InvalidVersion {
            version: s.to_string(),
            source: first_error,
        });
    }

    Version::parse(&format!("{core}{padding}{suffix}")).map_err(|_| Error::InvalidVersion {
        version: s.to_string(),
        source: first_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> Version {
        normalize_version(s).unwrap()
    }

    // --- VersionPredicate::parse ---

    #[test]
    fn test_parse_compound() {
        let p = VersionPredicate::parse(">=1.19 <1.21").unwrap();
        assert_eq!(p.terms.len(), 2);
        assert_eq!(p.as_str(), ">=1.19 <1.21");
    }

    #[test]
    fn test_parse_comma_separated() {
        let p = VersionPredicate::parse(">=1.19,<1.21").unwrap();
        assert_eq!(p.terms.len(), 2);
    }

    #[test]
    fn test_parse_detached_operator() {
        let p = VersionPredicate::parse(">= 1.20").unwrap();
        assert_eq!(p.terms.len(), 1);
        assert!(p.matches(&v("1.20.1")));
    }

    #[rstest]
    #[case("")]
    #[case(">=")]
    #[case(">=abc")]
    #[case("true")]
    #[case(">=1.x")]
    #[case("1.x.2")]
    #[case("1.2.3.4")]
    fn test_parse_rejected(#[case] predicate: &str) {
        assert!(VersionPredicate::parse(predicate).is_err());
    }

    // --- matches ---

    #[rstest]
    #[case(">=1.20", "1.20.0", true)]
    #[case(">=1.20", "1.19.4", false)]
    #[case(">1.20", "1.20.1", true)]
    #[case(">1.20", "1.20", false)]
    #[case("<=1.20.4", "1.20.4", true)]
    #[case("<1.21", "1.21.0", false)]
    #[case("1.20.1", "1.20.1", true)]
    #[case("1.20.1", "1.20.2", false)]
    #[case("=1.20", "1.20.0", true)]
    #[case("==1.20", "1.20.0", true)]
    #[case("!=1.20", "1.20.1", true)]
    #[case("~1.20.1", "1.20.1", true)]
    #[case("~1.20.1", "1.20.6", true)]
    #[case("~1.20.1", "1.20.0", false)]
    #[case("~1.20.1", "1.21.0", false)]
    #[case("^1.20.1", "1.21.3", true)]
    #[case("^1.20.1", "2.0.0", false)]
    #[case("1.20.x", "1.20.6", true)]
    #[case("1.20.x", "1.21.0", false)]
    #[case("1.x", "1.5.2", true)]
    #[case("*", "7.0.0", true)]
    #[case(">=1.19 <1.21", "1.20.4", true)]
    #[case(">=1.19 <1.21", "1.21", false)]
    #[case(">=1.20", "1.20.5-pre1", true)]
    fn test_matches(#[case] predicate: &str, #[case] version: &str, #[case] expected: bool) {
        let p = VersionPredicate::parse(predicate).unwrap();
        assert_eq!(p.matches(&v(version)), expected, "{predicate} vs {version}");
    }

    // --- normalize_version ---

    #[rstest]
    #[case("1.20.1", Version::new(1, 20, 1))]
    #[case("1.20", Version::new(1, 20, 0))]
    #[case("1", Version::new(1, 0, 0))]
    #[case("  1.20.0  ", Version::new(1, 20, 0))]
    fn test_normalize(#[case] input: &str, #[case] expected: Version) {
        assert_eq!(normalize_version(input).unwrap(), expected);
    }

    #[test]
    fn test_normalize_keeps_prerelease() {
        let version = normalize_version("1.21-rc1").unwrap();
        assert_eq!(version.to_string(), "1.21.0-rc1");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_version("23w13a").is_err());
        assert!(normalize_version("").is_err());
    }

    #[test]
    fn test_display() {
        let p = VersionPredicate::parse(" ~1.20.1 ").unwrap();
        assert_eq!(format!("{p}"), "~1.20.1");
    }
}
