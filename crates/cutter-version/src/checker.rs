//! Adapter from a [`VersionScheme`] to a directive [`Checker`].

use crate::error::Result;
use crate::scheme::VersionScheme;
use cutter_core::{Checker, ExpressionResult};
use tracing::trace;

/// Tests directive expressions as version predicates against a fixed target.
///
/// Expressions the scheme cannot parse are `NotApplicable`, so later checkers
/// still get a chance.
///
/// ```
/// use cutter_core::{Checker, ExpressionResult};
/// use cutter_version::{SemverScheme, VersionChecker};
///
/// let checker = VersionChecker::new(SemverScheme, "1.20.4").unwrap();
/// assert_eq!(checker.check(false, ">=1.20"), ExpressionResult::True);
/// assert_eq!(checker.check(false, "~1.19"), ExpressionResult::False);
/// assert_eq!(checker.check(false, "debug"), ExpressionResult::NotApplicable);
/// ```
#[derive(Debug)]
pub struct VersionChecker<S: VersionScheme> {
    scheme: S,
    target: S::Version,
}

impl<S: VersionScheme> VersionChecker<S> {
    /// Resolve `target` with `scheme` once, up front.
    pub fn new(scheme: S, target: &str) -> Result<Self> {
        let target = scheme.parse_version(target)?;
        Ok(Self { scheme, target })
    }

    pub fn target(&self) -> &S::Version {
        &self.target
    }
}

impl<S: VersionScheme> Checker for VersionChecker<S> {
    fn check(&self, _previous: bool, expression: &str) -> ExpressionResult {
        match self.scheme.test(&self.target, expression) {
            Ok(value) => value.into(),
            Err(e) => {
                trace!(scheme = self.scheme.name(), expression, error = %e, "not a version predicate");
                ExpressionResult::NotApplicable
            }
        }
    }
}
