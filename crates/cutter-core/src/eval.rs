//! Expression evaluation against an ordered chain of checkers.
//!
//! A directive's condition text is offered to each [`Checker`] in turn; the
//! first one that answers `True` or `False` decides. Checkers that do not
//! understand the text answer [`ExpressionResult::NotApplicable`].
//!
//! ```
//! use cutter_core::eval::Evaluator;
//!
//! let evaluator = Evaluator::literal();
//! assert!(evaluator.resolve(false, "if true").unwrap());
//! assert!(!evaluator.resolve(false, "false").unwrap());
//! // A taken branch disables every later branch of the chain.
//! assert!(!evaluator.resolve(true, "else if true").unwrap());
//! ```

use crate::error::SyntaxErrorKind;
use std::fmt;

const ELSE: &str = "else";
const ELIF: &str = "elif";
const IF: &str = "if";

/// Tri-state answer of a single checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionResult {
    True,
    False,
    /// The checker does not recognize the expression.
    NotApplicable,
}

impl ExpressionResult {
    pub fn value(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::NotApplicable => None,
        }
    }
}

impl From<bool> for ExpressionResult {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for ExpressionResult {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::NotApplicable, Self::from)
    }
}

/// A pluggable predicate over directive expressions.
///
/// `previous` tells whether an earlier branch of the same if/else chain was
/// taken. Most checkers ignore it.
pub trait Checker: Send + Sync {
    fn check(&self, previous: bool, expression: &str) -> ExpressionResult;
}

impl<F> Checker for F
where
    F: Fn(bool, &str) -> ExpressionResult + Send + Sync,
{
    fn check(&self, previous: bool, expression: &str) -> ExpressionResult {
        self(previous, expression)
    }
}

/// Recognizes the literals `true` and `false`. Debugging and test aid.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralChecker;

impl Checker for LiteralChecker {
    fn check(&self, _previous: bool, expression: &str) -> ExpressionResult {
        match expression {
            "true" => ExpressionResult::True,
            "false" => ExpressionResult::False,
            _ => ExpressionResult::NotApplicable,
        }
    }
}

/// Resolves directive expressions to booleans.
///
/// The checker list is fixed once built, so an evaluator can be shared
/// read-only between concurrent runs.
pub struct Evaluator {
    checkers: Vec<Box<dyn Checker>>,
}

impl Evaluator {
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::default()
    }

    /// An evaluator that only understands `true` and `false`.
    pub fn literal() -> Self {
        Self::builder().literals(true).build()
    }

    /// Number of configured checkers.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Resolve `expression` given whether a previous branch was taken.
    ///
    /// # Errors
    /// `EmptyExpression` when nothing remains after the keywords, and
    /// `UnresolvedExpression` when every checker answers `NotApplicable`.
    pub fn resolve(&self, previous: bool, expression: &str) -> Result<bool, SyntaxErrorKind> {
        if previous {
            return Ok(false);
        }

        let mut expression = expression.trim();
        if let Some(rest) = strip_keyword(expression, ELSE) {
            if rest.is_empty() {
                return Ok(!previous);
            }
            expression = rest;
        } else if let Some(rest) = strip_keyword(expression, ELIF) {
            expression = rest;
        }
        if let Some(rest) = strip_keyword(expression, IF) {
            expression = rest;
        }

        if expression.is_empty() {
            return Err(SyntaxErrorKind::EmptyExpression);
        }

        for checker in &self.checkers {
            if let Some(value) = checker.check(previous, expression).value() {
                return Ok(value);
            }
        }
        Err(SyntaxErrorKind::UnresolvedExpression {
            expression: expression.to_string(),
        })
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("checkers", &self.checkers.len())
            .finish()
    }
}

/// Collects checkers in resolution order.
#[derive(Default)]
pub struct EvaluatorBuilder {
    literals: bool,
    checkers: Vec<Box<dyn Checker>>,
}

impl EvaluatorBuilder {
    /// Put a [`LiteralChecker`] in front of the other checkers.
    pub fn literals(mut self, enabled: bool) -> Self {
        self.literals = enabled;
        self
    }

    pub fn checker(mut self, checker: impl Checker + 'static) -> Self {
        self.checkers.push(Box::new(checker));
        self
    }

    pub fn boxed(mut self, checker: Box<dyn Checker>) -> Self {
        self.checkers.push(checker);
        self
    }

    pub fn build(self) -> Evaluator {
        let mut checkers: Vec<Box<dyn Checker>> = Vec::with_capacity(self.checkers.len() + 1);
        if self.literals {
            checkers.push(Box::new(LiteralChecker));
        }
        checkers.extend(self.checkers);
        Evaluator { checkers }
    }
}

/// Strip `keyword` when it stands as a whole word at the start of `text`.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest.trim_start()),
        Some(_) => None,
    }
}
