//! The single forward pass over one input.

use crate::condition::{ConditionStack, DirectiveKind, Toggle};
use crate::error::{Error, Result, SyntaxErrorKind};
use crate::eval::Evaluator;
use crate::scanner::{CLOSE_MARKER, LineScan, OPEN_MARKER, Scanner, Span};
use regex::bytes::Regex;
use std::io::Read;
use std::sync::LazyLock;
use tracing::debug;

/// End of the first non-blank line, including trailing blank lines' breaks.
static CODE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)\S\s*(?:\r\n|\r|\n)").expect("Invalid code line regex")
});

/// Output of a processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub output: Vec<u8>,
    /// Whether any governed code was commented or uncommented.
    pub modified: bool,
}

impl Processed {
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.output)?)
    }
}

/// Drives the scanner over one input, toggling governed code.
pub struct Processor<'a, R> {
    scanner: Scanner<R>,
    evaluator: &'a Evaluator,
    conditions: ConditionStack,
    modified: bool,
}

impl<'a, R: Read> Processor<'a, R> {
    pub fn new(input: R, evaluator: &'a Evaluator) -> Self {
        Self {
            scanner: Scanner::new(input),
            evaluator,
            conditions: ConditionStack::new(),
            modified: false,
        }
    }

    pub fn run(mut self) -> Result<Processed> {
        while let Some(preceding) = self.scanner.advance_until(OPEN_MARKER, false)? {
            let expression = self.read_expression()?;
            self.directive(&expression, preceding)?;
        }

        if !self.conditions.is_empty() {
            let depth = self.conditions.depth();
            return Err(self.error(SyntaxErrorKind::UnterminatedBlock { depth }));
        }

        Ok(Processed {
            output: self.scanner.into_output(),
            modified: self.modified,
        })
    }

    fn read_expression(&mut self) -> Result<String> {
        let span = self
            .scanner
            .advance_until(CLOSE_MARKER, false)?
            .ok_or_else(|| self.error(SyntaxErrorKind::UnterminatedExpression))?;
        let raw = String::from_utf8_lossy(self.scanner.text(span)).into_owned();
        if raw.as_bytes().windows(OPEN_MARKER.len()).any(|w| w == OPEN_MARKER) {
            return Err(self.error(SyntaxErrorKind::UnclosedExpression {
                expression: raw.trim().to_string(),
            }));
        }
        // Older directives end in `?*/`.
        let raw = raw.strip_suffix('?').unwrap_or(&raw);
        Ok(raw.trim().to_string())
    }

    fn directive(&mut self, expression: &str, preceding: Span) -> Result<()> {
        let kind = DirectiveKind::of(expression);
        let condition = kind.condition(expression);
        debug!(line = self.scanner.line(), ?kind, expression, "directive");

        match kind {
            DirectiveKind::Single => {
                let enabled = self.resolve(false, condition)?;
                let line = match self.scanner.advance_until_pattern(&CODE_LINE, true)? {
                    LineScan::Matched(span) => code_line(self.scanner.text(span), span),
                    LineScan::Exhausted => {
                        return Err(self.error(SyntaxErrorKind::UnterminatedLine));
                    }
                };
                self.apply(enabled, line);
            }
            DirectiveKind::Opener => {
                let enabled = self.resolve(false, condition)?;
                self.conditions.open(enabled);
            }
            DirectiveKind::Extension => {
                let branch = self.conditions.branch().ok_or_else(|| {
                    self.error(SyntaxErrorKind::ExtensionWithoutContext {
                        expression: expression.to_string(),
                    })
                })?;
                let enabled = self.resolve(branch.taken, condition)?;
                self.apply(branch.enabled, preceding);
                self.conditions.extend(enabled);
            }
            DirectiveKind::Closer => {
                let branch = self.conditions.branch().ok_or_else(|| {
                    self.error(SyntaxErrorKind::CloserWithoutContext {
                        expression: expression.to_string(),
                    })
                })?;
                self.apply(branch.enabled, preceding);
                self.conditions.close();
            }
        }
        Ok(())
    }

    fn resolve(&self, previous: bool, condition: &str) -> Result<bool> {
        self.evaluator
            .resolve(previous, condition)
            .map_err(|kind| self.error(kind))
    }

    fn apply(&mut self, enabled: bool, span: Span) {
        match Toggle::for_code(enabled, self.scanner.text(span)) {
            Toggle::Comment => {
                self.scanner.comment(span);
                self.modified = true;
            }
            Toggle::Uncomment => {
                self.modified |= self.scanner.uncomment(span);
            }
            Toggle::Keep => {}
        }
    }

    fn error(&self, kind: SyntaxErrorKind) -> Error {
        Error::syntax(self.scanner.line(), kind)
    }
}

/// Narrow a scanned span to the line holding its first non-blank byte,
/// without line breaks.
fn code_line(text: &[u8], span: Span) -> Span {
    let is_break = |b: &u8| *b == b'\n' || *b == b'\r';
    let first = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    let start = text[..first]
        .iter()
        .rposition(is_break)
        .map_or(0, |i| i + 1);
    let end = text[first..]
        .iter()
        .position(is_break)
        .map_or(text.len(), |i| first + i);
    Span {
        start: span.start + start,
        end: span.start + end,
    }
}
