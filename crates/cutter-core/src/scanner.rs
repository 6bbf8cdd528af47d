//! Streaming directive scanner.
//!
//! The scanner reads its input one byte at a time and mirrors every consumed
//! byte into an output buffer. Reads hand back [`Span`]s, byte ranges into
//! that buffer, which the caller may later wrap in or strip of a block
//! comment. Only the most recently returned span is ever patched, so patching
//! never invalidates a span still in use.

use crate::condition::is_commented;
use regex::bytes::Regex;
use std::io::{self, BufReader, Bytes, Read};

/// Opening marker of a directive.
pub const OPEN_MARKER: &[u8] = b"/*?";
/// Closing marker of a directive (and of any block comment).
pub const CLOSE_MARKER: &[u8] = b"*/";

const COMMENT_START: &[u8] = b"/*";
const COMMENT_END: &[u8] = b"*/";

/// A byte range of the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Outcome of [`Scanner::advance_until_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineScan {
    Matched(Span),
    /// Input ended without a match.
    Exhausted,
}

pub struct Scanner<R> {
    input: Bytes<BufReader<R>>,
    pushback: Option<u8>,
    output: Vec<u8>,
    line: usize,
}

impl<R: Read> Scanner<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: BufReader::new(input).bytes(),
            pushback: None,
            output: Vec::new(),
            line: 1,
        }
    }

    /// 1-based line of the input position.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    pub fn text(&self, span: Span) -> &[u8] {
        &self.output[span.start..span.end]
    }

    /// Consume input until the consumed text ends with `marker`.
    ///
    /// The returned span covers the consumed text, with the marker only when
    /// `retain` is set. `None` means the input ended first.
    pub fn advance_until(&mut self, marker: &[u8], retain: bool) -> io::Result<Option<Span>> {
        let start = self.output.len();
        while let Some(byte) = self.next_byte()? {
            self.output.push(byte);
            if self.output[start..].ends_with(marker) {
                let end = if retain {
                    self.output.len()
                } else {
                    self.output.len() - marker.len()
                };
                return Ok(Some(Span { start, end }));
            }
        }
        Ok(None)
    }

    /// Consume input until `pattern` matches the consumed text.
    ///
    /// Without `retain_terminator` the span stops where the match starts. With
    /// it, the span runs through the match; since the pattern may still grow
    /// while the match touches the last byte read, reading goes on until one
    /// byte past the match and that byte is handed back to the input. A match
    /// still pending when the input ends counts as found.
    pub fn advance_until_pattern(
        &mut self,
        pattern: &Regex,
        retain_terminator: bool,
    ) -> io::Result<LineScan> {
        let start = self.output.len();
        let mut pending = false;
        while let Some(byte) = self.next_byte()? {
            self.output.push(byte);
            let Some(found) = pattern.find(&self.output[start..]) else {
                continue;
            };
            if !retain_terminator {
                return Ok(LineScan::Matched(Span {
                    start,
                    end: start + found.start(),
                }));
            }
            if start + found.end() != self.output.len() {
                self.output.pop();
                self.unread(byte);
                return Ok(LineScan::Matched(Span {
                    start,
                    end: self.output.len(),
                }));
            }
            pending = true;
        }
        if pending {
            Ok(LineScan::Matched(Span {
                start,
                end: self.output.len(),
            }))
        } else {
            Ok(LineScan::Exhausted)
        }
    }

    /// Wrap the span in a block comment.
    pub fn comment(&mut self, span: Span) {
        self.output
            .splice(span.end..span.end, COMMENT_END.iter().copied());
        self.output
            .splice(span.start..span.start, COMMENT_START.iter().copied());
    }

    /// Remove the block comment around the span's non-whitespace text.
    ///
    /// Returns `false` and leaves the buffer alone when the span is not
    /// commented in the sense of [`is_commented`].
    pub fn uncomment(&mut self, span: Span) -> bool {
        let text = self.text(span);
        let Some(first) = text.iter().position(|b| !b.is_ascii_whitespace()) else {
            return false;
        };
        let Some(last) = text.iter().rposition(|b| !b.is_ascii_whitespace()) else {
            return false;
        };
        let (open, close) = (span.start + first, span.start + last + 1);
        if !is_commented(&self.output[open..close]) {
            return false;
        }
        self.output.drain(close - COMMENT_END.len()..close);
        self.output.drain(open..open + COMMENT_START.len());
        true
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.pushback.take() {
            Some(byte) => Some(byte),
            None => self.input.next().transpose()?,
        };
        if byte == Some(b'\n') {
            self.line += 1;
        }
        Ok(byte)
    }

    fn unread(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line -= 1;
        }
        self.pushback = Some(byte);
    }
}
