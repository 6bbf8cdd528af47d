//! Error types for cutter-core

/// Result type for cutter-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while processing a single input
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Syntax error at line {line}: {kind}")]
    Syntax { line: usize, kind: SyntaxErrorKind },

    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processed output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub fn syntax(line: usize, kind: SyntaxErrorKind) -> Self {
        Self::Syntax { line, kind }
    }

    /// The syntax error kind, if this is a syntax error.
    pub fn kind(&self) -> Option<&SyntaxErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Malformed directive structure. Every kind is fatal for the current input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("expected */ to close the directive")]
    UnterminatedExpression,

    #[error("directive wasn't correctly closed: {expression}")]
    UnclosedExpression { expression: String },

    #[error("directive expression can't be empty")]
    EmptyExpression,

    #[error("no checker recognizes expression: {expression}")]
    UnresolvedExpression { expression: String },

    #[error("extension without context: {expression}")]
    ExtensionWithoutContext { expression: String },

    #[error("closer without context: {expression}")]
    CloserWithoutContext { expression: String },

    #[error("no end of line found after single-line directive")]
    UnterminatedLine,

    #[error("{depth} conditional block(s) not closed at end of input")]
    UnterminatedBlock { depth: usize },
}
