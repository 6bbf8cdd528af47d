//! Directive classification and the nested if/else-if/else state.

/// Shape of a directive, derived from the braces around its expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Governs the one following line.
    Single,
    /// `if ... {` begins a block.
    Opener,
    /// `} else ... {` continues a block.
    Extension,
    /// `}` ends a block.
    Closer,
}

impl DirectiveKind {
    /// Classify a trimmed directive expression.
    pub fn of(expression: &str) -> Self {
        let opens = expression.ends_with('{');
        let closes = expression.starts_with('}');
        match (closes, opens) {
            (true, true) => Self::Extension,
            (false, true) => Self::Opener,
            (true, false) => Self::Closer,
            (false, false) => Self::Single,
        }
    }

    /// Strip the structural braces, leaving the condition text.
    pub fn condition(self, expression: &str) -> &str {
        let expression = expression.trim();
        let stripped = match self {
            Self::Single => expression,
            Self::Opener => strip_open(expression),
            Self::Extension => strip_open(strip_close(expression)),
            Self::Closer => strip_close(expression),
        };
        stripped.trim()
    }
}

fn strip_open(expression: &str) -> &str {
    expression.strip_suffix('{').unwrap_or(expression)
}

fn strip_close(expression: &str) -> &str {
    expression.strip_prefix('}').unwrap_or(expression)
}

/// A resolved branch of a conditional chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionToken {
    pub kind: DirectiveKind,
    pub enabled: bool,
}

/// State of the innermost chain when the next branch or closer arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    /// Whether the branch now ending is active.
    pub enabled: bool,
    /// Whether any branch of the chain so far was active.
    pub taken: bool,
}

/// Stack of open conditional chains, innermost last.
///
/// Each frame holds the opener followed by the extensions seen so far.
#[derive(Debug, Default)]
pub struct ConditionStack {
    frames: Vec<Vec<ConditionToken>>,
}

impl ConditionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Start a new chain.
    pub fn open(&mut self, enabled: bool) {
        self.frames.push(vec![ConditionToken {
            kind: DirectiveKind::Opener,
            enabled,
        }]);
    }

    /// The innermost chain's current branch, or `None` when there is no chain
    /// an extension or closer could attach to.
    pub fn branch(&self) -> Option<Branch> {
        let frame = self.frames.last()?;
        let last = frame.last()?;
        if !matches!(last.kind, DirectiveKind::Opener | DirectiveKind::Extension) {
            return None;
        }
        Some(Branch {
            enabled: last.enabled,
            taken: frame.iter().any(|token| token.enabled),
        })
    }

    /// Append an else/else-if branch to the innermost chain.
    ///
    /// Returns `false` when there is no chain to extend.
    pub fn extend(&mut self, enabled: bool) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.push(ConditionToken {
                    kind: DirectiveKind::Extension,
                    enabled,
                });
                true
            }
            None => false,
        }
    }

    /// Pop the innermost chain.
    pub fn close(&mut self) -> Option<Vec<ConditionToken>> {
        self.frames.pop()
    }
}

/// What the comment policy wants done with a governed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Comment,
    Uncomment,
    Keep,
}

impl Toggle {
    /// Decide how `code` must change so that it is active exactly when
    /// `enabled`. Already-correct code is kept.
    pub fn for_code(enabled: bool, code: &[u8]) -> Self {
        match (enabled, is_commented(code)) {
            (true, true) => Self::Uncomment,
            (false, false) => Self::Comment,
            _ => Self::Keep,
        }
    }
}

/// Whether `code`, ignoring surrounding whitespace, is one `/* ... */` block.
///
/// The leading `/*` must be closed by the final `*/`. Comments inside count
/// as nested, so `/* a */ b(); /* c */` is active code while a wrapped span
/// holding its own comments is still recognized as wrapped.
pub fn is_commented(code: &[u8]) -> bool {
    let trimmed = code.trim_ascii();
    if trimmed.len() < 4 || !trimmed.starts_with(b"/*") || !trimmed.ends_with(b"*/") {
        return false;
    }

    let mut depth = 0usize;
    let mut i = 0;
    while i + 1 < trimmed.len() {
        match &trimmed[i..i + 2] {
            b"/*" => {
                depth += 1;
                i += 2;
            }
            b"*/" => {
                depth = depth.saturating_sub(1);
                i += 2;
                if depth == 0 {
                    return i == trimmed.len();
                }
            }
            _ => i += 1,
        }
    }
    false
}
