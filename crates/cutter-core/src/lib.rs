//! Conditional comment processing for Cutter.
//!
//! Source files carry directives inside block comments:
//!
//! ```text
//! /*? if >=1.20 {*/
//! newApi();
//! /*?} else {*/
//! /*oldApi();*/
//! /*?}*/
//! ```
//!
//! Processing evaluates each directive and comments out (`/* ... */`) or
//! uncomments the code it governs, leaving every other byte untouched:
//!
//! - `/*? cond */` governs the next line of code.
//! - `/*? cond {*/ ... /*?}*/` governs a block; `/*?} else cond {*/` and
//!   `/*?} else {*/` continue it. Blocks nest.
//!
//! What a condition means is up to the [`Checker`]s the [`Evaluator`] is built
//! with. The engine only knows `if`, `else`, and `elif`.
//!
//! ```
//! use cutter_core::{Evaluator, process_str};
//!
//! let input = "/*? if false */\nlog();\n";
//! let output = process_str(input, &Evaluator::literal()).unwrap();
//! assert_eq!(output, "/*? if false */\n/*log();*/\n");
//! ```

pub mod condition;
pub mod error;
pub mod eval;
pub mod processor;
pub mod scanner;

pub use condition::{ConditionStack, ConditionToken, DirectiveKind, Toggle};
pub use error::{Error, Result, SyntaxErrorKind};
pub use eval::{Checker, Evaluator, EvaluatorBuilder, ExpressionResult, LiteralChecker};
pub use processor::{Processed, Processor};

use std::io::Read;

/// Process `input` to the end.
///
/// # Errors
/// Returns the first syntax error found; no partial output is produced.
pub fn process<R: Read>(input: R, evaluator: &Evaluator) -> Result<Processed> {
    Processor::new(input, evaluator).run()
}

/// Process a string, returning the transformed text.
pub fn process_str(input: &str, evaluator: &Evaluator) -> Result<String> {
    process(input.as_bytes(), evaluator)?.into_string()
}
