//! Filesystem layer for Cutter
//!
//! Loads [`TaskConfig`]s, walks source trees and writes processed files
//! atomically. The directive engine itself lives in `cutter-core`.

pub mod config;
pub mod error;
pub mod io;
pub mod task;

pub use config::{ConfigStore, FailurePolicy, TaskConfig};
pub use error::{Error, Result};
pub use task::{CutTask, FailedFile, TaskReport};
