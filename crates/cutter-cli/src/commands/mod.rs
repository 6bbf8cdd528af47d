//! Command implementations

mod file;
mod run;

pub use file::run_file;
pub use run::run_task;
