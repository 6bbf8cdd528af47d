//! `cutter file`: process one file to stdout.

use std::io::Write;
use std::path::Path;

use cutter_fs::{TaskConfig, io};
use cutter_version::SchemeKind;

use crate::error::Result;

pub fn run_file(path: &Path, target: &str, scheme: SchemeKind, debug: bool) -> Result<()> {
    let mut config = TaskConfig::new(path, target);
    config.scheme = scheme;
    config.debug = debug;
    let evaluator = config.evaluator()?;

    let bytes = io::read_bytes(path)?;
    let processed = cutter_core::process(bytes.as_slice(), &evaluator)
        .map_err(|source| cutter_fs::Error::Process {
            path: path.to_path_buf(),
            source,
        })?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&processed.output)?;
    stdout.flush()?;
    Ok(())
}
