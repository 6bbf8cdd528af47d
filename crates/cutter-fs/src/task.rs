//! Processing of whole source trees.

use crate::config::{FailurePolicy, TaskConfig};
use crate::{Error, Result, io};
use cutter_core::{Evaluator, Processed};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A file that could not be processed under [`FailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a [`CutTask`] run. Paths are relative to the input root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReport {
    /// Files that went through the processor.
    pub processed: usize,
    /// Files whose content changed.
    pub modified: Vec<PathBuf>,
    /// Files written to the output root.
    pub written: usize,
    pub failed: Vec<FailedFile>,
}

impl TaskReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Switches every matching file under the input root to the target version.
///
/// Files are visited in file-name order. In-place runs only rewrite files whose
/// content changed; runs into a separate output root write every processed file.
#[derive(Debug, Clone)]
pub struct CutTask {
    config: TaskConfig,
    evaluator: Arc<Evaluator>,
    dry_run: bool,
}

impl CutTask {
    pub fn new(config: TaskConfig) -> Result<Self> {
        let evaluator = Arc::new(config.evaluator()?);
        Ok(Self::with_evaluator(config, evaluator))
    }

    /// Use a prepared evaluator instead of the one the config describes.
    pub fn with_evaluator(config: TaskConfig, evaluator: Arc<Evaluator>) -> Self {
        Self {
            config,
            evaluator,
            dry_run: false,
        }
    }

    /// Process and report without writing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Arc<Evaluator> {
        &self.evaluator
    }

    pub fn run(&self) -> Result<TaskReport> {
        let input = &self.config.input;
        if !input.exists() {
            return Err(Error::InputNotFound {
                path: input.clone(),
            });
        }

        info!(
            input = %input.display(),
            output = %self.config.output_root().display(),
            target = %self.config.target,
            scheme = %self.config.scheme,
            "Processing sources"
        );

        let mut report = TaskReport::default();
        let skip_root = (!self.config.in_place()).then(|| self.config.output_root().to_path_buf());
        let walker = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| skip_root.as_deref() != Some(entry.path()));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.config.accepts(entry.path()) {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(input).unwrap_or(path).to_path_buf();
            match self.handle(path, &relative) {
                Ok((modified, written)) => {
                    report.processed += 1;
                    if modified {
                        report.modified.push(relative);
                    }
                    if written {
                        report.written += 1;
                    }
                }
                Err(e) if self.config.on_error == FailurePolicy::Skip => {
                    warn!(path = %path.display(), error = %e, "Skipping file");
                    report.failed.push(FailedFile {
                        path: relative,
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            processed = report.processed,
            modified = report.modified.len(),
            written = report.written,
            failed = report.failed.len(),
            "Processing finished"
        );
        Ok(report)
    }

    /// Process one file and return the result without writing it.
    pub fn process_file(&self, path: &Path) -> Result<Processed> {
        let bytes = io::read_bytes(path)?;
        cutter_core::process(bytes.as_slice(), &self.evaluator).map_err(|source| Error::Process {
            path: path.to_path_buf(),
            source,
        })
    }

    fn handle(&self, path: &Path, relative: &Path) -> Result<(bool, bool)> {
        let processed = self.process_file(path)?;
        let write = processed.modified || !self.config.in_place();
        debug!(path = %relative.display(), modified = processed.modified, write, "Processed file");

        if write && !self.dry_run {
            io::write_atomic(&self.output_path(relative), &processed.output)?;
        }
        Ok((processed.modified, write && !self.dry_run))
    }

    fn output_path(&self, relative: &Path) -> PathBuf {
        let root = self.config.output_root();
        // A single-file input has an empty relative path
        if relative.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(relative)
        }
    }
}
