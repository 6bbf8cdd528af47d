//! Error types for cutter-fs

use std::path::PathBuf;

/// Result type for cutter-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a processing task
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Input path does not exist: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Invalid target version: {0}")]
    Version(#[from] cutter_version::Error),

    #[error("Failed processing file {path}: {source}")]
    Process {
        path: PathBuf,
        #[source]
        source: cutter_core::Error,
    },

    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
