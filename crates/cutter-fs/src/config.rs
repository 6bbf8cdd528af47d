//! Task configuration and format-agnostic loading

use crate::{Error, Result, io};
use cutter_core::Evaluator;
use cutter_version::SchemeKind;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};

/// What to do when a single file fails to process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the task at the first failing file.
    #[default]
    Abort,
    /// Report the failing file and keep going.
    Skip,
}

/// Settings for one processing run over a source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Root directory (or single file) to process.
    pub input: PathBuf,

    /// Output root. When absent, files are rewritten in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Version the sources are switched to.
    pub target: String,

    #[serde(default)]
    pub scheme: SchemeKind,

    /// Enables the `true`/`false` literal checker.
    #[serde(default)]
    pub debug: bool,

    /// File extensions to process, without the dot. Empty means all files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub on_error: FailurePolicy,
}

impl TaskConfig {
    pub fn new(input: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            target: target.into(),
            scheme: SchemeKind::default(),
            debug: false,
            extensions: Vec::new(),
            on_error: FailurePolicy::default(),
        }
    }

    /// Load a config file, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = ConfigStore::new().load(path)?;
        if let Some(base) = path.parent() {
            config.input = base.join(&config.input);
            config.output = config.output.map(|output| base.join(output));
        }
        Ok(config)
    }

    /// Where processed files go.
    pub fn output_root(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    pub fn in_place(&self) -> bool {
        self.output.as_deref().is_none_or(|output| output == self.input)
    }

    /// Whether `path` has one of the configured extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }

    /// Build the evaluator for this run: literals first when debugging, then
    /// the version checker for the target.
    pub fn evaluator(&self) -> Result<Evaluator> {
        Ok(Evaluator::builder()
            .literals(self.debug)
            .boxed(self.scheme.checker(&self.target)?)
            .build())
    }
}

/// Format-agnostic configuration loader.
///
/// Format is detected from the file extension.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => {
                let content = io::read_text(path)?;
                toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string()))
            }
            "json" => {
                let content = io::read_text(path)?;
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            "yaml" | "yml" => {
                let content = io::read_text(path)?;
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}
