//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use cutter_version::SchemeKind;
use std::path::PathBuf;

/// Cutter - switch version-conditional source comments to a target version
#[derive(Parser, Debug)]
#[command(name = "cutter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Process a source tree for a target version
    ///
    /// Settings come from --config when given; flags override them.
    ///
    /// Examples:
    ///   cutter run --input src --target 1.19.4
    ///   cutter run --config cutter.toml --dry-run
    ///   cutter run --input src --output build/src --target 1.20 --ext java
    Run(RunArgs),

    /// Process one file and print the result to stdout
    File {
        /// File to process
        path: PathBuf,

        /// Version to switch to
        #[arg(short, long)]
        target: String,

        /// Version scheme used to read the target and predicates
        #[arg(long, default_value_t = SchemeKind::Semver)]
        scheme: SchemeKind,

        /// Also accept `true`/`false` as expressions
        #[arg(long)]
        debug: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   cutter completions bash > ~/.local/share/bash-completion/completions/cutter
    ///   cutter completions zsh > ~/.zfunc/_cutter
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Task config file (.toml, .json, .yaml)
    #[arg(short, long, env = "CUTTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input directory or file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output root; files are rewritten in place when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Version to switch to
    #[arg(short, long)]
    pub target: Option<String>,

    /// Version scheme used to read the target and predicates
    #[arg(long)]
    pub scheme: Option<SchemeKind>,

    /// Also accept `true`/`false` as expressions
    #[arg(long)]
    pub debug: bool,

    /// Only process files with this extension (repeatable)
    #[arg(short = 'e', long = "ext")]
    pub extensions: Vec<String>,

    /// Report failing files and continue instead of stopping
    #[arg(short, long)]
    pub keep_going: bool,

    /// Process without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
