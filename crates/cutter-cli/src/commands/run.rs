//! `cutter run`: process a source tree.

use colored::Colorize;

use cutter_fs::{CutTask, FailurePolicy, TaskConfig};

use crate::cli::RunArgs;
use crate::error::{CliError, Result};

/// Merge the config file (if any) with command-line overrides.
pub fn resolve_config(args: &RunArgs) -> Result<TaskConfig> {
    let mut config = match &args.config {
        Some(path) => TaskConfig::load(path)?,
        None => {
            let input = args
                .input
                .clone()
                .ok_or_else(|| CliError::user("--input is required without --config"))?;
            let target = args
                .target
                .clone()
                .ok_or_else(|| CliError::user("--target is required without --config"))?;
            TaskConfig::new(input, target)
        }
    };

    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if let Some(target) = &args.target {
        config.target = target.clone();
    }
    if let Some(scheme) = args.scheme {
        config.scheme = scheme;
    }
    if args.debug {
        config.debug = true;
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    if args.keep_going {
        config.on_error = FailurePolicy::Skip;
    }
    Ok(config)
}

pub fn run_task(args: &RunArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let target = config.target.clone();
    let task = CutTask::new(config)?.dry_run(args.dry_run);

    println!(
        "{} Switching sources to {}...",
        "=>".blue().bold(),
        target.cyan()
    );

    let report = task.run()?;

    for path in &report.modified {
        let marker = if args.dry_run { "~".yellow() } else { "M".green() };
        println!("   {} {}", marker, path.display());
    }
    for failed in &report.failed {
        println!("   {} {}: {}", "!".red(), failed.path.display(), failed.message);
    }

    let verb = if args.dry_run { "would change" } else { "changed" };
    println!(
        "{} {} file(s) processed, {} {}.",
        "OK".green().bold(),
        report.processed,
        report.modified.len(),
        verb
    );

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} file(s) could not be processed",
            report.failed.len()
        )))
    }
}
