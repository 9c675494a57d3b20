//! Static checks and formatting over the discovered source files.

use super::{discover, lint_filter, probe, quote_all, source_filter};
use crate::fs::TransientFile;
use crate::{CommandRunner, Output, Result, Workspace};

const MYPY_CONTENT: &str = "[mypy]\nignore_missing_imports = True\nexplicit_package_bases = True";

fn log_files(action: &str, files: &[String]) {
    tracing::debug!("Files to {action}:\n{}\n", files.join("\n"));
}

/// Lint the sources with pylint.
pub fn analyse(ws: &Workspace, runner: &dyn CommandRunner) -> Result<()> {
    tracing::debug!("Excluded files: {}", ws.config.exclude_files.join(", "));
    tracing::debug!("Excluded directories: {}", ws.config.exclude_dirs.join(", "));

    let files = discover(ws, runner, &lint_filter(&ws.config))?;
    if files.is_empty() {
        tracing::info!("No files to analyse.");
        return Ok(());
    }
    log_files("analyse", &files);
    tracing::info!("Analyzing {} files...", files.len());

    probe(ws, &ws.config.python);
    runner.run(
        &format!("{} -m pylint {}", ws.config.python, quote_all(&files)),
        &ws.root,
        Output::Stream,
    )
}

/// Reformat the sources with black.
pub fn format(ws: &Workspace, runner: &dyn CommandRunner) -> Result<()> {
    let files = discover(ws, runner, &source_filter(&ws.config))?;
    if files.is_empty() {
        tracing::info!("No files to format.");
        return Ok(());
    }
    log_files("format", &files);

    probe(ws, "black");
    runner.run(
        &format!("black {}", quote_all(&files)),
        &ws.root,
        Output::Stream,
    )
}

/// Type-check the sources with mypy.
///
/// The mypy configuration only exists while the checker runs; it is removed
/// on every exit path, including a failed run.
pub fn check_types(ws: &Workspace, runner: &dyn CommandRunner) -> Result<()> {
    let files = discover(ws, runner, &lint_filter(&ws.config))?;
    if files.is_empty() {
        tracing::info!("No files to check types.");
        return Ok(());
    }

    let _config = TransientFile::create(
        ws.path(&ws.config.mypy_config),
        MYPY_CONTENT,
        "mypy config",
    )?;

    log_files("check types", &files);
    tracing::info!("Checking {} files...", files.len());

    probe(ws, &ws.config.python);
    runner.run(
        &format!("{} -m mypy {}", ws.config.python, quote_all(&files)),
        &ws.root,
        Output::Stream,
    )
}
