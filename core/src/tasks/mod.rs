//! The named tasks. Each one takes the resolved [`Workspace`] and the runner
//! it should delegate external commands to.

mod pytest;
mod quality;
mod scaffold;
mod tree;
mod venv;

pub use pytest::{autotest, fixtures};
pub use quality::{analyse, check_types, format};
pub use scaffold::generate;
pub use tree::tree;
pub use venv::{clean, develop, env, install};

use crate::find::{quote, FindFilter};
use crate::{CommandRunner, Config, Result, Workspace};

/// Filter used by the linter and the type checker.
fn lint_filter(config: &Config) -> FindFilter {
    FindFilter::new()
        .include_files(config.include_files.iter().cloned())
        .exclude_files(config.exclude_files.iter().cloned())
        .exclude_dirs(config.exclude_dirs.iter().cloned())
}

/// Filter used by the formatter and the test watcher; excluded file names
/// still get formatted.
fn source_filter(config: &Config) -> FindFilter {
    FindFilter::new()
        .include_files(config.include_files.iter().cloned())
        .exclude_dirs(config.exclude_dirs.iter().cloned())
}

/// Run the filter from the working root and collect the matching paths.
fn discover(
    ws: &Workspace,
    runner: &dyn CommandRunner,
    filter: &FindFilter,
) -> Result<Vec<String>> {
    let stdout = runner.capture(&filter.build(), &ws.root)?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn quote_all<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| quote(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn activate(config: &Config) -> String {
    format!("source {}/bin/activate", quote(&config.env_name))
}

/// Note in the debug log whether `tool` can be found. Purely diagnostic.
fn probe(ws: &Workspace, tool: &str) {
    if !ws.debug {
        return;
    }
    match which::which(tool) {
        Ok(path) => tracing::debug!("Using `{tool}` from {}", path.display()),
        Err(_) => tracing::debug!("`{tool}` was not found on PATH"),
    }
}
