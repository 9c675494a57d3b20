//! pytest runs: the watch loop and fixture listing.

use super::{probe, quote_all, source_filter};
use crate::fs::existing_dirs;
use crate::{CommandRunner, Output, Result, Workspace};

const NO_WARNINGS: &str = "--disable-pytest-warnings";

/// Watch the sources with `entr` and rerun pytest on the test directories
/// whenever a file changes.
pub fn autotest(ws: &Workspace, runner: &dyn CommandRunner, warnings: bool) -> Result<()> {
    let dirs = existing_dirs(ws.config.tests_dirs.iter().map(|dir| ws.path(dir)));
    if dirs.is_empty() {
        tracing::info!("No test directory.");
        return Ok(());
    }
    probe(ws, "entr");

    let dirs: Vec<String> = dirs.iter().map(|dir| dir.display().to_string()).collect();
    let mut command = format!(
        "{} | entr -c {} -m pytest -v {}",
        source_filter(&ws.config).build(),
        ws.config.python,
        quote_all(&dirs)
    );
    if !warnings {
        command.push(' ');
        command.push_str(NO_WARNINGS);
    }
    runner.run(&command, &ws.root, Output::Stream)
}

/// List the pytest fixtures, either all of them or per test.
pub fn fixtures(
    ws: &Workspace,
    runner: &dyn CommandRunner,
    whole: bool,
    warnings: bool,
) -> Result<()> {
    let mode = if whole {
        "--fixtures"
    } else {
        "--fixtures-per-test"
    };
    let mut command = format!("{} -m pytest {mode}", ws.config.python);
    if !warnings {
        command.push(' ');
        command.push_str(NO_WARNINGS);
    }
    runner.run(&command, &ws.root, Output::Stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;
    use crate::Config;

    #[test]
    fn autotest_without_test_dirs_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path(), Config::default());
        let runner = RecordingRunner::new();

        autotest(&ws, &runner, false).unwrap();
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn autotest_pipes_sources_into_entr() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("tests")).unwrap();
        let ws = Workspace::new(dir.path(), Config::default());
        let runner = RecordingRunner::new();

        autotest(&ws, &runner, false).unwrap();
        let commands = runner.commands();
        assert_eq!(commands.len(), 1);
        let command = &commands[0];
        assert!(command.starts_with("find "), "{command}");
        let tests_dir = dir.path().join("tests");
        assert!(
            command.ends_with(&format!(
                "| entr -c python -m pytest -v '{}' --disable-pytest-warnings",
                tests_dir.display()
            )),
            "{command}"
        );
        assert_eq!(runner.calls.borrow()[0].output, Some(Output::Stream));
    }

    #[test]
    fn fixtures_modes() {
        let ws = Workspace::new("/work/demo", Config::default());
        let runner = RecordingRunner::new();

        fixtures(&ws, &runner, true, true).unwrap();
        fixtures(&ws, &runner, false, false).unwrap();
        assert_eq!(
            runner.commands(),
            vec![
                "python -m pytest --fixtures",
                "python -m pytest --fixtures-per-test --disable-pytest-warnings",
            ]
        );
    }
}
