//! Virtual environment lifecycle: create, install, develop, clean.

use super::{activate, probe};
use crate::find::quote;
use crate::{CommandRunner, Error, Output, Result, Workspace};

/// Create a bare virtual environment, then upgrade its pip.
pub fn env(ws: &Workspace, runner: &dyn CommandRunner) -> Result<()> {
    let name = &ws.config.env_name;
    if ws.env_dir().is_dir() {
        tracing::info!("Directory `{name}` already exists.");
        return Ok(());
    }

    probe(ws, &ws.config.python);
    let output = Output::unless_debug(ws.debug);
    runner.run(
        &format!("{} -m venv {}", ws.config.python, quote(name)),
        &ws.root,
        output,
    )?;
    tracing::info!("Create successfully virtual environment `{name}`.");

    runner.run(
        &format!("{} && pip install --upgrade pip", activate(&ws.config)),
        &ws.root,
        output,
    )
}

/// Install the requirements file into the virtual environment.
pub fn install(ws: &Workspace, runner: &dyn CommandRunner) -> Result<()> {
    if !ws.env_dir().is_dir() {
        tracing::info!(
            "Virtual environment `{}` does not exist.",
            ws.config.env_name
        );
        return Ok(());
    }

    let requirements = &ws.config.requirements;
    runner.run(
        &format!(
            "{} && pip install -r {}",
            activate(&ws.config),
            quote(requirements)
        ),
        &ws.root,
        Output::unless_debug(ws.debug),
    )?;
    tracing::info!("Install successfully packages from file `{requirements}`.");
    Ok(())
}

/// Scaffold the project, create the environment and install into it.
/// Stops at the first step that fails.
pub fn develop(ws: &Workspace, runner: &dyn CommandRunner) -> Result<()> {
    super::generate(ws)?;
    env(ws, runner)?;
    install(ws, runner)
}

/// Remove the virtual environment and the pylint resource file.
pub fn clean(ws: &Workspace) -> Result<()> {
    let env_dir = ws.env_dir();
    let name = &ws.config.env_name;
    if env_dir.is_dir() {
        std::fs::remove_dir_all(&env_dir).map_err(|source| Error::io(&env_dir, source))?;
        tracing::info!("Clean successfully virtual environment `{name}`");
    } else {
        tracing::info!("Virtual environment `{name}` does not exist.");
    }

    let pylintrc = ws.path(&ws.config.pylintrc);
    let file = &ws.config.pylintrc;
    if pylintrc.is_file() {
        std::fs::remove_file(&pylintrc).map_err(|source| Error::io(&pylintrc, source))?;
        tracing::info!("Clean successfully file pylint resource control `{file}`");
    } else {
        tracing::info!("File pylint resource control `{file}` does not exist.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;
    use crate::Config;
    use std::fs;

    fn workspace() -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path(), Config::default());
        (dir, ws)
    }

    #[test]
    fn env_creates_then_upgrades_pip() {
        let (_dir, ws) = workspace();
        let runner = RecordingRunner::new();

        env(&ws, &runner).unwrap();
        assert_eq!(
            runner.commands(),
            vec![
                "python -m venv 'env'",
                "source 'env'/bin/activate && pip install --upgrade pip",
            ]
        );
        let calls = runner.calls.borrow();
        assert!(calls.iter().all(|call| call.cwd == ws.root));
        assert!(calls.iter().all(|call| call.output == Some(Output::Hidden)));
    }

    #[test]
    fn env_streams_output_when_debugging() {
        let (_dir, ws) = workspace();
        let ws = ws.with_debug(true);
        let runner = RecordingRunner::new();

        env(&ws, &runner).unwrap();
        assert!(runner
            .calls
            .borrow()
            .iter()
            .all(|call| call.output == Some(Output::Stream)));
    }

    #[test]
    fn env_skips_existing_directory() {
        let (_dir, ws) = workspace();
        fs::create_dir(ws.env_dir()).unwrap();
        let runner = RecordingRunner::new();

        env(&ws, &runner).unwrap();
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn install_requires_environment() {
        let (_dir, ws) = workspace();
        let runner = RecordingRunner::new();

        install(&ws, &runner).unwrap();
        assert!(runner.commands().is_empty());

        fs::create_dir(ws.env_dir()).unwrap();
        install(&ws, &runner).unwrap();
        assert_eq!(
            runner.commands(),
            vec!["source 'env'/bin/activate && pip install -r 'requirements.txt'"]
        );
    }

    #[test]
    fn develop_stops_at_first_failure() {
        let (_dir, ws) = workspace();
        let runner = RecordingRunner::new().failing_on("-m venv");

        let err = develop(&ws, &runner).unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(runner.commands(), vec!["python -m venv 'env'"]);
        assert!(ws.path("requirements.txt").is_file());
    }

    #[test]
    fn clean_without_artifacts_changes_nothing() {
        let (_dir, ws) = workspace();
        fs::write(ws.path("keep.txt"), "x").unwrap();

        clean(&ws).unwrap();
        let entries: Vec<_> = fs::read_dir(&ws.root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["keep.txt"]);
    }

    #[test]
    fn clean_removes_env_and_pylintrc() {
        let (_dir, ws) = workspace();
        fs::create_dir_all(ws.env_dir().join("bin")).unwrap();
        fs::write(ws.path(".pylintrc"), "[MAIN]\n").unwrap();

        clean(&ws).unwrap();
        assert!(!ws.env_dir().exists());
        assert!(!ws.path(".pylintrc").exists());
    }
}
