//! Command runner abstractions.

use crate::{Error, Result};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Where the output of a delegated command goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Inherit the terminal's stdout/stderr.
    Stream,
    /// Discard everything the command prints.
    Hidden,
}

impl Output {
    /// Stream when debugging, hide otherwise.
    pub fn unless_debug(debug: bool) -> Self {
        if debug {
            Output::Stream
        } else {
            Output::Hidden
        }
    }
}

/// Trait describing how tasks execute their command lines.
pub trait CommandRunner {
    /// Run `command` inside `cwd`, failing on a non-zero exit.
    fn run(&self, command: &str, cwd: &Path, output: Output) -> Result<()>;

    /// Run `command` inside `cwd` and return what it printed on stdout.
    fn capture(&self, command: &str, cwd: &Path) -> Result<String>;
}

/// Runs command lines through `<shell> -c`, inheriting the environment.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    fn command(&self, command: &str, cwd: &Path) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command).current_dir(cwd);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path, output: Output) -> Result<()> {
        tracing::debug!(shell = %self.shell, "running `{command}`");
        let mut cmd = self.command(command, cwd);
        if output == Output::Hidden {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        let status = cmd.status().map_err(|source| Error::Spawn {
            command: command.to_string(),
            source,
        })?;
        check(command, status)
    }

    fn capture(&self, command: &str, cwd: &Path) -> Result<String> {
        tracing::debug!(shell = %self.shell, "capturing `{command}`");
        let out = self
            .command(command, cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                command: command.to_string(),
                source,
            })?;
        if !out.status.success() {
            return Err(Error::CaptureFailed {
                command: command.to_string(),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

fn check(command: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        })
    }
}

/// A runner that only logs the commands it would have executed.
///
/// Captures are read-only lookups (file discovery), so they still go
/// through the shell; only `run` is skipped.
#[derive(Debug, Clone)]
pub struct DryRunner {
    shell: ShellRunner,
}

impl DryRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: ShellRunner::new(shell),
        }
    }
}

impl CommandRunner for DryRunner {
    fn run(&self, command: &str, cwd: &Path, _output: Output) -> Result<()> {
        tracing::info!("[dry-run] {} $ {command}", cwd.display());
        Ok(())
    }

    fn capture(&self, command: &str, cwd: &Path) -> Result<String> {
        self.shell.capture(command, cwd)
    }
}
