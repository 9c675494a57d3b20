//! Core crate for the devtasks workflow runner: configuration, file discovery,
//! gated file writes, the command runner and the tasks built on top of them.

pub mod config;
pub mod find;
pub mod fs;
pub mod runner;
pub mod tasks;

pub use config::{Config, Workspace};
pub use find::FindFilter;
pub use fs::{write_if_absent, TransientFile, WriteOutcome};
pub use runner::{CommandRunner, DryRunner, Output, ShellRunner};

use std::path::PathBuf;
use thiserror::Error;

/// Common error type for every task and helper in the core crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A filesystem operation failed on the given path.
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration in `{}`: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The shell that should run a command could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A delegated process exited unsuccessfully.
    #[error("command `{command}` failed with {}", describe_code(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A lookup whose output was captured exited unsuccessfully.
    #[error("command `{command}` failed with {}: {stderr}", describe_code(*code))]
    CaptureFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code of the delegated process, if this error came from one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandFailed { code, .. } | Error::CaptureFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Convenient alias for results returned by the core crate.
pub type Result<T> = std::result::Result<T, Error>;
