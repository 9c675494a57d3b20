//! Filesystem helpers: the gated writer, the transient-file guard and
//! directory filtering.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// What [`write_if_absent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    AlreadyExists,
}

/// Write `content` to `path` unless something already lives there.
///
/// Non-empty content gets one trailing newline. Existing files are never
/// touched, so calling this repeatedly is harmless.
pub fn write_if_absent(path: &Path, content: &str, label: &str) -> Result<WriteOutcome> {
    if path.exists() {
        tracing::info!("File {} already exists", describe(path, label));
        return Ok(WriteOutcome::AlreadyExists);
    }

    let body = if content.is_empty() {
        String::new()
    } else {
        format!("{content}\n")
    };
    std::fs::write(path, body).map_err(|source| Error::io(path, source))?;
    tracing::info!("Create successfully file {}", describe(path, label));
    Ok(WriteOutcome::Created)
}

fn describe(path: &Path, label: &str) -> String {
    if label.is_empty() {
        format!("`{}`", path.display())
    } else {
        format!("{label} `{}`", path.display())
    }
}

/// Keep the directories that exist, logging the ones that don't.
pub fn existing_dirs<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|dir| {
            let present = dir.is_dir();
            if !present {
                tracing::debug!("Directory {} does not exist.", dir.display());
            }
            present
        })
        .collect()
}

/// A file that lives only as long as this guard.
///
/// The file goes through [`write_if_absent`]; only a file this guard created
/// is removed on drop, so a user's own copy survives.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    label: String,
    owned: bool,
}

impl TransientFile {
    pub fn create(path: impl Into<PathBuf>, content: &str, label: &str) -> Result<Self> {
        let path = path.into();
        let outcome = write_if_absent(&path, content, label)?;
        Ok(Self {
            path,
            label: label.to_string(),
            owned: outcome == WriteOutcome::Created,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if !self.owned || !self.path.is_file() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(
                "Remove successfully file {}.",
                describe(&self.path, &self.label)
            ),
            Err(err) => tracing::warn!(
                "Could not remove {}: {err}",
                describe(&self.path, &self.label)
            ),
        }
    }
}
