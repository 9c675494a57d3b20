//! Configuration model, loader and working-root resolution.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// File name looked up in the working root (and its ancestors) when no
/// explicit configuration path is given.
pub const CONFIG_FILE: &str = "devtasks.toml";

/// Static settings shared by every task. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory name of the virtual environment.
    pub env_name: String,
    /// Dependency list consumed by `pip install -r`.
    pub requirements: String,
    pub readme: String,
    pub pylintrc: String,
    /// Transient type-checker configuration, removed after each run.
    pub mypy_config: String,
    /// Interpreter used for `-m venv`, `-m pytest`, `-m pylint` and `-m mypy`.
    pub python: String,
    /// Shell that receives every command line through `-c`.
    pub shell: String,
    /// Test directories, relative to the working root.
    pub tests_dirs: Vec<String>,
    /// Default depth of the `tree` listing; `0` means unlimited.
    pub depth: u32,
    /// Packages written to the requirements file, one per line.
    pub packages: Vec<String>,
    pub include_files: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_name: "env".into(),
            requirements: "requirements.txt".into(),
            readme: "README.md".into(),
            pylintrc: ".pylintrc".into(),
            mypy_config: "mypy.ini".into(),
            python: "python".into(),
            shell: "bash".into(),
            tests_dirs: strings(&["tests"]),
            depth: 2,
            packages: strings(&["coloredlogs", "fabric", "black", "pylint", "pytest", "mypy"]),
            include_files: strings(&["*.py"]),
            exclude_files: strings(&["draft.py", "fabfile.py"]),
            exclude_dirs: strings(&["**/__pycache__/*", "**/_build/*", "**/env/*"]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Config {
    /// Load configuration from the provided path.
    ///
    /// Every key is optional and falls back to [`Config::default`]; unknown
    /// keys are rejected so typos do not go unnoticed.
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        toml::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The resolved working root plus the settings every task is run with.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    /// Show output of otherwise silent commands and log debug details.
    pub debug: bool,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Resolve the working root and load its configuration.
    ///
    /// With `use_cwd` the root is `cwd` itself. Otherwise it is the closest
    /// ancestor of `cwd` holding a [`CONFIG_FILE`], falling back to `cwd`.
    /// An explicit `config_path` wins over the root's own file.
    pub fn resolve(cwd: &Path, use_cwd: bool, config_path: Option<&Path>) -> Result<Self> {
        let root = if use_cwd {
            cwd.to_path_buf()
        } else {
            find_root(cwd).unwrap_or_else(|| cwd.to_path_buf())
        };

        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => {
                let local = root.join(CONFIG_FILE);
                if local.is_file() {
                    Config::load(local)?
                } else {
                    Config::default()
                }
            }
        };

        tracing::debug!(root = %root.display(), "resolved working root");
        Ok(Self::new(root, config))
    }

    /// Name of the working root directory, also used for the source package.
    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }

    /// Absolute path of a root-relative entry.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn env_dir(&self) -> PathBuf {
        self.path(&self.config.env_name)
    }
}

fn find_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
}
