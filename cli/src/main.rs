use anyhow::Context;
use clap::{Parser, Subcommand};
use devtasks_core::{tasks, CommandRunner, DryRunner, ShellRunner, Workspace};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Project scaffolding and developer workflow tasks for Python projects.
#[derive(Debug, Parser)]
#[command(name = "devtasks", version, about)]
struct Cli {
    /// Show output of installers and debug details.
    #[arg(long, global = true)]
    debug: bool,
    /// Use the current directory as the working root instead of looking for
    /// the nearest `devtasks.toml`.
    #[arg(long, global = true)]
    cwd: bool,
    /// Path to a devtasks config file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log external commands instead of running them.
    #[arg(long, global = true)]
    dry_run: bool,
    #[command(subcommand)]
    task: Task,
}

#[derive(Debug, Subcommand)]
enum Task {
    /// Generate the source package, README, requirements and pylintrc.
    Generate,
    /// Create a bare virtual environment.
    Env,
    /// Install the requirements into the virtual environment.
    Install,
    /// Generate files, create the environment and install requirements.
    Develop,
    /// Rerun pytest on every source change.
    Autotest {
        /// Show pytest warnings.
        #[arg(long)]
        warnings: bool,
    },
    /// Lint the sources with pylint.
    Analyse,
    /// Format the sources with black.
    Format,
    /// List pytest fixtures.
    Fixtures {
        /// List every fixture instead of fixtures per test.
        #[arg(long)]
        whole: bool,
        /// Show pytest warnings.
        #[arg(long)]
        warnings: bool,
    },
    /// Type-check the sources with mypy.
    CheckTypes,
    /// Print the project tree.
    Tree {
        /// Depth of the listing, 0 for unlimited.
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Remove the virtual environment and the pylintrc.
    Clean,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<devtasks_core::Error>()
                .and_then(devtasks_core::Error::exit_code)
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(debug: bool) {
    // RUST_LOG is honoured as given; `--debug` only ever raises it.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if debug => filter.add_directive(tracing::Level::DEBUG.into()),
        Ok(filter) => filter,
        Err(_) if debug => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    let ws = Workspace::resolve(&cwd, cli.cwd, cli.config.as_deref())?.with_debug(cli.debug);

    let runner: Box<dyn CommandRunner> = if cli.dry_run {
        Box::new(DryRunner::new(ws.config.shell.clone()))
    } else {
        Box::new(ShellRunner::new(ws.config.shell.clone()))
    };
    let runner = runner.as_ref();

    match cli.task {
        Task::Generate => tasks::generate(&ws)?,
        Task::Env => tasks::env(&ws, runner)?,
        Task::Install => tasks::install(&ws, runner)?,
        Task::Develop => tasks::develop(&ws, runner)?,
        Task::Autotest { warnings } => tasks::autotest(&ws, runner, warnings)?,
        Task::Analyse => tasks::analyse(&ws, runner)?,
        Task::Format => tasks::format(&ws, runner)?,
        Task::Fixtures { whole, warnings } => tasks::fixtures(&ws, runner, whole, warnings)?,
        Task::CheckTypes => tasks::check_types(&ws, runner)?,
        Task::Tree { depth } => tasks::tree(&ws, runner, depth)?,
        Task::Clean => tasks::clean(&ws)?,
    }
    Ok(())
}
