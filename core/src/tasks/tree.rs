//! Directory tree listing.

use super::probe;
use crate::find::quote;
use crate::{CommandRunner, Output, Result, Workspace};

/// Print the working root as a tree, hiding the virtual environment and
/// bytecode caches. `depth` overrides the configured depth; `0` is unlimited.
pub fn tree(ws: &Workspace, runner: &dyn CommandRunner, depth: Option<u32>) -> Result<()> {
    let ignored = format!("{}|*pycache*", ws.config.env_name);
    let mut command = format!("tree -vI {} --dirsfirst", quote(&ignored));

    let depth = depth.unwrap_or(ws.config.depth);
    if depth > 0 {
        command.push_str(&format!(" -L {depth}"));
    }

    probe(ws, "tree");
    runner.run(&command, &ws.root, Output::Stream)
}
