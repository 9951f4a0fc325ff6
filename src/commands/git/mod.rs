//! Git workflow commands
//!
//! All of them shell out to the `git` binary in the working directory.

pub mod status;
pub mod sync;
pub mod undo;

use crate::registry::CommandRegistry;
use crate::runner::{run_program, CommandOutput, Context};
use anyhow::Context as _;

/// Run `git` with arguments, capturing output
pub(crate) fn git(args: &[&str], ctx: &Context) -> anyhow::Result<CommandOutput> {
    run_program("git", args, ctx).context("Failed to run git (is it installed?)")
}

/// Whether the working directory is inside a git repository
pub(crate) fn in_repository(ctx: &Context) -> anyhow::Result<bool> {
    Ok(git(&["rev-parse", "--git-dir"], ctx)?.success())
}

/// Register every `git:*` command
pub fn register_all(registry: &mut CommandRegistry) {
    status::register(registry);
    sync::register(registry);
    undo::register(registry);
}
