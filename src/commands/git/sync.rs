//! `git:sync` - fetch and pull the current branch from origin

use crate::commands::git::git;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use colored::Colorize;

const USAGE: &str = "git:sync";

const REMOTE: &str = "origin";

pub struct SyncCommand;

impl CommandHandler for SyncCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        ctx.print_info("Syncing with remote...");

        let branch = git(&["branch", "--show-current"], ctx)?;
        if !branch.success() {
            ctx.print_error("Not in a git repository");
            return Ok(false);
        }
        let branch = branch.stdout_trimmed().to_string();
        if branch.is_empty() {
            ctx.print_error("Not on a branch (detached HEAD)");
            return Ok(false);
        }
        ctx.print_output(&format!("Current branch: {}", branch.cyan()));

        ctx.print_info("Fetching latest changes...");
        let fetch = git(&["fetch", REMOTE], ctx)?;
        if !fetch.success() {
            ctx.print_error(&format!("Fetching from {} failed", REMOTE));
            ctx.print_debug(fetch.stderr.trim());
            return Ok(false);
        }

        let remote_branch = format!("{}/{}", REMOTE, branch);
        if !git(&["rev-parse", "--verify", remote_branch.as_str()], ctx)?.success() {
            ctx.print_warning(&format!("Remote branch {} does not exist", remote_branch));
            return Ok(true);
        }

        ctx.print_info("Pulling changes...");
        let pull = git(&["pull", REMOTE, branch.as_str()], ctx)?;
        if pull.success() {
            ctx.print_success("Successfully synced with remote");
            Ok(true)
        } else {
            ctx.print_error("Syncing with remote failed");
            ctx.print_output(pull.stderr.trim_end());
            Ok(false)
        }
    }
}

/// Register the sync command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("sync", "Sync current branch with remote", SyncCommand)
            .in_category("git")
            .with_usage(USAGE),
    );
}
