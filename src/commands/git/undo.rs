//! `git:undo` - soft-reset the last commit, keeping its changes

use crate::commands::git::{git, in_repository};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use colored::Colorize;

const USAGE: &str = "git:undo";

pub struct UndoCommand;

impl CommandHandler for UndoCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        ctx.print_info("Undoing last commit (keeping changes)...");

        if !in_repository(ctx)? {
            ctx.print_error("Not in a git repository");
            return Ok(false);
        }

        let last = git(&["log", "--oneline", "-1"], ctx)?;
        if !last.success() {
            ctx.print_error("No commits found in repository");
            return Ok(false);
        }

        let count = git(&["rev-list", "--count", "HEAD"], ctx)?;
        let Some(commits) = count
            .success()
            .then(|| count.stdout_trimmed().parse::<u64>().ok())
            .flatten()
        else {
            ctx.print_error("Unable to check commit history");
            return Ok(false);
        };

        ctx.print_output(&format!("Last commit: {}", last.stdout_trimmed().cyan()));

        let (question, args, done): (&str, &[&str], &str) = if commits == 1 {
            ctx.print_warning("This is the only commit in the repository");
            (
                "Delete the entire commit history and keep files?",
                &["update-ref", "-d", "HEAD"],
                "Repository reset to initial state (files preserved)",
            )
        } else {
            (
                "Undo this commit?",
                &["reset", "--soft", "HEAD~1"],
                "Last commit undone (changes preserved)",
            )
        };

        if !ctx.confirm(question) {
            return Ok(true);
        }

        let result = git(args, ctx)?;
        if result.success() {
            ctx.print_success(done);
            Ok(true)
        } else {
            ctx.print_error(&format!("Failed to undo commit: {}", result.stderr.trim()));
            Ok(false)
        }
    }
}

/// Register the undo command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("undo", "Undo the last commit (keep changes)", UndoCommand)
            .in_category("git")
            .with_usage(USAGE),
    );
}
