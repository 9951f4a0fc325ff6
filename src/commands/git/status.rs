//! `git:status` - branches, changes and recent commits in one view

use crate::commands::git::{git, in_repository};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use colored::{Color, Colorize};

const USAGE: &str = "git:status";

/// How a porcelain status line is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Untracked,
    Modified,
    Added,
    Deleted,
    Other,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Untracked => "Untracked:",
            ChangeKind::Modified => "Modified: ",
            ChangeKind::Added => "Added:    ",
            ChangeKind::Deleted => "Deleted:  ",
            ChangeKind::Other => "",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ChangeKind::Untracked | ChangeKind::Deleted => Color::Red,
            ChangeKind::Modified => Color::Yellow,
            ChangeKind::Added => Color::Green,
            ChangeKind::Other => Color::Blue,
        }
    }
}

/// Split a `git status --porcelain` line into its kind, status code and path
pub fn classify_status_line(line: &str) -> (ChangeKind, &str, &str) {
    let code = line.get(..2).unwrap_or(line);
    let path = line.get(3..).unwrap_or("");
    let kind = if code == "??" {
        ChangeKind::Untracked
    } else {
        match code.chars().next() {
            Some('M') => ChangeKind::Modified,
            Some('A') => ChangeKind::Added,
            Some('D') => ChangeKind::Deleted,
            _ => ChangeKind::Other,
        }
    };
    (kind, code, path)
}

/// One display line for a porcelain status entry
pub fn format_change(line: &str) -> String {
    let (kind, code, path) = classify_status_line(line);
    let text = match kind {
        ChangeKind::Other => format!("  {}:  {}", code, path),
        _ => format!("  {} {}", kind.label(), path),
    };
    text.color(kind.color()).to_string()
}

pub struct StatusCommand;

impl CommandHandler for StatusCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        if !in_repository(ctx)? {
            ctx.print_error("Not in a git repository");
            return Ok(false);
        }

        ctx.print_info("Git Status Overview");

        let branches = git(&["branch", "-vv"], ctx)?;
        if branches.success() {
            ctx.print_output(&format!("\n{}", "Branches:".bold()));
            ctx.print_output(branches.stdout.trim_end());
        }

        let status = git(&["status", "--porcelain"], ctx)?;
        if status.success() {
            let changes = status.stdout.trim_end();
            if changes.trim().is_empty() {
                ctx.print_success("Working directory clean");
            } else {
                ctx.print_output(&format!("\n{}", "Changes:".bold()));
                for line in changes.lines() {
                    ctx.print_output(&format_change(line));
                }
            }
        }

        let log = git(&["log", "--oneline", "-5"], ctx)?;
        if log.success() {
            ctx.print_output(&format!("\n{}", "Recent commits:".bold()));
            ctx.print_output(log.stdout.trim_end());
        }

        Ok(true)
    }
}

/// Register the status command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("status", "Enhanced git status with branch info", StatusCommand)
            .in_category("git")
            .with_usage(USAGE),
    );
}
