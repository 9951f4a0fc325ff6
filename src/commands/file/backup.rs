//! `file:backup` - timestamped copy of a directory next to it

use crate::commands::missing_argument;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::HelpPage;
use crate::utils::fs::{copy_dir, format_size, path_size};
use anyhow::Context as _;
use chrono::Local;
use std::fs;

const USAGE: &str = "file:backup <source_directory> [backup_name]";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub struct BackupCommand;

/// Directory name for a backup taken at `timestamp`
pub fn backup_dir_name(source_name: &str, custom: Option<&str>, timestamp: &str) -> String {
    match custom {
        Some(name) => format!("{}_{}", name, timestamp),
        None => format!("{}_backup_{}", source_name, timestamp),
    }
}

impl CommandHandler for BackupCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let Some(source) = inv.arg(0) else {
            return Ok(missing_argument(inv, "Directory path", &self.help_page()));
        };

        let source_path = ctx.resolve_path(source);
        if !source_path.exists() {
            ctx.print_error(&format!("Directory '{}' does not exist", source));
            return Ok(false);
        }
        if !source_path.is_dir() {
            ctx.print_error(&format!("'{}' is not a directory", source));
            return Ok(false);
        }

        let source_path = fs::canonicalize(&source_path)
            .with_context(|| format!("Cannot resolve '{}'", source))?;
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let name = backup_dir_name(&source_name, inv.arg(1), &timestamp);
        let backup_path = source_path
            .parent()
            .unwrap_or(&source_path)
            .join(name);

        ctx.print_info(&format!("Creating backup: {}", backup_path.display()));
        copy_dir(&source_path, &backup_path)
            .with_context(|| format!("Creating backup '{}'", backup_path.display()))?;

        ctx.print_success("Backup created successfully");
        ctx.print_output(&format!("Location: {}", backup_path.display()));
        ctx.print_output(&format!("Size: {}", format_size(path_size(&backup_path))));
        Ok(true)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl BackupCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Create a timestamped backup of a directory")
            .action("<source_directory>", "Directory to backup")
            .action(
                "<source_directory> <backup_name>",
                "Directory to backup with custom name",
            )
    }
}

/// Register the backup command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("backup", "Create backup of directory", BackupCommand)
            .in_category("file")
            .with_usage(USAGE),
    );
}
