//! `file:size` - sizes of the entries in a directory

use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::Table;
use crate::utils::fs::{format_size, path_size};
use anyhow::Context as _;
use colored::Color;
use std::fs;
use std::path::Path;

const USAGE: &str = "file:size [directory_path]";

pub struct SizeCommand;

/// One visible entry of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

impl SizedEntry {
    pub fn kind(&self) -> &'static str {
        if self.is_dir {
            "Directory"
        } else {
            "File"
        }
    }
}

/// Sizes of the non-hidden children of `dir`, largest first
pub fn collect_sizes(dir: &Path) -> std::io::Result<Vec<SizedEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        entries.push(SizedEntry {
            size: path_size(&path),
            is_dir: path.is_dir(),
            name,
        });
    }
    entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

impl CommandHandler for SizeCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let ctx = inv.ctx;
        let target = inv.arg(0).unwrap_or(".");
        let path = ctx.resolve_path(target);

        if !path.exists() {
            ctx.print_error(&format!("Path '{}' does not exist", target));
            return Ok(false);
        }

        if path.is_file() {
            ctx.print_output(&format!("File size: {}", format_size(path_size(&path))));
            return Ok(true);
        }

        let path = fs::canonicalize(&path).unwrap_or(path);
        ctx.print_info(&format!("Analyzing directory: {}", path.display()));

        let entries = collect_sizes(&path)
            .with_context(|| format!("Cannot read directory '{}'", path.display()))?;
        if entries.is_empty() {
            ctx.print_warning("No items found in directory");
            return Ok(true);
        }

        let mut table = Table::new(format!("Directory sizes in {}", target))
            .colored_column("Name", Color::Cyan)
            .colored_column("Size", Color::Green)
            .colored_column("Type", Color::Yellow);
        for entry in &entries {
            table.add_row([
                entry.name.clone(),
                format_size(entry.size),
                entry.kind().to_string(),
            ]);
        }
        ctx.print_output(&table.render());
        Ok(true)
    }
}

/// Register the size command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("size", "Show directory sizes", SizeCommand)
            .in_category("file")
            .with_usage(USAGE),
    );
}
