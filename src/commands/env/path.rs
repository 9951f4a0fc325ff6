//! `env:path` - inspect PATH and edit PATH exports in the shell config

use crate::commands::print_usage;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::Context;
use crate::ui::{HelpPage, Table};
use crate::utils::fs::{append_line, remove_lines};
use crate::utils::shell::shell_config_file;
use anyhow::Context as _;
use colored::{Color, Colorize};
use std::collections::HashSet;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "env:path [show|add|remove|clean] [path]";

pub struct PathCommand;

impl CommandHandler for PathCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let action = inv.arg(0).map(str::to_lowercase);
        match (action.as_deref(), inv.arg(1)) {
            (None, _) | (Some("show"), _) => {
                show_path(inv.ctx);
                Ok(true)
            }
            (Some("add"), Some(path)) => add_to_path(inv.ctx, path),
            (Some("remove"), Some(path)) => remove_from_path(inv.ctx, path),
            (Some("clean"), _) => {
                clean_path(inv.ctx);
                Ok(true)
            }
            _ => {
                print_usage(inv, &self.help_page());
                Ok(true)
            }
        }
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl PathCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Manage PATH environment variable")
            .action("show", "Show current PATH entries")
            .action_with_args("add", "<path>", "Add directory to PATH")
            .action_with_args("remove", "<path>", "Remove directory from PATH")
            .action("clean", "Analyze PATH for issues")
    }
}

/// Problems found in a PATH value
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PathReport {
    pub duplicates: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl PathReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.missing.is_empty()
    }
}

/// Non-empty entries of a PATH-style value
pub fn path_entries(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Find repeated and non-existent entries
pub fn analyze_path(entries: &[PathBuf]) -> PathReport {
    let mut seen = HashSet::new();
    let mut report = PathReport::default();
    for entry in entries {
        if !seen.insert(entry) {
            report.duplicates.push(entry.clone());
        }
        if !entry.exists() {
            report.missing.push(entry.clone());
        }
    }
    report
}

/// Lines that add `dir` to PATH, in the quoting styles we recognise
pub fn export_patterns(dir: &Path) -> [String; 4] {
    let d = dir.display();
    [
        format!("export PATH=\"{}:$PATH\"", d),
        format!("export PATH='{}:$PATH'", d),
        format!("PATH=\"{}:$PATH\"", d),
        format!("PATH='{}:$PATH'", d),
    ]
}

fn current_entries() -> Vec<PathBuf> {
    env::var_os("PATH")
        .map(|value| path_entries(&value))
        .unwrap_or_default()
}

fn show_path(ctx: &Context) {
    ctx.print_info("Current PATH entries:");

    let mut table = Table::new("PATH Entries")
        .colored_column("Index", Color::Cyan)
        .column("Path")
        .column("Exists");

    for (i, entry) in current_entries().iter().enumerate() {
        let exists = if entry.exists() {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        table.add_row([(i + 1).to_string(), entry.display().to_string(), exists]);
    }

    ctx.print_output(&table.render());
}

fn resolve_dir(ctx: &Context, raw: &str) -> PathBuf {
    let path = ctx.resolve_path(raw);
    fs::canonicalize(&path).unwrap_or(path)
}

fn add_to_path(ctx: &Context, raw: &str) -> anyhow::Result<bool> {
    let dir = resolve_dir(ctx, raw);

    if !dir.exists() {
        if !ctx.confirm(&format!("Path '{}' does not exist. Add anyway?", dir.display())) {
            return Ok(true);
        }
    } else if !dir.is_dir() {
        ctx.print_error(&format!("'{}' is not a directory", dir.display()));
        return Ok(false);
    }

    let Some(config) = shell_config_file(&ctx.settings) else {
        ctx.print_error("Could not determine shell configuration file");
        return Ok(false);
    };

    if let Ok(content) = fs::read_to_string(&config) {
        if content.contains(&dir.display().to_string()) {
            ctx.print_warning(&format!(
                "Path '{}' may already be in {}",
                dir.display(),
                config.display()
            ));
            if !ctx.confirm("Add anyway?") {
                return Ok(true);
            }
        }
    }

    let [line, ..] = export_patterns(&dir);
    append_line(&config, &line)
        .with_context(|| format!("Failed to update {}", config.display()))?;

    ctx.print_success(&format!("Added '{}' to PATH in {}", dir.display(), config.display()));
    ctx.print_info(&format!(
        "Restart your shell or run 'source {}' to apply changes",
        config.display()
    ));
    Ok(true)
}

fn remove_from_path(ctx: &Context, raw: &str) -> anyhow::Result<bool> {
    let dir = resolve_dir(ctx, raw);

    let Some(config) = shell_config_file(&ctx.settings) else {
        ctx.print_error("Could not determine shell configuration file");
        return Ok(false);
    };
    if !config.exists() {
        ctx.print_error(&format!("Configuration file {} not found", config.display()));
        return Ok(false);
    }

    let patterns = export_patterns(&dir);
    let removed = remove_lines(&config, |line| patterns.iter().any(|p| line.contains(p.as_str())))
        .with_context(|| format!("Failed to update {}", config.display()))?;

    if removed > 0 {
        ctx.print_success(&format!(
            "Removed {} PATH entries for '{}' from {}",
            removed,
            dir.display(),
            config.display()
        ));
        ctx.print_info("Restart your shell to apply changes");
    } else {
        ctx.print_warning(&format!(
            "No PATH entries found for '{}' in {}",
            dir.display(),
            config.display()
        ));
    }
    Ok(true)
}

fn clean_path(ctx: &Context) {
    ctx.print_info("Analyzing PATH for issues...");
    let report = analyze_path(&current_entries());

    if !report.duplicates.is_empty() {
        ctx.print_output(&format!("\n{}", "Duplicate PATH entries:".yellow()));
        for dup in &report.duplicates {
            ctx.print_output(&format!("  • {}", dup.display()));
        }
    }

    if !report.missing.is_empty() {
        ctx.print_output(&format!("\n{}", "Non-existent PATH entries:".red()));
        for missing in &report.missing {
            ctx.print_output(&format!("  • {}", missing.display()));
        }
    }

    if report.is_clean() {
        ctx.print_success("PATH looks clean - no duplicates or non-existent entries found");
    }
}

/// Register the path command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("path", "Manage PATH environment variable", PathCommand)
            .in_category("env")
            .with_usage(USAGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::runner::Verbosity;
    use tempfile::TempDir;

    fn ctx_with_rc(rc: &Path) -> Context {
        let settings = Settings {
            shell_config: Some(rc.display().to_string()),
            ..Settings::default()
        };
        Context::with_settings(settings)
            .with_verbosity(Verbosity::Silent)
            .with_assume_yes(true)
    }

    #[test]
    fn test_path_entries_skip_empty() {
        let value = env::join_paths(["/usr/bin", "", "/bin"]).unwrap();
        assert_eq!(
            path_entries(&value),
            vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")]
        );
    }

    #[test]
    fn test_analyze_path() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().to_path_buf();
        let gone = temp_dir.path().join("gone");
        let report = analyze_path(&[real.clone(), gone.clone(), real.clone()]);

        assert_eq!(report.duplicates, vec![real]);
        assert_eq!(report.missing, vec![gone]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_add_then_remove() {
        let temp_dir = TempDir::new().unwrap();
        let rc = temp_dir.path().join(".zshrc");
        let bin = temp_dir.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let ctx = ctx_with_rc(&rc);

        assert!(add_to_path(&ctx, bin.to_str().unwrap()).unwrap());
        let canonical = fs::canonicalize(&bin).unwrap();
        let content = fs::read_to_string(&rc).unwrap();
        assert_eq!(content, format!("export PATH=\"{}:$PATH\"\n", canonical.display()));

        assert!(remove_from_path(&ctx, bin.to_str().unwrap()).unwrap());
        assert_eq!(fs::read_to_string(&rc).unwrap(), "");
    }

    #[test]
    fn test_add_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let rc = temp_dir.path().join(".zshrc");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(!add_to_path(&ctx_with_rc(&rc), file.to_str().unwrap()).unwrap());
        assert!(!rc.exists());
    }

    #[test]
    fn test_remove_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let rc = temp_dir.path().join("nope");
        assert!(!remove_from_path(&ctx_with_rc(&rc), "/usr/bin").unwrap());
    }
}
