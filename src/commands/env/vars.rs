//! `env:vars` - show, set and export environment variables

use crate::commands::print_usage;
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::Context;
use crate::ui::{HelpPage, Table};
use crate::utils::fs::{append_line, remove_lines};
use crate::utils::shell::shell_config_file;
use crate::utils::truncate;
use crate::TOOL_NAME;
use anyhow::Context as _;
use colored::{Color, Colorize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "env:vars [show|get|set|unset|export|clear] [name] [value]";

const MAX_VALUE_WIDTH: usize = 100;

/// Exports `clear` never touches
const PROTECTED_VARS: &[&str] = &["PATH", "SHELL", "HOME", "USER"];

pub struct VarsCommand;

impl CommandHandler for VarsCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let action = inv.arg(0).map(str::to_lowercase);
        let ctx = inv.ctx;
        match (action.as_deref(), inv.arg(1)) {
            (None, _) => {
                show_vars(ctx, None);
                Ok(true)
            }
            (Some("show"), filter) => {
                show_vars(ctx, filter);
                Ok(true)
            }
            (Some("get"), Some(name)) => {
                get_var(ctx, name);
                Ok(true)
            }
            (Some("set"), Some(name)) if inv.args.len() > 2 => {
                set_var(ctx, name, &inv.rest(2));
                Ok(true)
            }
            (Some("unset"), Some(name)) => {
                unset_var(ctx, name);
                Ok(true)
            }
            (Some("export"), Some(name)) if inv.args.len() > 2 => {
                export_var(ctx, name, &inv.rest(2))
            }
            (Some("clear"), _) => clear_exports(ctx),
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

impl VarsCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Manage environment variables")
            .action_with_args("show", "[filter]", "Show environment variables")
            .action_with_args("get", "<name>", "Get specific variable")
            .action_with_args("set", "<name> <value>", "Set variable (session only)")
            .action_with_args("unset", "<name>", "Unset variable (session only)")
            .action_with_args("export", "<name> <value>", "Export to shell config")
            .action("clear", "Remove custom exports from config")
    }
}

/// Variables whose name contains `filter`, case-insensitively
pub fn filter_vars<I>(vars: I, filter: Option<&str>) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let needle = filter.map(str::to_lowercase);
    vars.into_iter()
        .filter(|(name, _)| match &needle {
            Some(needle) => name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect()
}

/// Whether a config line is a user export that `clear` may remove
pub fn is_custom_export(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("export ")
        && line.contains('=')
        && !PROTECTED_VARS.iter().any(|var| line.contains(var))
}

fn show_vars(ctx: &Context, filter: Option<&str>) {
    let vars = filter_vars(env::vars(), filter);
    let title = match filter {
        Some(f) => format!("Environment Variables (filtered by: {})", f),
        None => "Environment Variables".to_string(),
    };

    let mut table = Table::new(title)
        .colored_column("Variable", Color::Cyan)
        .column("Value");
    for (name, value) in &vars {
        table.add_row([name.clone(), truncate(value, MAX_VALUE_WIDTH)]);
    }

    ctx.print_output(&table.render());
    ctx.print_output(&format!("\n{}", format!("Total: {} variables", vars.len()).dimmed()));
}

fn get_var(ctx: &Context, name: &str) {
    match env::var(name) {
        Ok(value) => ctx.print_output(&format!("{} = {}", name.cyan(), value)),
        Err(_) => ctx.print_warning(&format!("Environment variable '{}' is not set", name)),
    }
}

fn set_var(ctx: &Context, name: &str, value: &str) {
    env::set_var(name, value);
    ctx.print_success(&format!("Set {} = {}", name, value));
    ctx.print_warning("This change is only for the current session");
    ctx.print_info(&format!(
        "To make it permanent, use: {} env:vars export {} {}",
        TOOL_NAME, name, value
    ));
}

fn unset_var(ctx: &Context, name: &str) {
    if env::var_os(name).is_some() {
        env::remove_var(name);
        ctx.print_success(&format!("Unset environment variable '{}'", name));
        ctx.print_warning("This change is only for the current session");
    } else {
        ctx.print_warning(&format!("Environment variable '{}' is not set", name));
    }
}

fn config_or_report(ctx: &Context) -> Option<PathBuf> {
    let config = shell_config_file(&ctx.settings);
    if config.is_none() {
        ctx.print_error("Could not determine shell configuration file");
    }
    config
}

fn export_var(ctx: &Context, name: &str, value: &str) -> anyhow::Result<bool> {
    let Some(config) = config_or_report(ctx) else {
        return Ok(false);
    };

    if let Ok(content) = fs::read_to_string(&config) {
        if content.contains(&format!("export {}=", name)) {
            ctx.print_warning(&format!(
                "Variable '{}' may already be exported in {}",
                name,
                config.display()
            ));
            if !ctx.confirm("Add anyway?") {
                return Ok(true);
            }
        }
    }

    append_line(&config, &format!("export {}=\"{}\"", name, value))
        .with_context(|| format!("Failed to update {}", config.display()))?;

    ctx.print_success(&format!("Exported {} to {}", name, config.display()));
    ctx.print_info(&format!(
        "Restart your shell or run 'source {}' to apply changes",
        config.display()
    ));
    env::set_var(name, value);
    ctx.print_info("Variable also set for current session");
    Ok(true)
}

fn clear_exports(ctx: &Context) -> anyhow::Result<bool> {
    let Some(config) = config_or_report(ctx) else {
        return Ok(false);
    };
    if !config.exists() {
        ctx.print_error(&format!("Configuration file {} not found", config.display()));
        return Ok(false);
    }

    ctx.print_warning("This will remove all 'export VAR=value' lines from your shell config");
    if !ctx.confirm("Are you sure you want to continue?") {
        return Ok(true);
    }

    let original = fs::read_to_string(&config)
        .with_context(|| format!("Failed to read {}", config.display()))?;
    if !original.lines().any(is_custom_export) {
        ctx.print_info("No custom export statements found to remove");
        return Ok(true);
    }

    let mut backup = config.clone().into_os_string();
    backup.push(".backup");
    let backup = PathBuf::from(backup);
    fs::write(&backup, &original)
        .with_context(|| format!("Failed to write {}", backup.display()))?;

    let removed = remove_lines(&config, is_custom_export)
        .with_context(|| format!("Failed to update {}", config.display()))?;

    ctx.print_success(&format!(
        "Removed {} export statements from {}",
        removed,
        config.display()
    ));
    ctx.print_info(&format!("Backup created: {}", backup.display()));
    ctx.print_info("Restart your shell to apply changes");
    Ok(true)
}

/// Register the vars command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("vars", "Manage environment variables", VarsCommand)
            .in_category("env")
            .with_usage(USAGE),
    );
}
