//! `env:shell` - inspect, edit and extend the shell config file

use crate::commands::{missing_argument, print_usage};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::{check_command, run_inherited, Context};
use crate::ui::HelpPage;
use crate::utils::fs::append_line;
use crate::utils::shell::{current_shell, shell_config_file};
use crate::TOOL_NAME;
use anyhow::Context as _;
use colored::Colorize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "env:shell [info|edit|backup|reload|add] [text]";

const TAIL_LINES: usize = 5;

const FALLBACK_EDITOR: &str = "nano";

pub struct ShellCommand;

impl CommandHandler for ShellCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let action = inv.arg(0).map(str::to_lowercase);
        let Some(config) = shell_config_file(&inv.ctx.settings) else {
            inv.ctx.print_error("Could not determine shell configuration file");
            return Ok(false);
        };

        match action.as_deref() {
            None | Some("info") => show_info(inv.ctx, &config),
            Some("edit") => edit_config(inv.ctx, &config),
            Some("backup") => backup_config(inv.ctx, &config),
            Some("reload") => reload_config(inv.ctx, &config),
            Some("add") if inv.args.len() > 1 => add_line(inv.ctx, &config, &inv.rest(1)),
            Some("add") => Ok(missing_argument(inv, "Text to add", &self.help_page())),
            Some(_) => {
                print_usage(inv, &self.help_page());
                Ok(true)
            }
        }
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl ShellCommand {
    fn help_page(&self) -> HelpPage {
        HelpPage::new(USAGE)
            .summary("Manage shell configuration files")
            .action("info", "Show shell config info")
            .action("edit", "Edit config in default editor")
            .action("backup", "Create backup of config")
            .action("reload", "Reload shell configuration")
            .action_with_args("add", "<text>", "Add line to config file")
    }
}

/// The last `count` lines of `content`, numbered from their real position
pub fn last_lines(content: &str, count: usize) -> Vec<(usize, &str)> {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines
        .into_iter()
        .enumerate()
        .skip(start)
        .map(|(i, line)| (i + 1, line))
        .collect()
}

/// Editor program and its arguments: settings, then `$EDITOR`, then nano
pub fn editor_command(configured: Option<&str>, env_editor: Option<&str>) -> Vec<String> {
    let raw = configured
        .or(env_editor)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(FALLBACK_EDITOR);
    raw.split_whitespace().map(str::to_string).collect()
}

fn backup_path(config: &Path) -> PathBuf {
    let mut backup = config.to_path_buf().into_os_string();
    backup.push(".backup");
    PathBuf::from(backup)
}

fn show_info(ctx: &Context, config: &Path) -> anyhow::Result<bool> {
    ctx.print_info(&format!("Current shell: {}", current_shell()));
    ctx.print_info(&format!("Configuration file: {}", config.display()));

    if !config.exists() {
        ctx.print_warning("Configuration file does not exist");
        return Ok(true);
    }

    let content = match fs::read_to_string(config) {
        Ok(content) => content,
        Err(e) => {
            ctx.print_warning(&format!("Could not read config file: {}", e));
            return Ok(true);
        }
    };
    ctx.print_info(&format!("File size: {} bytes", content.len()));

    let tail = last_lines(&content, TAIL_LINES);
    if !tail.is_empty() {
        let name = config
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ctx.print_output(&format!("\n{}", format!("Last {} lines of {}:", TAIL_LINES, name).bold()));
        for (number, line) in tail {
            ctx.print_output(&format!("{} {}", format!("{:>4}", number).dimmed(), line));
        }
    }
    Ok(true)
}

fn edit_config(ctx: &Context, config: &Path) -> anyhow::Result<bool> {
    let env_editor = env::var("EDITOR").ok();
    let editor = editor_command(ctx.settings.editor.as_deref(), env_editor.as_deref());
    let (program, rest) = match editor.split_first() {
        Some(split) => split,
        None => return Ok(false),
    };

    ctx.print_info(&format!("Opening {} in {}", config.display(), editor.join(" ")));

    let config_arg = config.display().to_string();
    let mut args: Vec<&str> = rest.iter().map(String::as_str).collect();
    args.push(&config_arg);

    match run_inherited(program, &args, ctx) {
        Ok(true) => {
            ctx.print_success("Configuration file edited successfully");
            ctx.print_info(&format!("Run '{} env:shell reload' to apply changes", TOOL_NAME));
            Ok(true)
        }
        Ok(false) | Err(_) => {
            ctx.print_error("Failed to open editor");
            Ok(false)
        }
    }
}

fn backup_config(ctx: &Context, config: &Path) -> anyhow::Result<bool> {
    if !config.exists() {
        ctx.print_error("Configuration file does not exist");
        return Ok(false);
    }

    let backup = backup_path(config);
    fs::copy(config, &backup).with_context(|| "Failed to create backup")?;
    ctx.print_success(&format!("Backup created: {}", backup.display()));
    Ok(true)
}

fn reload_config(ctx: &Context, config: &Path) -> anyhow::Result<bool> {
    if !config.exists() {
        ctx.print_error("Configuration file does not exist");
        return Ok(false);
    }

    ctx.print_info(&format!("Reloading {}", config.display()));
    let reloaded = check_command(&format!(". \"{}\"", config.display()), ctx).unwrap_or(false);
    if reloaded {
        ctx.print_success("Configuration reloaded successfully");
    } else {
        ctx.print_warning("Could not reload configuration in current shell");
        ctx.print_info("You may need to restart your shell or run the source command manually");
    }
    Ok(true)
}

fn add_line(ctx: &Context, config: &Path, line: &str) -> anyhow::Result<bool> {
    append_line(config, line).with_context(|| "Failed to add line to config")?;
    ctx.print_success(&format!("Added line to {}: {}", config.display(), line));
    ctx.print_info(&format!("Run '{} env:shell reload' to apply changes", TOOL_NAME));
    Ok(true)
}

/// Register the shell command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("shell", "Manage shell configuration files", ShellCommand)
            .in_category("env")
            .with_usage(USAGE),
    );
}
