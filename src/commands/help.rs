//! `help` command

use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::runner::{Dispatcher, Resolution};
use crate::ui::{title_case, Table};
use crate::TOOL_NAME;
use colored::{Color, Colorize};

/// Key the CLI routes `help` to
pub const HELP_KEY: &str = "general:help";

/// Banner help, or detailed help for one command
pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        match inv.arg(0) {
            Some(name) => Ok(show_command_help(inv, name)),
            None => {
                inv.ctx.print_output(&general_help());
                Ok(true)
            }
        }
    }
}

/// Usage banner and quick-start examples
pub fn general_help() -> String {
    let examples = [
        (format!("{} list", TOOL_NAME), "Show all commands"),
        (format!("{} list:git", TOOL_NAME), "Show git commands"),
        (format!("{} help <command>", TOOL_NAME), "Show help for specific command"),
        (format!("{} --version", TOOL_NAME), "Show version information"),
    ];
    let width = examples.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Plasma Help".bold().blue()));
    out.push_str(&format!("{}\n\n", "A powerful development toolkit".italic()));
    out.push_str(&format!(
        "{} {}\n\n",
        "Usage:".bold(),
        format!("{} <command> [args...]", TOOL_NAME).cyan()
    ));
    out.push_str(&format!("{}\n", "Quick Start".bold().green()));
    out.push_str(&format!("{}\n", "Examples:".bold()));
    for (cmd, desc) in &examples {
        out.push_str(&format!("  {}  {}\n", format!("{:width$}", cmd, width = width).cyan(), desc));
    }
    out.trim_end().to_string()
}

/// Detailed block for one descriptor, including any shadowed duplicates
pub fn command_help(descriptor: &CommandDescriptor, registry: &CommandRegistry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format!("Help: {}", descriptor.key()).bold().blue()));
    out.push_str(&format!("{} {}\n", "Description:".bold(), descriptor.description()));
    out.push_str(&format!("{} {}\n", "Category:".bold(), descriptor.category().magenta()));
    if !descriptor.usage().is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            "Usage:".bold(),
            format!("{} {}", TOOL_NAME, descriptor.usage()).cyan()
        ));
    }

    if let Some(categories) = registry.ambiguous_names().get(descriptor.name()) {
        let others: Vec<String> = categories
            .iter()
            .filter(|c| c.as_str() != descriptor.category())
            .map(|c| format!("{}:{}", c, descriptor.name()))
            .collect();
        out.push_str(&format!(
            "{} {}\n",
            "Also defined as:".bold(),
            others.join(", ").yellow()
        ));
    }

    out.trim_end().to_string()
}

/// Other commands in the same category, or `None` when there are none
pub fn related_commands(descriptor: &CommandDescriptor, registry: &CommandRegistry) -> Option<Table> {
    let key = descriptor.key();
    let mut table = Table::new(format!("Related {} Commands", title_case(descriptor.category())))
        .colored_column("Command", Color::Cyan)
        .column("Description");

    for (other_key, cmd) in registry.get_by_category(descriptor.category()) {
        if other_key != key {
            table.add_row([other_key.as_str(), cmd.description()]);
        }
    }

    if table.is_empty() {
        None
    } else {
        Some(table)
    }
}

fn show_command_help(inv: &Invocation<'_>, name: &str) -> bool {
    let dispatcher = Dispatcher::new(inv.registry, inv.ctx);
    match dispatcher.resolve(name) {
        Ok(Resolution::Command(descriptor)) => {
            inv.ctx.print_output(&command_help(descriptor, inv.registry));
            if let Some(page) = descriptor.handler().describe_usage() {
                inv.ctx.print_output("");
                inv.ctx.print_output(&page.render(TOOL_NAME));
            }
            if let Some(table) = related_commands(descriptor, inv.registry) {
                inv.ctx.print_output("");
                inv.ctx.print_output(&table.render());
            }
            true
        }
        Ok(Resolution::Listing(category)) => dispatcher.show_category(&category),
        Err(_) => {
            inv.ctx.print_error(&format!("Command '{}' not found", name));
            inv.ctx.print_hint(
                &format!("Run '{} help' to see available commands", TOOL_NAME),
                Color::Yellow,
            );
            false
        }
    }
}

/// Register the help command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new(
            "help",
            "Display stylistic help information about commands",
            HelpCommand,
        )
        .with_usage("help [command]"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler_fn;
    use crate::ui::strip_ansi;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        register(&mut registry);
        for (name, category) in [("status", "git"), ("sync", "git"), ("status", "env")] {
            registry.register(
                CommandDescriptor::new(name, format!("{} {}", category, name), handler_fn(|_| Ok(true)))
                    .in_category(category)
                    .with_usage(format!("{}:{}", category, name)),
            );
        }
        registry
    }

    #[test]
    fn test_general_help_examples() {
        let text = strip_ansi(&general_help());
        assert!(text.contains("Usage: plasma <command> [args...]"));
        assert!(text.contains("plasma list:git"));
        assert!(text.contains("Show help for specific command"));
    }

    #[test]
    fn test_command_help_fields() {
        let registry = registry();
        let desc = registry.get("git:sync").unwrap();
        let text = strip_ansi(&command_help(desc, &registry));
        assert!(text.starts_with("Help: git:sync"));
        assert!(text.contains("Description: git sync"));
        assert!(text.contains("Category: git"));
        assert!(text.contains("Usage: plasma git:sync"));
        assert!(!text.contains("Also defined as"));
    }

    #[test]
    fn test_command_help_notes_duplicates() {
        let registry = registry();
        let text = strip_ansi(&command_help(registry.get("env:status").unwrap(), &registry));
        assert!(text.contains("Also defined as: git:status"));
    }

    #[test]
    fn test_related_excludes_self() {
        let registry = registry();
        let table = related_commands(registry.get("git:status").unwrap(), &registry).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][0], "git:sync");

        assert!(related_commands(registry.get("env:status").unwrap(), &registry).is_none());
    }
}
