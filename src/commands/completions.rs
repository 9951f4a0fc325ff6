//! `general:completions` - shell completion scripts

use crate::commands::{missing_argument, print_usage};
use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, Invocation};
use crate::ui::HelpPage;
use crate::TOOL_NAME;
use clap::ValueEnum;
use clap_complete::{generate, Shell};
use std::io;

const USAGE: &str = "general:completions <shell>";

pub struct CompletionsCommand;

impl CommandHandler for CompletionsCommand {
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        let page = self.help_page();
        let Some(name) = inv.arg(0) else {
            return Ok(missing_argument(inv, "Shell name", &page));
        };

        let shell = match name.parse::<Shell>() {
            Ok(shell) => shell,
            Err(_) => {
                inv.ctx.print_error(&format!("Unsupported shell '{}'", name));
                print_usage(inv, &page);
                return Ok(false);
            }
        };

        let mut cmd = crate::cli::completion_command(inv.registry);
        generate(shell, &mut cmd, TOOL_NAME, &mut io::stdout());
        Ok(true)
    }

    fn describe_usage(&self) -> Option<HelpPage> {
        Some(self.help_page())
    }
}

impl CompletionsCommand {
    fn help_page(&self) -> HelpPage {
        Shell::value_variants().iter().fold(
            HelpPage::new(USAGE).summary("Print a completion script for your shell"),
            |page, shell| page.action(shell.to_string(), format!("Completions for {}", shell)),
        )
    }
}

/// Register the completions command
pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDescriptor::new("completions", "Generate shell completion scripts", CompletionsCommand)
            .with_usage(USAGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_page_lists_shells() {
        let page = CompletionsCommand.help_page();
        let names: Vec<&str> = page.actions.iter().map(|a| a.name.as_str()).collect();
        assert!(names.contains(&"bash"));
        assert!(names.contains(&"zsh"));
        assert!(names.contains(&"fish"));
    }
}
