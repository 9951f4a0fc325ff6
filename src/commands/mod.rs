//! Built-in commands
//!
//! Each category lives in its own module and exposes a `register_all`
//! that adds its descriptors to the registry.

pub mod completions;
pub mod env;
pub mod file;
pub mod git;
pub mod help;
pub mod ip;
pub mod project;
pub mod server;

pub use help::HELP_KEY;

use crate::registry::{CommandRegistry, Invocation};
use crate::ui::HelpPage;
use crate::TOOL_NAME;

/// Register every built-in command
pub fn register_all(registry: &mut CommandRegistry) {
    help::register(registry);
    completions::register(registry);
    file::register_all(registry);
    git::register_all(registry);
    server::register_all(registry);
    ip::register_all(registry);
    project::register_all(registry);
    env::register_all(registry);
}

/// Print a synthesized help page for the running command
pub(crate) fn print_usage(inv: &Invocation<'_>, page: &HelpPage) {
    inv.ctx.print_output(&page.render(TOOL_NAME));
}

/// Report a missing required argument and show the command's help
pub(crate) fn missing_argument(inv: &Invocation<'_>, what: &str, page: &HelpPage) -> bool {
    inv.ctx.print_error(&format!("{} required", what));
    print_usage(inv, page);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_categories() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        assert_eq!(
            registry.get_categories(),
            vec!["env", "file", "general", "git", "ip", "project", "server"]
        );
    }

    #[test]
    fn test_builtin_names_are_unambiguous() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        assert!(registry.ambiguous_names().is_empty());
    }

    #[test]
    fn test_every_usage_starts_with_its_key() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        for (key, cmd) in registry.get_all() {
            if key == HELP_KEY {
                assert_eq!(cmd.usage(), "help [command]");
                continue;
            }
            assert!(
                cmd.usage().starts_with(&key),
                "usage of {} is '{}'",
                key,
                cmd.usage()
            );
        }
    }

    #[test]
    fn test_described_usage_matches_registration() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        for cmd in registry.get_all().values() {
            if let Some(page) = cmd.handler().describe_usage() {
                assert_eq!(page.usage, cmd.usage(), "help page for {}", cmd.key());
            }
        }
    }
}
