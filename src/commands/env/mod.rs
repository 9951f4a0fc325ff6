//! Environment commands: PATH, variables and the shell config file

pub mod path;
pub mod shell;
pub mod vars;

use crate::registry::CommandRegistry;

/// Register every `env:*` command
pub fn register_all(registry: &mut CommandRegistry) {
    path::register(registry);
    vars::register(registry);
    shell::register(registry);
}
