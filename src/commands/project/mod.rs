//! Project scaffolding commands

pub mod license;
pub mod templates;

use crate::registry::CommandRegistry;

/// Register every `project:*` command
pub fn register_all(registry: &mut CommandRegistry) {
    license::register(registry);
}
