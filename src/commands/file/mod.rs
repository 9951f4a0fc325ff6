//! File commands

pub mod backup;
pub mod size;

use crate::registry::CommandRegistry;

/// Register every `file:*` command
pub fn register_all(registry: &mut CommandRegistry) {
    size::register(registry);
    backup::register(registry);
}
