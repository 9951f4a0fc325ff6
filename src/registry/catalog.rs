//! The command catalog
//!
//! One registry is built per process in `cli::App` and handed to every
//! registration function and to the dispatcher.

use crate::registry::CommandDescriptor;
use std::collections::{BTreeMap, BTreeSet};

/// Central catalog mapping `category:name` keys to descriptors
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor under its key.
    ///
    /// An existing entry with the same key is replaced; the last
    /// registration wins.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        self.commands.insert(descriptor.key(), descriptor);
    }

    /// Exact lookup by full `category:name` key
    pub fn get(&self, key: &str) -> Option<&CommandDescriptor> {
        self.commands.get(key)
    }

    /// A copy of the whole catalog, ordered by key
    pub fn get_all(&self) -> BTreeMap<String, CommandDescriptor> {
        self.commands.clone()
    }

    /// All entries in `category`; empty if none match
    pub fn get_by_category(&self, category: &str) -> BTreeMap<String, CommandDescriptor> {
        self.commands
            .iter()
            .filter(|(_, cmd)| cmd.category() == category)
            .map(|(key, cmd)| (key.clone(), cmd.clone()))
            .collect()
    }

    /// Distinct categories, sorted ascending
    pub fn get_categories(&self) -> Vec<String> {
        self.commands
            .values()
            .map(|cmd| cmd.category().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Bare names registered under more than one category.
    ///
    /// Each entry lists the categories in the order fallback resolution
    /// tries them, so the first one is the category a bare name reaches.
    pub fn ambiguous_names(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for cmd in self.commands.values() {
            by_name
                .entry(cmd.name().to_string())
                .or_default()
                .push(cmd.category().to_string());
        }
        by_name.retain(|_, categories| categories.len() > 1);
        for categories in by_name.values_mut() {
            categories.sort();
        }
        by_name
    }

    /// All keys, ordered
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
