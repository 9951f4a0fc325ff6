//! Command descriptors and the handler contract

use crate::registry::CommandRegistry;
use crate::runner::Context;
use crate::ui::HelpPage;
use std::fmt;
use std::rc::Rc;

/// Category used when a command does not name one
pub const DEFAULT_CATEGORY: &str = "general";

/// Separator between category and name in a key
pub const KEY_SEPARATOR: char = ':';

/// Build the `category:name` key for a command
pub fn command_key(category: &str, name: &str) -> String {
    format!("{}{}{}", category, KEY_SEPARATOR, name)
}

/// Everything a handler gets to see for one call
pub struct Invocation<'a> {
    /// Resolved `category:name` key
    pub key: &'a str,

    /// Positional arguments following the command token
    pub args: &'a [String],

    /// Output and settings for this run
    pub ctx: &'a Context,

    /// The catalog the command was resolved from
    pub registry: &'a CommandRegistry,
}

impl<'a> Invocation<'a> {
    /// Positional argument at `index`, if present
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(String::as_str)
    }

    /// Arguments from `index` onwards joined by single spaces
    pub fn rest(&self, index: usize) -> String {
        self.args.get(index..).unwrap_or_default().join(" ")
    }
}

/// Behaviour backing a registered command.
///
/// `Ok(true)` is success and `Ok(false)` is a failure the handler has
/// already reported. `Err` is a fault; the dispatcher reports it with the
/// command name.
pub trait CommandHandler {
    /// Run the command
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool>;

    /// Action list for synthesized help, if the command has sub-actions
    fn describe_usage(&self) -> Option<HelpPage> {
        None
    }
}

impl<F> CommandHandler for F
where
    F: Fn(&Invocation<'_>) -> anyhow::Result<bool>,
{
    fn execute(&self, inv: &Invocation<'_>) -> anyhow::Result<bool> {
        self(inv)
    }
}

/// Pin a closure to the handler signature so argument and error types infer
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&Invocation<'_>) -> anyhow::Result<bool>,
{
    f
}

/// Registered metadata for one command
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    category: String,
    description: String,
    usage: String,
    handler: Rc<dyn CommandHandler>,
}

impl CommandDescriptor {
    /// Create a descriptor in the default category with no usage string
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        CommandDescriptor {
            name: name.into(),
            category: DEFAULT_CATEGORY.to_string(),
            description: description.into(),
            usage: String::new(),
            handler: Rc::new(handler),
        }
    }

    /// Place the command in a category; an empty category keeps the default
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.is_empty() {
            self.category = category;
        }
        self
    }

    /// Set the usage template shown in help
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Full `category:name` key
    pub fn key(&self) -> String {
        command_key(&self.category, &self.name)
    }

    /// The backing handler
    pub fn handler(&self) -> &dyn CommandHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Invocation<'_>) -> anyhow::Result<bool> {
        Ok(true)
    }

    #[test]
    fn test_default_category() {
        let desc = CommandDescriptor::new("help", "Show help", noop);
        assert_eq!(desc.category(), "general");
        assert_eq!(desc.key(), "general:help");
        assert_eq!(desc.usage(), "");
    }

    #[test]
    fn test_empty_category_keeps_default() {
        let desc = CommandDescriptor::new("x", "", noop).in_category("");
        assert_eq!(desc.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_builder_fields() {
        let desc = CommandDescriptor::new("status", "Git status", noop)
            .in_category("git")
            .with_usage("git:status");
        assert_eq!(desc.name(), "status");
        assert_eq!(desc.description(), "Git status");
        assert_eq!(desc.usage(), "git:status");
        assert_eq!(desc.key(), "git:status");
    }

    #[test]
    fn test_debug_omits_handler() {
        let desc = CommandDescriptor::new("a", "b", noop).in_category("c");
        let dbg = format!("{:?}", desc);
        assert!(dbg.contains("\"a\""));
        assert!(dbg.contains(".."));
    }
}
