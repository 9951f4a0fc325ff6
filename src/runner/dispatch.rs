//! Command resolution and invocation
//!
//! A token is resolved in this order:
//!
//! 1. `list:<category>` is a category listing, not a handler call.
//! 2. An exact `category:name` key.
//! 3. `<category>:<token>` for each category in sorted order; the first hit
//!    wins. A bare name defined in two categories therefore always reaches
//!    the alphabetically earlier one.
//!
//! Anything else is a resolution failure. Handler errors and panics are
//! caught here and turned into a failed dispatch.

use crate::error::{DispatchError, DispatchResult};
use crate::registry::{command_key, CommandDescriptor, CommandRegistry, Invocation};
use crate::runner::Context;
use crate::ui::{title_case, Table};
use crate::TOOL_NAME;
use colored::Color;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

/// Prefix that turns a token into a category listing
pub const LIST_PREFIX: &str = "list:";

/// Outcome of resolving a user token
#[derive(Debug)]
pub enum Resolution<'r> {
    /// `list:<category>` request
    Listing(String),
    /// A registered command
    Command(&'r CommandDescriptor),
}

/// Resolves tokens against a registry and runs at most one handler per call
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    ctx: &'a Context,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a CommandRegistry, ctx: &'a Context) -> Self {
        Dispatcher { registry, ctx }
    }

    /// Resolve a token without invoking anything
    pub fn resolve(&self, token: &str) -> DispatchResult<Resolution<'a>> {
        if let Some(category) = token.strip_prefix(LIST_PREFIX) {
            return Ok(Resolution::Listing(category.to_string()));
        }

        if let Some(cmd) = self.registry.get(token) {
            return Ok(Resolution::Command(cmd));
        }

        let categories = self.registry.get_categories();
        for category in &categories {
            if let Some(cmd) = self.registry.get(&command_key(category, token)) {
                return Ok(Resolution::Command(cmd));
            }
        }

        Err(DispatchError::NotFound {
            command: token.to_string(),
            categories,
        })
    }

    /// Commands for `list:<category>`, failing when the category is empty
    pub fn category_listing(&self, category: &str) -> DispatchResult<BTreeMap<String, CommandDescriptor>> {
        let commands = self.registry.get_by_category(category);
        if commands.is_empty() {
            return Err(DispatchError::EmptyCategory {
                category: category.to_string(),
                categories: self.registry.get_categories(),
            });
        }
        Ok(commands)
    }

    /// Run a resolved command's handler, catching errors and panics.
    ///
    /// `Ok(false)` means the handler reported its own failure.
    pub fn invoke(
        &self,
        token: &str,
        descriptor: &CommandDescriptor,
        args: &[String],
    ) -> DispatchResult<bool> {
        let key = descriptor.key();
        let inv = Invocation {
            key: &key,
            args,
            ctx: self.ctx,
            registry: self.registry,
        };

        self.ctx.print_debug(&format!("Executing {} with {} argument(s)", key, args.len()));

        match catch_quietly(|| descriptor.handler().execute(&inv)) {
            Ok(Ok(success)) => Ok(success),
            Ok(Err(e)) => Err(DispatchError::Execution {
                command: token.to_string(),
                message: format!("{:#}", e),
            }),
            Err(payload) => Err(DispatchError::Execution {
                command: token.to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Resolve and run `token`; returns the overall success
    pub fn dispatch(&self, token: &str, args: &[String]) -> bool {
        match self.resolve(token) {
            Ok(Resolution::Listing(category)) => self.show_category(&category),
            Ok(Resolution::Command(descriptor)) => {
                self.note_fallback(token, descriptor);
                match self.invoke(token, descriptor, args) {
                    Ok(success) => success,
                    Err(e) => {
                        self.report(&e);
                        false
                    }
                }
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Print every registered command grouped in one table
    pub fn show_all(&self) -> bool {
        let mut table = Table::new(format!("Available {} Commands", TOOL_NAME))
            .colored_column("Command", Color::Cyan)
            .colored_column("Description", Color::Magenta)
            .colored_column("Category", Color::Green);

        for (key, cmd) in self.registry.get_all() {
            table.add_row([key.as_str(), cmd.description(), cmd.category()]);
        }

        self.ctx.print_output(&table.render());
        true
    }

    /// Print the commands of one category, or report it as empty
    pub fn show_category(&self, category: &str) -> bool {
        match self.category_listing(category) {
            Ok(commands) => {
                let mut table = Table::new(format!("{} Commands", title_case(category)))
                    .colored_column("Command", Color::Cyan)
                    .colored_column("Description", Color::Magenta);
                for (key, cmd) in &commands {
                    table.add_row([key.as_str(), cmd.description()]);
                }
                self.ctx.print_output(&table.render());
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Print a dispatch failure with its remediation hints
    pub fn report(&self, err: &DispatchError) {
        match err {
            DispatchError::NotFound { categories, .. } => {
                self.ctx.print_error(&err.to_string());
                self.ctx.print_hint(
                    &format!("Run '{} list' to see available commands", TOOL_NAME),
                    Color::Yellow,
                );
                if !categories.is_empty() {
                    self.ctx.print_hint(
                        &format!("Or try: {} {}<category>", TOOL_NAME, LIST_PREFIX),
                        Color::Blue,
                    );
                    self.ctx.print_hint(
                        &format!("Available categories: {}", categories.join(", ")),
                        Color::Blue,
                    );
                }
            }
            DispatchError::EmptyCategory { categories, .. } => {
                self.ctx.print_warning(&err.to_string());
                self.ctx.print_hint(
                    &format!("Available categories: {}", categories.join(", ")),
                    Color::Blue,
                );
            }
            DispatchError::Execution { .. } => self.ctx.print_error(&err.to_string()),
        }
    }

    // Verbose runs say when a bare name shadowed the same name elsewhere
    fn note_fallback(&self, token: &str, descriptor: &CommandDescriptor) {
        if token.contains(':') {
            return;
        }
        if let Some(categories) = self.registry.ambiguous_names().get(token) {
            let others: Vec<&str> = categories
                .iter()
                .map(String::as_str)
                .filter(|c| *c != descriptor.category())
                .collect();
            self.ctx.print_debug(&format!(
                "'{}' resolved to {}; also defined in: {}",
                token,
                descriptor.key(),
                others.join(", ")
            ));
        }
    }
}

/// Run `f`, catching a panic without the default hook printing it.
/// The previous hook is restored afterwards.
fn catch_quietly<F, R>(f: F) -> std::thread::Result<R>
where
    F: FnOnce() -> R,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler_fn;
    use crate::runner::Verbosity;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<String>>>;

    fn recorder(calls: &Calls, label: &str) -> impl Fn(&Invocation<'_>) -> anyhow::Result<bool> {
        let calls = Rc::clone(calls);
        let label = label.to_string();
        handler_fn(move |inv| {
            calls.borrow_mut().push(format!("{} {}", label, inv.args.join(" ")).trim().to_string());
            Ok(true)
        })
    }

    fn quiet_ctx() -> Context {
        Context::new().with_verbosity(Verbosity::Silent)
    }

    fn registry_with(calls: &Calls) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDescriptor::new("status", "Git status", recorder(calls, "H1")).in_category("git"),
        );
        registry.register(
            CommandDescriptor::new("status", "Env status", recorder(calls, "H2")).in_category("env"),
        );
        registry.register(
            CommandDescriptor::new("ping", "Ping", recorder(calls, "PING")).in_category("ip"),
        );
        registry
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_key_resolution() {
        let calls = Calls::default();
        let registry = registry_with(&calls);
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        assert!(dispatcher.dispatch("git:status", &[]));
        assert_eq!(*calls.borrow(), vec!["H1"]);
    }

    #[test]
    fn test_bare_name_single_category() {
        let calls = Calls::default();
        let registry = registry_with(&calls);
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        assert!(dispatcher.dispatch("ping", &args(&["localhost", "2"])));
        assert_eq!(*calls.borrow(), vec!["PING localhost 2"]);
    }

    #[test]
    fn test_bare_name_prefers_earliest_category() {
        let calls = Calls::default();
        let registry = registry_with(&calls);
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        // env < git, so the env handler runs even though git registered first
        assert!(dispatcher.dispatch("status", &[]));
        assert_eq!(*calls.borrow(), vec!["H2"]);

        match dispatcher.resolve("status").unwrap() {
            Resolution::Command(cmd) => assert_eq!(cmd.key(), "env:status"),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_token_invokes_nothing() {
        let calls = Calls::default();
        let registry = registry_with(&calls);
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        assert!(!dispatcher.dispatch("nonexistent", &[]));
        assert!(calls.borrow().is_empty());

        let err = dispatcher.resolve("nonexistent").unwrap_err();
        assert_eq!(
            err,
            DispatchError::NotFound {
                command: "nonexistent".to_string(),
                categories: vec!["env".to_string(), "git".to_string(), "ip".to_string()],
            }
        );
    }

    #[test]
    fn test_list_prefix_short_circuits() {
        let calls = Calls::default();
        let registry = registry_with(&calls);
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        assert!(matches!(
            dispatcher.resolve("list:git").unwrap(),
            Resolution::Listing(ref c) if c == "git"
        ));
        assert!(dispatcher.dispatch("list:git", &[]));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_category_listing_counts() {
        let calls = Calls::default();
        let mut registry = registry_with(&calls);
        registry.register(
            CommandDescriptor::new("sync", "Git sync", recorder(&calls, "SYNC")).in_category("git"),
        );
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        assert_eq!(dispatcher.category_listing("git").unwrap().len(), 2);
        assert_eq!(dispatcher.category_listing("ip").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_category_fails() {
        let calls = Calls::default();
        let registry = registry_with(&calls);
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let err = dispatcher.category_listing("project").unwrap_err();
        assert!(matches!(err, DispatchError::EmptyCategory { ref category, .. } if category == "project"));
        assert_eq!(err.categories(), &["env", "git", "ip"]);
        assert!(!dispatcher.dispatch("list:project", &[]));
    }

    #[test]
    fn test_handler_false_is_failure() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDescriptor::new("fail", "Fails", handler_fn(|_| Ok(false))));
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        assert!(!dispatcher.dispatch("fail", &[]));
    }

    #[test]
    fn test_handler_error_is_caught() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDescriptor::new("boom", "Errors", handler_fn(|_| anyhow::bail!("disk on fire")))
                .in_category("file"),
        );
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let desc = registry.get("file:boom").unwrap();
        let err = dispatcher.invoke("boom", desc, &[]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Execution {
                command: "boom".to_string(),
                message: "disk on fire".to_string(),
            }
        );
        assert!(!dispatcher.dispatch("boom", &[]));
    }

    #[test]
    fn test_handler_panic_is_caught() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDescriptor::new(
            "panic",
            "Panics",
            handler_fn(|_| panic!("handler blew up")),
        ));
        let ctx = quiet_ctx();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let desc = registry.get("general:panic").unwrap();
        match dispatcher.invoke("panic", desc, &[]) {
            Err(DispatchError::Execution { message, .. }) => assert_eq!(message, "handler blew up"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_invocation_carries_key() {
        let seen: Rc<RefCell<String>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDescriptor::new(
                "probe",
                "",
                handler_fn(move |inv| {
                    *sink.borrow_mut() = inv.key.to_string();
                    Ok(true)
                }),
            )
            .in_category("ip"),
        );
        let ctx = quiet_ctx();
        assert!(Dispatcher::new(&registry, &ctx).dispatch("probe", &[]));
        assert_eq!(*seen.borrow(), "ip:probe");
    }

    #[test]
    fn test_show_all_succeeds_on_empty_registry() {
        let registry = CommandRegistry::new();
        let ctx = quiet_ctx();
        assert!(Dispatcher::new(&registry, &ctx).show_all());
    }
}
