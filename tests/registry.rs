//! Integration tests for registration, resolution and dispatch

use plasma::cli::App;
use plasma::error::DispatchError;
use plasma::registry::{handler_fn, CommandDescriptor, CommandRegistry};
use plasma::runner::{Context, Dispatcher, Resolution, Verbosity};
use std::cell::RefCell;
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<String>>>;

fn recording(registry: &mut CommandRegistry, calls: &Calls, name: &str, category: &str) {
    let calls = Rc::clone(calls);
    let key = format!("{}:{}", category, name);
    registry.register(
        CommandDescriptor::new(
            name,
            format!("{} in {}", name, category),
            handler_fn(move |inv| {
                calls
                    .borrow_mut()
                    .push(format!("{} {}", key, inv.args.join(" ")).trim_end().to_string());
                Ok(true)
            }),
        )
        .in_category(category)
        .with_usage(format!("{}:{} [args]", category, name)),
    );
}

fn silent() -> Context {
    Context::new().with_verbosity(Verbosity::Silent)
}

#[test]
fn test_bare_name_prefers_first_sorted_category() {
    let calls = Calls::default();
    let mut registry = CommandRegistry::new();
    recording(&mut registry, &calls, "status", "git");
    recording(&mut registry, &calls, "status", "env");

    let ctx = silent();
    let dispatcher = Dispatcher::new(&registry, &ctx);
    assert!(dispatcher.dispatch("status", &["-s".to_string()]));
    assert!(dispatcher.dispatch("git:status", &[]));

    assert_eq!(*calls.borrow(), vec!["env:status -s", "git:status"]);
    assert_eq!(
        registry.ambiguous_names().get("status"),
        Some(&vec!["env".to_string(), "git".to_string()])
    );
}

#[test]
fn test_reregistration_replaces_descriptor() {
    let calls = Calls::default();
    let mut registry = CommandRegistry::new();
    recording(&mut registry, &calls, "sync", "git");
    registry.register(
        CommandDescriptor::new("sync", "replacement", handler_fn(|_| Ok(false))).in_category("git"),
    );

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("git:sync").unwrap().description(), "replacement");

    let ctx = silent();
    assert!(!Dispatcher::new(&registry, &ctx).dispatch("git:sync", &[]));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_resolution_outcomes() {
    let calls = Calls::default();
    let mut registry = CommandRegistry::new();
    recording(&mut registry, &calls, "size", "file");

    let ctx = silent();
    let dispatcher = Dispatcher::new(&registry, &ctx);

    match dispatcher.resolve("size").unwrap() {
        Resolution::Command(desc) => assert_eq!(desc.key(), "file:size"),
        Resolution::Listing(_) => panic!("expected a command"),
    }
    match dispatcher.resolve("list:file").unwrap() {
        Resolution::Listing(category) => assert_eq!(category, "file"),
        Resolution::Command(_) => panic!("expected a listing"),
    }
    assert_eq!(
        dispatcher.resolve("nope").err(),
        Some(DispatchError::NotFound {
            command: "nope".to_string(),
            categories: vec!["file".to_string()],
        })
    );
}

#[test]
fn test_failing_handler_is_contained() {
    let mut registry = CommandRegistry::new();
    registry.register(
        CommandDescriptor::new("boom", "", handler_fn(|_| anyhow::bail!("disk full")))
            .in_category("file"),
    );

    let ctx = silent();
    let dispatcher = Dispatcher::new(&registry, &ctx);
    let desc = registry.get("file:boom").unwrap();
    assert_eq!(
        dispatcher.invoke("boom", desc, &[]),
        Err(DispatchError::Execution {
            command: "boom".to_string(),
            message: "disk full".to_string(),
        })
    );
    assert!(!dispatcher.dispatch("boom", &[]));
}

#[test]
fn test_category_views_are_snapshots() {
    let calls = Calls::default();
    let mut registry = CommandRegistry::new();
    recording(&mut registry, &calls, "ping", "ip");
    recording(&mut registry, &calls, "port", "ip");

    let mut snapshot = registry.get_by_category("ip");
    snapshot.clear();

    assert_eq!(registry.get_by_category("ip").len(), 2);
    assert_eq!(registry.get_categories(), vec!["ip"]);
    assert!(registry.get_by_category("git").is_empty());
}

#[test]
fn test_panicking_handler_fails_the_run() {
    let mut registry = CommandRegistry::new();
    registry.register(CommandDescriptor::new(
        "boom",
        "always panics",
        handler_fn(|_| panic!("kaboom")),
    ));

    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.yml");
    std::fs::write(&config, "").unwrap();

    let app = App::with_registry(registry);
    let result = app.run_from([
        "plasma",
        "-c",
        config.to_str().unwrap(),
        "-s",
        "--no-color",
        "boom",
    ]);
    assert!(matches!(result, Ok(false)));
}
