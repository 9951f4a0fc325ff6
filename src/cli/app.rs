//! Main CLI application

use crate::commands::{self, HELP_KEY};
use crate::config::{load_settings, ColorChoice};
use crate::error::PlasmaError;
use crate::registry::CommandRegistry;
use crate::runner::{Context, Dispatcher, Verbosity, LIST_PREFIX};
use crate::{TOOL_NAME, VERSION};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;

/// CLI application
pub struct App {
    /// Every command, registered once at startup
    registry: CommandRegistry,
}

impl App {
    /// Create an app with all built-in commands registered
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        App { registry }
    }

    /// Create an app around an already populated registry
    pub fn with_registry(registry: CommandRegistry) -> Self {
        App { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run the application with the given argv; returns overall success
    pub fn run_from<I, T>(&self, argv: I) -> Result<bool, PlasmaError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match build_command(&self.registry).try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => {
                // --help lands here too and is not a failure
                let success = e.exit_code() == 0;
                e.print()?;
                return Ok(success);
            }
        };

        if matches.get_flag("version") {
            println!("{} version {}", TOOL_NAME, VERSION);
            return Ok(true);
        }

        let config_path = matches.get_one::<String>("config").map(Path::new);
        let (settings, loaded_from) = load_settings(config_path)?;

        let color = if matches.get_flag("no-color") {
            ColorChoice::Never
        } else {
            settings.color
        };
        color.apply();

        let mut ctx = Context::with_settings(settings);
        if let Some(verbosity) = get_verbosity(&matches) {
            ctx = ctx.with_verbosity(verbosity);
        }
        if matches.get_flag("yes") {
            ctx = ctx.with_assume_yes(true);
        }
        if let Some(path) = loaded_from {
            ctx.print_debug(&format!("Loaded settings from {}", path.display()));
        }

        // The first value is the command token, the rest are its arguments
        let mut words: Vec<String> = matches
            .get_many::<String>("command")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let token = if words.is_empty() {
            None
        } else {
            Some(words.remove(0))
        };

        let dispatcher = Dispatcher::new(&self.registry, &ctx);
        let success = match token.as_deref() {
            None | Some("list") => dispatcher.show_all(),
            Some("help") => dispatcher.dispatch(HELP_KEY, &words),
            Some(token) => dispatcher.dispatch(token, &words),
        };

        Ok(success)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command for the top-level surface
pub fn build_command(registry: &CommandRegistry) -> Command {
    Command::new(TOOL_NAME)
        .version(VERSION)
        .about(format!(
            "A pluggable developer toolkit ({} commands)",
            registry.len()
        ))
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Show version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a plasma config.yml"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no messages")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Answer yes to every confirmation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable coloured output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("command")
                .value_name("COMMAND")
                .help("Command to run (category:name or a bare name) and its arguments")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

/// The clap command with every command token offered as a completion value
pub fn completion_command(registry: &CommandRegistry) -> Command {
    let values = command_tokens(registry);
    build_command(registry)
        .mut_arg("command", |arg| {
            arg.num_args(1)
                .trailing_var_arg(false)
                .value_parser(PossibleValuesParser::new(values))
        })
        .arg(
            Arg::new("args")
                .value_name("ARGS")
                .help("Arguments passed to the command")
                .num_args(0..),
        )
}

/// Every token the dispatcher accepts: keys, bare names, listings
pub fn command_tokens(registry: &CommandRegistry) -> Vec<String> {
    let mut tokens: BTreeSet<String> = ["list", "help"].iter().map(|s| s.to_string()).collect();
    for (key, cmd) in registry.get_all() {
        tokens.insert(cmd.name().to_string());
        tokens.insert(key);
    }
    for category in registry.get_categories() {
        tokens.insert(format!("{}{}", LIST_PREFIX, category));
    }
    tokens.into_iter().collect()
}

/// Verbosity from flags; `None` keeps the configured level
fn get_verbosity(matches: &ArgMatches) -> Option<Verbosity> {
    if matches.get_flag("silent") {
        Some(Verbosity::Silent)
    } else if matches.get_flag("quiet") {
        Some(Verbosity::Quiet)
    } else if matches.get_flag("verbose") {
        Some(Verbosity::Verbose)
    } else {
        None
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<bool, PlasmaError> {
    App::new().run_from(std::env::args_os())
}
