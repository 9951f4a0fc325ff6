//! Execution context for command runs
//!
//! The context carries settings and verbosity for one invocation and owns
//! every tagged message a command prints.

use crate::config::Settings;
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Execution context shared by the dispatcher and all handlers
pub struct Context {
    /// Current working directory
    pub working_dir: PathBuf,

    /// Loaded settings (defaults when no config file exists)
    pub settings: Settings,

    /// Interpreter used for shell command strings (e.g., ["sh", "-c"])
    pub interpreter: Vec<String>,

    /// Verbosity level
    pub verbosity: Verbosity,

    /// Answer yes to every confirmation prompt
    pub assume_yes: bool,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    #[default]
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a context from loaded settings
    pub fn with_settings(settings: Settings) -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            verbosity: settings.verbosity,
            assume_yes: settings.assume_yes,
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            settings,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Answer yes to confirmations
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Resolve a possibly relative path against the working directory
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let expanded = crate::utils::expand_home(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.working_dir.join(expanded)
        }
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[INFO]".blue(), message);
        }
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[SUCCESS]".green(), message);
        }
    }

    /// Print warning message
    pub fn print_warning(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[WARNING]".yellow(), message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "[ERROR]".red(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }

    /// Print an untagged hint line in the given colour
    pub fn print_hint(&self, message: &str, color: Color) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message.color(color));
        }
    }

    /// Write command output to stdout unless silenced
    pub fn print_output(&self, text: &str) {
        if self.verbosity > Verbosity::Silent {
            println!("{}", text);
        }
    }

    /// Ask a yes/no question on stderr and read the answer from stdin.
    ///
    /// Returns true without asking under `--yes`, false on end of input.
    pub fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            self.print_debug(&format!("Assuming yes: {}", message));
            return true;
        }
        match self.prompt(&format!("{} (y/n)", message)) {
            Some(answer) => answer.to_lowercase().starts_with('y'),
            None => false,
        }
    }

    /// Ask for a line of input; `None` on end of input
    pub fn prompt(&self, message: &str) -> Option<String> {
        eprint!("{}: ", message);
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = Context::new();
        assert_eq!(ctx.verbosity, Verbosity::Normal);
        assert_eq!(ctx.interpreter, vec!["sh", "-c"]);
        assert!(!ctx.assume_yes);
    }

    #[test]
    fn test_context_from_settings() {
        let settings = Settings {
            verbosity: Verbosity::Quiet,
            assume_yes: true,
            ..Settings::default()
        };
        let ctx = Context::with_settings(settings);
        assert_eq!(ctx.verbosity, Verbosity::Quiet);
        assert!(ctx.assume_yes);
    }

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
    }

    #[test]
    fn test_confirm_assume_yes() {
        let ctx = Context::new().with_assume_yes(true);
        assert!(ctx.confirm("Proceed?"));
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context::new().with_working_dir(PathBuf::from("/tmp/work"));
        assert_eq!(ctx.resolve_path("sub"), PathBuf::from("/tmp/work/sub"));
        assert_eq!(ctx.resolve_path("/etc"), PathBuf::from("/etc"));
    }

    #[test]
    fn test_with_verbosity() {
        let ctx = Context::new().with_verbosity(Verbosity::Verbose);
        assert_eq!(ctx.verbosity, Verbosity::Verbose);
    }
}
