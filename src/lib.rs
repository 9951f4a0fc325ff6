//! Plasma - a pluggable developer toolkit
//!
//! Commands are grouped into categories and addressed as `category:name`.
//! Every command registers into a [`registry::CommandRegistry`] at startup and
//! is invoked through the [`runner::Dispatcher`], which resolves bare names by
//! scanning categories in sorted order.

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod registry;
pub mod runner;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use error::{PlasmaError, Result};

/// Current version of Plasma
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name used in usage lines and hints
pub const TOOL_NAME: &str = "plasma";
