//! Command execution engine
//!
//! This module resolves user tokens to registered commands, runs them, and
//! provides the process helpers handlers use to call external tools.

pub mod context;
pub mod dispatch;
pub mod process;

// Re-export main types
pub use context::*;
pub use dispatch::*;
pub use process::*;
