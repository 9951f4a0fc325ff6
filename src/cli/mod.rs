//! CLI interface and argument parsing
//!
//! This module handles top-level argument parsing and hands the command
//! token to the dispatcher.

pub mod app;

// Re-export main types
pub use app::*;
