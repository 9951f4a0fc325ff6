//! Settings loading and validation
//!
//! This module handles the optional `config.yml` that tunes defaults such as
//! verbosity, ping count and the shell config file commands edit.

pub mod parse;
pub mod types;

// Re-export main types
pub use parse::*;
pub use types::*;
