//! Command registry
//!
//! This module holds command metadata and the handler contract that every
//! command implements.

pub mod catalog;
pub mod descriptor;

// Re-export main types
pub use catalog::*;
pub use descriptor::*;
