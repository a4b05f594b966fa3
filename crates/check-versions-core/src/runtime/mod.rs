//! Local tool probing and tool descriptors
//!
//! This module provides:
//! - Tool probing through the [`ProcessRunner`] seam
//! - The default descriptors for Node.js, npm and Git

pub mod probe;
pub mod tool;

pub use probe::{probe_version, ProcessRunner, SystemRunner};
pub use tool::{configured_tools, default_tools, select_tools, ToolDescriptor};
