//! Talos: Virtual Filesystem Shell
//!
//! An in-memory hierarchical filesystem with write-through persistence, a path
//! resolver for Windows-flavored paths, and a line-oriented command interpreter
//! over the shared store.

pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
