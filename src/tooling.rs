//! Tooling & Integration Layer
//!
//! Terminal front-end for the interpreter: the `clap` command line, the
//! interactive REPL, and ANSI rendering of output lines.

pub mod cli;
pub mod render;
pub mod repl;

pub use cli::{Cli, CliContext, Commands, ConfigCommands};
pub use render::render_line;
pub use repl::Repl;
