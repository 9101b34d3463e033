//! Command Interpreter
//!
//! A line-oriented session over a shared node store. Each input line is
//! tokenized, dispatched through the command table, and answered with tagged
//! output lines appended to the session's log. Errors never end the session:
//! each becomes a single error line.

pub mod commands;
pub mod complete;
pub mod history;
pub mod host;
pub mod output;

pub use complete::Completion;
pub use history::History;
pub use host::{NullHost, ShellHost, ShellSignal, SignalQueue};
pub use output::{LineKind, ListingEntry, OutputLine, Tint};

use crate::config::SessionConfig;
use crate::error::ShellError;
use crate::store::StoreHandle;
use crate::tree::resolver::{resolve_path, split_parent, Resolved};
use crate::types::FolderRef;
use commands::Invocation;
use tracing::debug;

/// Result of executing one input line
#[derive(Debug, Clone, Default)]
pub struct Execution {
    /// Lines produced by the command (the prompt echo excluded)
    pub lines: Vec<OutputLine>,
    /// The error the command failed with, already rendered into `lines`
    pub error: Option<ShellError>,
    /// Whether the command emptied the output log
    pub cleared: bool,
}

/// Interpreter session
pub struct Shell {
    store: StoreHandle,
    session: SessionConfig,
    host: Box<dyn ShellHost>,
    history: History,
    output: Vec<OutputLine>,
    cleared: bool,
    exited: bool,
}

impl Shell {
    pub fn new(store: StoreHandle, session: SessionConfig, host: Box<dyn ShellHost>) -> Self {
        Self {
            store,
            session,
            host,
            history: History::new(),
            output: vec![
                OutputLine::normal(format!(
                    "Talos Command Line Interface v{}",
                    env!("CARGO_PKG_VERSION")
                )),
                OutputLine::normal("Type 'help' to see available commands."),
                OutputLine::normal(""),
            ],
            cleared: false,
            exited: false,
        }
    }

    /// Execute one input line. Blank lines are ignored.
    pub fn execute(&mut self, line: &str) -> Execution {
        if line.trim().is_empty() {
            return Execution::default();
        }

        self.history.push(line);
        let echo = OutputLine::Prompt(format!("{}{}", self.prompt(), line));
        self.output.push(echo);

        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_lowercase();
        let invocation = Invocation {
            name: &name,
            args: tokens.collect(),
        };
        debug!(command = %name, args = ?invocation.args, "Dispatching command");

        let result = match commands::lookup(&name) {
            Some(spec) => (spec.handler)(self, &invocation),
            None => Err(ShellError::NotFound(format!(
                "Command not found: {}. Type 'help' for a list of commands.",
                name
            ))),
        };

        let (lines, error) = match result {
            Ok(lines) => (lines, None),
            Err(e) => {
                debug!(command = %name, error = %e, "Command failed");
                (vec![OutputLine::Error(e.to_string())], Some(e))
            }
        };
        self.output.extend(lines.iter().cloned());

        Execution {
            lines,
            error,
            cleared: std::mem::take(&mut self.cleared),
        }
    }

    /// Prompt prefix, e.g. `admin@talos:C:\Documents\$ `
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.session.user,
            self.session.hostname,
            self.current_path()
        )
    }

    pub fn current_path(&self) -> String {
        self.store.read().current_path(&self.session.root_label)
    }

    pub fn current_folder(&self) -> FolderRef {
        self.store.read().current_folder().map(str::to_string)
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_previous(&mut self) -> Option<&str> {
        self.history.previous()
    }

    pub fn history_next(&mut self) -> Option<&str> {
        self.history.next()
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// Compute the completion for `line` without touching the log.
    pub fn complete(&self, line: &str) -> Completion {
        let store = self.store.read();
        complete::complete_line(&store, line, &self.session.root_label)
    }

    /// Apply tab completion to an input buffer and return the new buffer.
    ///
    /// With several candidates the buffer is unchanged and the candidates are
    /// listed in the log under an echo of the current line.
    pub fn tab(&mut self, line: &str) -> String {
        match self.complete(line) {
            Completion::Complete(replacement) => replacement,
            Completion::Candidates(candidates) => {
                let echo = OutputLine::Prompt(format!("{}{}", self.prompt(), line));
                self.output.push(echo);
                self.output.push(OutputLine::Normal(candidates.join("  ")));
                line.to_string()
            }
            Completion::NoMatch => line.to_string(),
        }
    }

    fn resolve(&self, path: &str) -> Resolved {
        let store = self.store.read();
        resolve_path(&store, store.current_folder(), path, &self.session.root_label)
    }

    /// Parent folder and leaf name for a node about to be created at `path`.
    ///
    /// `Ok(None)` when the parent does not resolve to a folder.
    fn creation_target<'p>(
        &self,
        path: &'p str,
        command: &str,
    ) -> Result<Option<(FolderRef, &'p str)>, ShellError> {
        let (parent_path, name) = split_parent(path);
        if name.is_empty() || name == "." || name == ".." {
            return Err(ShellError::InvalidOperation(format!(
                "{}: invalid name '{}'",
                command, path
            )));
        }
        let parent = match parent_path {
            None => self.current_folder(),
            Some(parent_path) => match self.resolve(parent_path) {
                Resolved::Folder(folder) => folder,
                _ => return Ok(None),
            },
        };
        Ok(Some((parent, name)))
    }

    fn signal(&self, signal: ShellSignal) {
        self.host.signal(signal);
    }
}
