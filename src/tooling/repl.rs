//! Interactive REPL over a [`Shell`] session.
//!
//! Line editing and the completion menu come from `reedline`; the completer
//! reads the same store handle the interpreter mutates. Host signals queued by
//! a command are handled before the next prompt.

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::shell::complete::{complete_line, Completion};
use crate::shell::{Shell, ShellSignal, SignalQueue};
use crate::store::StoreHandle;
use crate::tooling::render::render_line;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Completer, DefaultPrompt, DefaultPromptSegment,
    Emacs, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
    Span, Suggestion,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const COMPLETION_MENU: &str = "completion_menu";

/// Completes command names and paths against the shared store
pub struct ShellCompleter {
    store: StoreHandle,
    root_label: String,
}

impl ShellCompleter {
    pub fn new(store: StoreHandle, root_label: impl Into<String>) -> Self {
        Self {
            store,
            root_label: root_label.into(),
        }
    }
}

fn suggestion(value: String, start: usize, end: usize) -> Suggestion {
    Suggestion {
        value,
        description: None,
        style: None,
        extra: None,
        span: Span { start, end },
        append_whitespace: false,
    }
}

/// Byte offset where the word being completed starts.
fn leaf_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace() || *c == '/' || *c == '\\')
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let before = &line[..pos];
        let completion = {
            let store = self.store.read();
            complete_line(&store, before, &self.root_label)
        };
        match completion {
            Completion::NoMatch => Vec::new(),
            Completion::Complete(replacement) => vec![suggestion(replacement, 0, pos)],
            Completion::Candidates(candidates) => {
                let start = leaf_start(before);
                candidates
                    .into_iter()
                    .map(|candidate| suggestion(candidate, start, pos))
                    .collect()
            }
        }
    }
}

/// Terminal session: a shell, its signal queue, and rendering options
pub struct Repl {
    shell: Shell,
    signals: SignalQueue,
    color: bool,
}

impl Repl {
    pub fn new(store: StoreHandle, session: SessionConfig, color: bool) -> Self {
        let signals = SignalQueue::new();
        let shell = Shell::new(store, session, Box::new(signals.clone()));
        Self {
            shell,
            signals,
            color,
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    fn editor(&self) -> Reedline {
        let completer = Box::new(ShellCompleter::new(
            self.shell.store().clone(),
            self.shell.session().root_label.clone(),
        ));
        let completion_menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
    }

    /// Run until `exit`, Ctrl-D, or end of input.
    pub fn run(&mut self) -> Result<(), ApiError> {
        let mut editor = self.editor();
        for line in self.shell.output() {
            println!("{}", render_line(line, self.color));
        }
        info!("Interactive session started");

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(self.shell.prompt().trim_end().to_string()),
                DefaultPromptSegment::Empty,
            );
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let execution = self.shell.execute(&line);
                    if execution.cleared {
                        editor.clear_screen()?;
                    }
                    for line in &execution.lines {
                        println!("{}", render_line(line, self.color));
                    }
                    if self.handle_signals()? {
                        break;
                    }
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => break,
            }
        }
        info!("Interactive session ended");
        Ok(())
    }

    /// Handle queued signals; true when the session should end.
    fn handle_signals(&mut self) -> Result<bool, ApiError> {
        for signal in self.signals.drain() {
            debug!(?signal, "Handling shell signal");
            match signal {
                ShellSignal::OpenFile { file_id, app } => self.edit_file(&file_id, &app)?,
                ShellSignal::CloseWindow { after } => {
                    std::thread::sleep(after);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Inline editor: replace the file's content with lines read up to a lone `.`.
    fn edit_file(&mut self, file_id: &str, app: &str) -> Result<(), ApiError> {
        let (name, content) = match self.shell.store().read().file_by_id(file_id) {
            Some(file) => (file.name.clone(), file.content.clone()),
            None => return Ok(()),
        };

        println!("[{}] {}", app, name);
        if !content.is_empty() {
            println!("{}", content);
        }
        println!("Enter new content; finish with a line containing only '.' (empty input keeps the file)");
        std::io::stdout().flush()?;

        let edited = read_until_dot(std::io::stdin().lock())?;
        if let Some(edited) = edited {
            self.shell
                .store()
                .write()
                .update_file_content(file_id, &edited)?;
            println!("Saved {} ({}B)", name, edited.len());
        }
        Ok(())
    }
}

/// Collect lines until a lone `.`; `None` when nothing was entered.
fn read_until_dot(input: impl BufRead) -> Result<Option<String>, ApiError> {
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line == "." {
            break;
        }
        lines.push(line);
    }
    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines.join("\n")))
    }
}
