//! End-to-end interpreter sessions over a seeded in-memory store

use talos::config::SessionConfig;
use talos::error::ShellError;
use talos::shell::{OutputLine, Shell, ShellSignal, SignalQueue};
use talos::store::seed::TODO_CONTENT;
use talos::store::{NodeStore, StoreHandle};
use std::time::Duration;

fn session() -> (Shell, SignalQueue) {
    let signals = SignalQueue::new();
    let shell = Shell::new(
        StoreHandle::new(NodeStore::in_memory()),
        SessionConfig::default(),
        Box::new(signals.clone()),
    );
    (shell, signals)
}

fn texts(lines: &[OutputLine]) -> Vec<String> {
    lines.iter().map(OutputLine::text).collect()
}

#[test]
fn test_navigate_and_read() {
    let (mut shell, _) = session();

    assert!(shell.execute("cd Documents").lines.is_empty());
    assert_eq!(texts(&shell.execute("pwd").lines), vec!["C:\\Documents\\"]);
    assert_eq!(texts(&shell.execute("cat todo.txt").lines), vec![TODO_CONTENT]);

    shell.execute("cd ..");
    assert_eq!(texts(&shell.execute("pwd").lines), vec!["C:\\"]);
}

#[test]
fn test_prompt_echo_is_logged() {
    let (mut shell, _) = session();
    shell.execute("cd Documents");
    shell.execute("whoami");

    let prompts: Vec<String> = shell
        .output()
        .iter()
        .filter(|line| matches!(line, OutputLine::Prompt(_)))
        .map(OutputLine::text)
        .collect();
    assert_eq!(
        prompts,
        vec![
            "admin@talos:C:\\$ cd Documents",
            "admin@talos:C:\\Documents\\$ whoami",
        ]
    );
}

#[test]
fn test_double_mkdir_reports_existing() {
    let (mut shell, _) = session();

    let first = shell.execute("mkdir projects");
    assert!(first.error.is_none());
    assert_eq!(texts(&first.lines), vec!["Created directory: projects"]);

    let second = shell.execute("mkdir projects");
    assert!(matches!(second.error, Some(ShellError::AlreadyExists(_))));
    assert_eq!(
        texts(&second.lines),
        vec!["mkdir: cannot create directory 'projects': File exists"]
    );

    let store = shell.store().read();
    let named_projects = store
        .folders_in_folder(None)
        .into_iter()
        .filter(|f| f.name == "projects")
        .count();
    assert_eq!(named_projects, 1);
}

#[test]
fn test_touch_then_move_into_folder() {
    let (mut shell, _) = session();
    shell.execute("mkdir sub");
    shell.execute("touch a.txt");

    let moved = shell.execute("mv a.txt sub/a.txt");
    assert!(moved.error.is_none());
    assert_eq!(texts(&moved.lines), vec!["Moved file: a.txt -> sub/a.txt"]);

    assert!(shell.execute("cat a.txt").error.is_some());
    assert_eq!(texts(&shell.execute("cat sub/a.txt").lines), vec!["(empty file)"]);
}

#[test]
fn test_rm_folder_requires_recursive_flag() {
    let (mut shell, _) = session();
    shell.execute("mkdir sub");
    shell.execute("touch sub/inner.txt");

    let refused = shell.execute("rm sub");
    assert!(matches!(refused.error, Some(ShellError::InvalidOperation(_))));
    assert!(shell.execute("cat sub/inner.txt").error.is_none());

    let removed = shell.execute("rm sub -r");
    assert_eq!(texts(&removed.lines), vec!["Removed directory: sub"]);
    assert!(matches!(
        shell.execute("cat sub/inner.txt").error,
        Some(ShellError::NotFound(_))
    ));
}

#[test]
fn test_rm_rejects_unknown_flag() {
    let (mut shell, _) = session();
    let result = shell.execute("rm -x README.txt");
    assert!(matches!(result.error, Some(ShellError::InvalidOperation(_))));
    assert!(shell.execute("cat README.txt").error.is_none());
}

#[test]
fn test_ls_lists_folders_before_files() {
    let (mut shell, _) = session();
    let listing = shell.execute("ls");
    assert_eq!(texts(&listing.lines), vec!["Documents/  Pictures/  README.txt"]);

    let empty = shell.execute("ls Pictures");
    assert_eq!(texts(&empty.lines), vec![""]);
}

#[test]
fn test_ll_prints_one_line_per_entry() {
    let (mut shell, _) = session();
    let lines = texts(&shell.execute("ll Documents").lines);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("-rw-r--r--  admin  "));
    assert!(lines[0].ends_with(&format!("{}B  todo.txt", TODO_CONTENT.len())));
}

#[test]
fn test_copy_into_folder_then_overwrite() {
    let (mut shell, _) = session();
    let first = shell.execute("cp README.txt Documents");
    assert_eq!(
        texts(&first.lines),
        vec!["Copied file: README.txt -> Documents/README.txt"]
    );

    shell.execute("cd Documents");
    let second = shell.execute("cp todo.txt README.txt");
    assert_eq!(
        texts(&second.lines),
        vec!["Copied file: todo.txt -> README.txt (overwritten)"]
    );
    assert_eq!(texts(&shell.execute("cat README.txt").lines), vec![TODO_CONTENT]);
}

#[test]
fn test_copy_onto_itself_is_rejected() {
    let (mut shell, _) = session();
    let result = shell.execute("mv README.txt README.txt");
    assert!(matches!(result.error, Some(ShellError::InvalidOperation(_))));
    assert!(shell.execute("cat README.txt").error.is_none());
}

#[test]
fn test_failed_move_keeps_source() {
    let (mut shell, _) = session();
    let result = shell.execute("mv README.txt missing/README.txt");
    assert!(matches!(result.error, Some(ShellError::NotFound(_))));
    assert!(shell.execute("cat README.txt").error.is_none());
}

#[test]
fn test_moving_folder_not_implemented() {
    let (mut shell, _) = session();
    let result = shell.execute("mv Documents Pictures");
    assert!(matches!(result.error, Some(ShellError::NotImplemented(_))));
}

#[test]
fn test_nano_creates_missing_file_and_signals() {
    let (mut shell, signals) = session();
    let result = shell.execute("nano notes.md");
    assert_eq!(
        texts(&result.lines),
        vec!["Created and opening notes.md in notepad..."]
    );

    let created = shell
        .store()
        .read()
        .files_in_folder(None)
        .into_iter()
        .find(|f| f.name == "notes.md")
        .cloned()
        .unwrap();
    assert_eq!(created.file_type, "md");
    assert_eq!(
        signals.drain(),
        vec![ShellSignal::OpenFile {
            file_id: created.id,
            app: "notepad".to_string()
        }]
    );
}

#[test]
fn test_exit_requests_close_after_delay() {
    let (mut shell, signals) = session();
    let result = shell.execute("exit");
    assert_eq!(texts(&result.lines), vec!["Exiting terminal..."]);
    assert!(shell.is_exited());
    assert_eq!(
        signals.drain(),
        vec![ShellSignal::CloseWindow {
            after: Duration::from_millis(500)
        }]
    );
}

#[test]
fn test_clear_empties_log() {
    let (mut shell, _) = session();
    shell.execute("echo hello world");
    let result = shell.execute("clear");
    assert!(result.cleared);
    assert!(shell.output().is_empty());
}

#[test]
fn test_unknown_command_keeps_session_alive() {
    let (mut shell, _) = session();
    let result = shell.execute("frobnicate now");
    assert_eq!(
        texts(&result.lines),
        vec!["Command not found: frobnicate. Type 'help' for a list of commands."]
    );
    assert_eq!(texts(&shell.execute("ECHO ok").lines), vec!["ok"]);
}

#[test]
fn test_history_recall_across_commands() {
    let (mut shell, _) = session();
    shell.execute("pwd");
    shell.execute("whoami");

    assert_eq!(shell.history_previous(), Some("whoami"));
    assert_eq!(shell.history_previous(), Some("pwd"));
    assert_eq!(shell.history_next(), Some("whoami"));
    assert_eq!(shell.history_next(), Some(""));
}

#[test]
fn test_tab_lists_candidates_in_log() {
    let (mut shell, _) = session();
    assert_eq!(shell.tab("cat Doc"), "cat Documents");
    assert_eq!(shell.tab("c"), "c");
    assert_eq!(
        shell.output().last().map(OutputLine::text),
        Some("cd  cat  cp  clear".to_string())
    );
}
