//! Built-in command table and handlers.

use super::output::{ListingEntry, OutputLine};
use super::{Shell, ShellSignal};
use crate::error::ShellError;
use crate::tree::node::{type_from_name, DEFAULT_FILE_TYPE};
use crate::tree::resolver::{base_name, Resolved};
use crate::types::NodeId;
use chrono::{DateTime, Local, Utc};

/// A tokenized command line
#[derive(Debug)]
pub struct Invocation<'a> {
    /// Lower-cased command name
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

impl<'a> Invocation<'a> {
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }
}

pub type Handler = fn(&mut Shell, &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError>;

/// Command table entry
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help [command] - Display help information for a specific command or list all commands",
        handler: help,
    },
    CommandSpec {
        name: "ls",
        usage: "ls [path] - List files and directories in the specified path or current directory",
        handler: list,
    },
    CommandSpec {
        name: "ll",
        usage: "ll [path] - List files and directories in the specified path or current directory with details",
        handler: list,
    },
    CommandSpec {
        name: "cd",
        usage: "cd [path] - Change the current directory to the specified path",
        handler: change_directory,
    },
    CommandSpec {
        name: "pwd",
        usage: "pwd - Print the current working directory",
        handler: print_working_directory,
    },
    CommandSpec {
        name: "nano",
        usage: "nano [file] - Edit the specified file",
        handler: edit,
    },
    CommandSpec {
        name: "edit",
        usage: "edit [file] - Edit the specified file (alias for nano)",
        handler: edit,
    },
    CommandSpec {
        name: "cat",
        usage: "cat [file] - Display the contents of the specified file",
        handler: cat,
    },
    CommandSpec {
        name: "rm",
        usage: "rm [path] - Remove the specified file or directory. Use -r or -rf for directories",
        handler: remove,
    },
    CommandSpec {
        name: "mkdir",
        usage: "mkdir [directory] - Create a new directory",
        handler: make_directory,
    },
    CommandSpec {
        name: "touch",
        usage: "touch [file] - Create a new empty file",
        handler: touch,
    },
    CommandSpec {
        name: "cp",
        usage: "cp [source] [destination] - Copy a file",
        handler: copy,
    },
    CommandSpec {
        name: "mv",
        usage: "mv [source] [destination] - Move a file",
        handler: move_file,
    },
    CommandSpec {
        name: "clear",
        usage: "clear - Clear the terminal screen",
        handler: clear,
    },
    CommandSpec {
        name: "echo",
        usage: "echo [text] - Display text on the terminal",
        handler: echo,
    },
    CommandSpec {
        name: "whoami",
        usage: "whoami - Display the current user",
        handler: whoami,
    },
    CommandSpec {
        name: "date",
        usage: "date - Display the current date and time",
        handler: date,
    },
    CommandSpec {
        name: "exit",
        usage: "exit - Close the terminal window",
        handler: exit,
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Command names in table order
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|spec| spec.name)
}

fn missing_operand(command: &str, what: &str) -> ShellError {
    ShellError::InvalidOperation(format!("{}: missing {}", command, what))
}

fn listing_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

fn help(_shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    match inv.arg(0) {
        Some(topic) => lookup(&topic.to_lowercase())
            .map(|spec| vec![OutputLine::normal(spec.usage)])
            .ok_or_else(|| ShellError::NotFound(format!("No help available for '{}'", topic))),
        None => Ok(vec![
            OutputLine::normal("Available commands:"),
            OutputLine::normal(command_names().collect::<Vec<_>>().join(", ")),
            OutputLine::normal(
                "Type 'help [command]' for more information on a specific command.",
            ),
        ]),
    }
}

fn list(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let target = match inv.arg(0) {
        None => shell.current_folder(),
        Some(path) => match shell.resolve(path) {
            Resolved::Folder(folder) => folder,
            Resolved::File(_) => return Ok(vec![OutputLine::normal(path)]),
            Resolved::NotFound => {
                return Err(ShellError::NotFound(format!(
                    "ls: cannot access '{}': No such file or directory",
                    path
                )))
            }
        },
    };

    let store = shell.store.read();
    let folders = store.folders_in_folder(target.as_deref());
    let files = store.files_in_folder(target.as_deref());
    if folders.is_empty() && files.is_empty() {
        return Ok(vec![OutputLine::normal("")]);
    }

    if inv.name == "ll" {
        let user = &shell.session.user;
        let mut lines = Vec::with_capacity(folders.len() + files.len());
        for folder in folders {
            lines.push(OutputLine::Normal(format!(
                "drwxr-xr-x  {}  {}  {}/",
                user,
                listing_time(folder.updated_at),
                folder.name
            )));
        }
        for file in files {
            lines.push(OutputLine::Normal(format!(
                "-rw-r--r--  {}  {}  {}B  {}",
                user,
                listing_time(file.updated_at),
                file.size(),
                file.name
            )));
        }
        return Ok(lines);
    }

    let entries = folders
        .iter()
        .map(|f| ListingEntry::folder(f.name.as_str()))
        .chain(
            files
                .iter()
                .map(|f| ListingEntry::file(f.name.as_str(), f.file_type.as_str())),
        )
        .collect();
    Ok(vec![OutputLine::Listing(entries)])
}

fn change_directory(
    shell: &mut Shell,
    inv: &Invocation<'_>,
) -> Result<Vec<OutputLine>, ShellError> {
    let destination = match inv.arg(0) {
        None | Some("~") => None,
        Some("..") => {
            let store = shell.store.read();
            store
                .current_folder()
                .and_then(|id| store.folder_by_id(id))
                .and_then(|folder| folder.parent_id.clone())
        }
        Some(path) => match shell.resolve(path) {
            Resolved::Folder(folder) => folder,
            Resolved::File(_) => {
                return Err(ShellError::InvalidOperation(format!(
                    "cd: not a directory: {}",
                    path
                )))
            }
            Resolved::NotFound => {
                return Err(ShellError::NotFound(format!(
                    "cd: no such file or directory: {}",
                    path
                )))
            }
        },
    };
    shell.store.write().navigate_to_folder(destination);
    Ok(Vec::new())
}

fn print_working_directory(
    shell: &mut Shell,
    _inv: &Invocation<'_>,
) -> Result<Vec<OutputLine>, ShellError> {
    Ok(vec![OutputLine::Normal(shell.current_path())])
}

fn edit(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let path = inv
        .arg(0)
        .ok_or_else(|| missing_operand(inv.name, "file operand"))?;
    let app = shell.session.editor_app.clone();

    match shell.resolve(path) {
        Resolved::File(file_id) => {
            shell.signal(ShellSignal::OpenFile { file_id, app: app.clone() });
            Ok(vec![OutputLine::Normal(format!("Opening {} in {}...", path, app))])
        }
        Resolved::Folder(_) => Err(ShellError::InvalidOperation(format!(
            "{}: {} is a directory",
            inv.name, path
        ))),
        Resolved::NotFound => {
            let Some((parent, name)) = shell.creation_target(path, inv.name)? else {
                return Err(ShellError::NotFound(format!(
                    "{}: cannot create file '{}': No such directory",
                    inv.name, path
                )));
            };
            let file = shell.store.write().create_file(
                name,
                "",
                &type_from_name(name, DEFAULT_FILE_TYPE),
                parent.as_deref(),
            )?;
            shell.signal(ShellSignal::OpenFile {
                file_id: file.id,
                app: app.clone(),
            });
            Ok(vec![OutputLine::Normal(format!(
                "Created and opening {} in {}...",
                name, app
            ))])
        }
    }
}

fn cat(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let path = inv
        .arg(0)
        .ok_or_else(|| missing_operand("cat", "file operand"))?;
    match shell.resolve(path) {
        Resolved::File(id) => {
            let store = shell.store.read();
            let content = store
                .file_by_id(&id)
                .map(|f| f.content.clone())
                .unwrap_or_default();
            if content.is_empty() {
                Ok(vec![OutputLine::normal("(empty file)")])
            } else {
                Ok(vec![OutputLine::Normal(content)])
            }
        }
        Resolved::Folder(_) => Err(ShellError::InvalidOperation(format!(
            "cat: {}: Is a directory",
            path
        ))),
        Resolved::NotFound => Err(ShellError::NotFound(format!(
            "cat: {}: No such file or directory",
            path
        ))),
    }
}

fn remove(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let mut recursive = false;
    let mut operands = Vec::new();
    for arg in &inv.args {
        if arg.len() > 1 && arg.starts_with('-') {
            match *arg {
                "-r" | "-R" | "-rf" | "-fr" | "-Rf" | "-fR" => recursive = true,
                "-f" => {}
                other => {
                    return Err(ShellError::InvalidOperation(format!(
                        "rm: invalid option '{}'",
                        other
                    )))
                }
            }
        } else {
            operands.push(*arg);
        }
    }
    let path = operands
        .first()
        .copied()
        .ok_or_else(|| missing_operand("rm", "operand"))?;

    match shell.resolve(path) {
        Resolved::File(id) => {
            shell.store.write().delete_file(&id)?;
            Ok(vec![OutputLine::Normal(format!("Removed file: {}", path))])
        }
        Resolved::Folder(None) => Err(ShellError::InvalidOperation(format!(
            "rm: refusing to remove '{}': root directory",
            path
        ))),
        Resolved::Folder(Some(id)) => {
            if !recursive {
                return Err(ShellError::InvalidOperation(format!(
                    "rm: cannot remove '{}': Is a directory. Use -r flag for directories.",
                    path
                )));
            }
            shell.store.write().delete_folder(&id)?;
            Ok(vec![OutputLine::Normal(format!("Removed directory: {}", path))])
        }
        Resolved::NotFound => Err(ShellError::NotFound(format!(
            "rm: cannot remove '{}': No such file or directory",
            path
        ))),
    }
}

fn make_directory(
    shell: &mut Shell,
    inv: &Invocation<'_>,
) -> Result<Vec<OutputLine>, ShellError> {
    let path = inv
        .arg(0)
        .ok_or_else(|| missing_operand("mkdir", "operand"))?;
    if shell.resolve(path).is_found() {
        return Err(ShellError::AlreadyExists(format!(
            "mkdir: cannot create directory '{}': File exists",
            path
        )));
    }
    let Some((parent, name)) = shell.creation_target(path, "mkdir")? else {
        return Err(ShellError::NotFound(format!(
            "mkdir: cannot create directory '{}': No such file or directory",
            path
        )));
    };
    shell.store.write().create_folder(name, parent.as_deref())?;
    Ok(vec![OutputLine::Normal(format!("Created directory: {}", path))])
}

fn touch(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let path = inv
        .arg(0)
        .ok_or_else(|| missing_operand("touch", "file operand"))?;
    match shell.resolve(path) {
        Resolved::File(id) => {
            shell.store.write().touch_file(&id)?;
            Ok(vec![OutputLine::Normal(format!("Updated timestamp: {}", path))])
        }
        Resolved::Folder(_) => Err(ShellError::InvalidOperation(format!(
            "touch: cannot touch '{}': Is a directory",
            path
        ))),
        Resolved::NotFound => {
            let Some((parent, name)) = shell.creation_target(path, "touch")? else {
                return Err(ShellError::NotFound(format!(
                    "touch: cannot touch '{}': No such file or directory",
                    path
                )));
            };
            shell.store.write().create_file(
                name,
                "",
                &type_from_name(name, DEFAULT_FILE_TYPE),
                parent.as_deref(),
            )?;
            Ok(vec![OutputLine::Normal(format!("Created file: {}", path))])
        }
    }
}

/// Where a copy landed
struct CopyOutcome {
    source_id: NodeId,
    destination: String,
    overwritten: bool,
}

/// Copy the file at `source` to `destination`; shared by `cp` and `mv`.
fn copy_file(
    shell: &mut Shell,
    command: &str,
    source: &str,
    destination: &str,
) -> Result<CopyOutcome, ShellError> {
    let source_id = match shell.resolve(source) {
        Resolved::File(id) => id,
        Resolved::Folder(_) => {
            let noun = if command == "mv" { "moving" } else { "copying" };
            return Err(ShellError::NotImplemented(format!(
                "{}: omitting directory '{}'. Directory {} not implemented.",
                command, source, noun
            )));
        }
        Resolved::NotFound => {
            return Err(ShellError::NotFound(format!(
                "{}: cannot stat '{}': No such file or directory",
                command, source
            )))
        }
    };
    let (content, source_type) = {
        let store = shell.store.read();
        let file = store.file_by_id(&source_id).ok_or_else(|| {
            ShellError::NotFound(format!(
                "{}: cannot stat '{}': No such file or directory",
                command, source
            ))
        })?;
        (file.content.clone(), file.file_type.clone())
    };
    let same_file = |label: &str| {
        ShellError::InvalidOperation(format!(
            "{}: '{}' and '{}' are the same file",
            command, source, label
        ))
    };

    match shell.resolve(destination) {
        Resolved::Folder(folder) => {
            let name = base_name(source);
            let label = format!(
                "{}/{}",
                destination.trim_end_matches(|c: char| c == '/' || c == '\\'),
                name
            );
            let mut store = shell.store.write();
            if store
                .folders_in_folder(folder.as_deref())
                .iter()
                .any(|f| f.name == name)
            {
                return Err(ShellError::AlreadyExists(format!(
                    "{}: cannot overwrite directory '{}' with non-directory",
                    command, label
                )));
            }
            let existing = store
                .files_in_folder(folder.as_deref())
                .into_iter()
                .find(|f| f.name == name)
                .map(|f| f.id.clone());
            match existing {
                Some(id) if id == source_id => Err(same_file(&label)),
                Some(id) => {
                    store.update_file_content(&id, &content)?;
                    Ok(CopyOutcome {
                        source_id,
                        destination: label,
                        overwritten: true,
                    })
                }
                None => {
                    store.create_file(name, &content, &source_type, folder.as_deref())?;
                    Ok(CopyOutcome {
                        source_id,
                        destination: label,
                        overwritten: false,
                    })
                }
            }
        }
        Resolved::File(id) if id == source_id => Err(same_file(destination)),
        Resolved::File(id) => {
            shell.store.write().update_file_content(&id, &content)?;
            Ok(CopyOutcome {
                source_id,
                destination: destination.to_string(),
                overwritten: true,
            })
        }
        Resolved::NotFound => {
            let Some((parent, name)) = shell.creation_target(destination, command)? else {
                return Err(ShellError::NotFound(format!(
                    "{}: cannot create file '{}': No such directory",
                    command, destination
                )));
            };
            shell.store.write().create_file(
                name,
                &content,
                &type_from_name(name, &source_type),
                parent.as_deref(),
            )?;
            Ok(CopyOutcome {
                source_id,
                destination: destination.to_string(),
                overwritten: false,
            })
        }
    }
}

fn copy_operands<'a>(
    command: &str,
    inv: &Invocation<'a>,
) -> Result<(&'a str, &'a str), ShellError> {
    match (inv.arg(0), inv.arg(1)) {
        (Some(source), Some(destination)) => Ok((source, destination)),
        _ => Err(ShellError::InvalidOperation(format!(
            "{0}: missing file operand. Usage: {0} [source] [destination]",
            command
        ))),
    }
}

fn copy(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let (source, destination) = copy_operands("cp", inv)?;
    let outcome = copy_file(shell, "cp", source, destination)?;
    let suffix = if outcome.overwritten { " (overwritten)" } else { "" };
    Ok(vec![OutputLine::Normal(format!(
        "Copied file: {} -> {}{}",
        source, outcome.destination, suffix
    ))])
}

/// Copy then delete the source; the source survives any failed copy.
fn move_file(shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    let (source, destination) = copy_operands("mv", inv)?;
    let outcome = copy_file(shell, "mv", source, destination)?;
    shell.store.write().delete_file(&outcome.source_id)?;
    Ok(vec![OutputLine::Normal(format!(
        "Moved file: {} -> {}",
        source, outcome.destination
    ))])
}

fn clear(shell: &mut Shell, _inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    shell.output.clear();
    shell.cleared = true;
    Ok(Vec::new())
}

fn echo(_shell: &mut Shell, inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    Ok(vec![OutputLine::Normal(inv.args.join(" "))])
}

fn whoami(shell: &mut Shell, _inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    Ok(vec![OutputLine::Normal(shell.session.user.clone())])
}

fn date(_shell: &mut Shell, _inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    Ok(vec![OutputLine::Normal(
        Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string(),
    )])
}

fn exit(shell: &mut Shell, _inv: &Invocation<'_>) -> Result<Vec<OutputLine>, ShellError> {
    shell.exited = true;
    shell.signal(ShellSignal::CloseWindow {
        after: shell.session.exit_delay(),
    });
    Ok(vec![OutputLine::normal("Exiting terminal...")])
}
