//! Tab completion of command names and paths.

use crate::shell::commands;
use crate::store::NodeStore;
use crate::tree::resolver::{resolve_path, Resolved};

/// Result of completing an input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    NoMatch,
    /// Exactly one candidate; the full replacement line
    Complete(String),
    /// Several candidates; nothing is applied
    Candidates(Vec<String>),
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Complete `line` against the command table or the store's current folder.
///
/// A lone token completes as a command name. Otherwise the last token
/// completes as a path: its directory part is resolved and the children whose
/// names start with the final segment are matched, folders first.
pub fn complete_line(store: &NodeStore, line: &str, root_label: &str) -> Completion {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Completion::NoMatch;
    }
    let ends_with_space = line.ends_with(char::is_whitespace);

    if tokens.len() == 1 && !ends_with_space {
        let matches: Vec<&str> = commands::command_names()
            .filter(|name| name.starts_with(tokens[0]))
            .collect();
        return match matches.as_slice() {
            [] => Completion::NoMatch,
            [single] => Completion::Complete(single.to_string()),
            _ => Completion::Candidates(matches.iter().map(|m| m.to_string()).collect()),
        };
    }

    let (head, last) = if ends_with_space {
        (line, "")
    } else {
        let trimmed = line.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        (&trimmed[..start], &trimmed[start..])
    };

    let (dir_part, leaf) = match last.rfind(is_separator) {
        Some(index) => (&last[..=index], &last[index + 1..]),
        None => ("", last),
    };

    let folder = if dir_part.is_empty() {
        store.current_folder().map(str::to_string)
    } else {
        match resolve_path(store, store.current_folder(), dir_part, root_label) {
            Resolved::Folder(folder) => folder,
            _ => return Completion::NoMatch,
        }
    };

    let mut matches: Vec<String> = store
        .folders_in_folder(folder.as_deref())
        .into_iter()
        .filter(|f| f.name.starts_with(leaf))
        .map(|f| f.name.clone())
        .collect();
    matches.extend(
        store
            .files_in_folder(folder.as_deref())
            .into_iter()
            .filter(|f| f.name.starts_with(leaf))
            .map(|f| f.name.clone()),
    );

    match matches.len() {
        0 => Completion::NoMatch,
        1 => Completion::Complete(format!("{}{}{}", head, dir_part, matches[0])),
        _ => Completion::Candidates(matches),
    }
}
