//! Command history with previous/next recall.

/// Append-only history plus a recall cursor.
///
/// The cursor counts steps back from the newest entry; `None` means the user
/// is editing a fresh line.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an executed line and reset recall.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step to the next older entry; `None` when already at the oldest.
    pub fn previous(&mut self) -> Option<&str> {
        let step = self.cursor.map_or(0, |c| c + 1);
        if step >= self.entries.len() {
            return None;
        }
        self.cursor = Some(step);
        Some(&self.entries[self.entries.len() - 1 - step])
    }

    /// Step to the next newer entry. Stepping past the newest yields an empty
    /// line; `None` when not recalling.
    pub fn next(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some("")
            }
            Some(step) => {
                self.cursor = Some(step - 1);
                Some(&self.entries[self.entries.len() - step])
            }
        }
    }
}
