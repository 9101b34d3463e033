//! Interpreter output lines.
//!
//! Lines carry semantic content only. Listings keep their entries structured so
//! a front-end can tint them; `to_markup` produces the escaped HTML fragment the
//! web shell renders, and the terminal renderer maps the same tints to ANSI.

use crate::tree::node::NodeKind;
use serde::Serialize;

/// Tag a line is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Prompt,
    Normal,
    Error,
    Markup,
}

/// Semantic color class of a listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Folder,
    Text,
    Script,
    Data,
    Markdown,
    Stylesheet,
    Document,
    Plain,
}

impl Tint {
    pub fn for_file_type(file_type: &str) -> Self {
        match file_type {
            "txt" => Tint::Text,
            "js" | "jsx" | "ts" | "tsx" => Tint::Script,
            "json" => Tint::Data,
            "md" => Tint::Markdown,
            "css" => Tint::Stylesheet,
            "html" => Tint::Document,
            _ => Tint::Plain,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Tint::Folder => "text-blue-500",
            Tint::Text => "text-green-500",
            Tint::Script => "text-yellow-500",
            Tint::Data => "text-purple-500",
            Tint::Markdown => "text-blue-300",
            Tint::Stylesheet => "text-pink-500",
            Tint::Document => "text-orange-500",
            Tint::Plain => "text-white",
        }
    }
}

/// One entry of a short directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl ListingEntry {
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            file_type: None,
        }
    }

    pub fn file(name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            file_type: Some(file_type.into()),
        }
    }

    pub fn tint(&self) -> Tint {
        match (&self.kind, &self.file_type) {
            (NodeKind::Folder, _) => Tint::Folder,
            (NodeKind::File, Some(t)) => Tint::for_file_type(t),
            (NodeKind::File, None) => Tint::Plain,
        }
    }

    /// Display label; folders carry a trailing `/`
    pub fn label(&self) -> String {
        match self.kind {
            NodeKind::Folder => format!("{}/", self.name),
            NodeKind::File => self.name.clone(),
        }
    }
}

/// A single line in the interpreter's output log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum OutputLine {
    /// Echo of an accepted command, prefixed with the prompt
    Prompt(String),
    Normal(String),
    Error(String),
    #[serde(rename = "markup")]
    Listing(Vec<ListingEntry>),
}

impl OutputLine {
    pub fn normal(text: impl Into<String>) -> Self {
        OutputLine::Normal(text.into())
    }

    pub fn kind(&self) -> LineKind {
        match self {
            OutputLine::Prompt(_) => LineKind::Prompt,
            OutputLine::Normal(_) => LineKind::Normal,
            OutputLine::Error(_) => LineKind::Error,
            OutputLine::Listing(_) => LineKind::Markup,
        }
    }

    /// Plain-text rendering with no styling
    pub fn text(&self) -> String {
        match self {
            OutputLine::Prompt(text) | OutputLine::Normal(text) | OutputLine::Error(text) => {
                text.clone()
            }
            OutputLine::Listing(entries) => entries
                .iter()
                .map(ListingEntry::label)
                .collect::<Vec<_>>()
                .join("  "),
        }
    }

    /// HTML fragment for the web shell; all user-controlled text is escaped.
    pub fn to_markup(&self) -> String {
        match self {
            OutputLine::Listing(entries) => entries
                .iter()
                .map(|entry| {
                    format!(
                        "<span class=\"{}\">{}</span>",
                        entry.tint().css_class(),
                        escape_markup(&entry.label())
                    )
                })
                .collect::<Vec<_>>()
                .join("  "),
            other => escape_markup(&other.text()),
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
