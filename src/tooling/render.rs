//! Render interpreter output lines for a terminal.

use crate::shell::{ListingEntry, OutputLine, Tint};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render one output line; `color` selects ANSI styling.
pub fn render_line(line: &OutputLine, color: bool) -> String {
    if !color {
        return line.text();
    }
    match line {
        OutputLine::Prompt(text) => format!("{}", text.bold()),
        OutputLine::Normal(text) => text.clone(),
        OutputLine::Error(text) => format!("{}", text.red()),
        OutputLine::Listing(entries) => entries
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("  "),
    }
}

fn render_entry(entry: &ListingEntry) -> String {
    let label = entry.label();
    match entry.tint() {
        Tint::Folder => format!("{}", label.blue()),
        Tint::Text => format!("{}", label.green()),
        Tint::Script => format!("{}", label.yellow()),
        Tint::Data => format!("{}", label.purple()),
        Tint::Markdown => format!("{}", label.bright_blue()),
        Tint::Stylesheet => format!("{}", label.magenta()),
        Tint::Document => format!("{}", label.bright_red()),
        Tint::Plain => label,
    }
}

/// Render a sequence of lines, one per terminal row.
pub fn render_lines(lines: &[OutputLine], color: bool) -> String {
    lines
        .iter()
        .map(|line| render_line(line, color))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-column key/value table.
pub fn key_value_table(header: [&str; 2], rows: Vec<(String, String)>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header.to_vec());
    for (key, value) in rows {
        table.add_row(vec![key, value]);
    }
    table.to_string()
}
