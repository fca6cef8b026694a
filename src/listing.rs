//! Listing - Column-aligned text reports of backups

use crate::{Backup, Config, GameSave, Result};
use std::fs;

/// Placeholder rendered for a missing value in an included column
const MISSING_VALUE: &str = "-------";

/// Default symmetric padding inside the verbose list-all box
const DEFAULT_BOX_PADDING: usize = 2;

/// Which columns and extras a listing should include
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    pub verbose: bool,
    pub include_path: bool,
    pub include_message: bool,
}

/// One column of the report: label plus an optional value per row
struct Column {
    label: &'static str,
    values: Vec<Option<String>>,
    width: usize,
}

impl Column {
    fn new(label: &'static str, values: Vec<Option<String>>) -> Self {
        let width = values
            .iter()
            .flatten()
            .map(|v| v.len())
            .chain(std::iter::once(label.len()))
            .max()
            .unwrap_or(0);
        Self {
            label,
            values,
            width,
        }
    }

    fn centered_label(&self) -> String {
        center(self.label, self.width)
    }

    fn cell(&self, row: usize) -> String {
        match &self.values[row] {
            Some(value) => format!("{:<width$}", value, width = self.width),
            None => center(MISSING_VALUE, self.width),
        }
    }
}

/// Render the backup table for one save
///
/// Rows are ordered by backup number. With no backups the report is
/// empty, or a single "has no backups" line in verbose mode.
pub fn render_table(save_name: &str, backups: &[Backup], options: &ListingOptions) -> String {
    if backups.is_empty() {
        if options.verbose {
            return format!("{} has no backups.", save_name);
        }
        return String::new();
    }

    let mut backups: Vec<&Backup> = backups.iter().collect();
    backups.sort();

    let mut columns = vec![Column::new(
        "Number",
        backups.iter().map(|b| Some(b.number.to_string())).collect(),
    )];
    if options.include_path {
        columns.push(Column::new(
            "Path_to_Directory",
            backups
                .iter()
                .map(|b| Some(format!("\"{}\"", b.dir.display())))
                .collect(),
        ));
    }
    if options.include_message {
        columns.push(Column::new(
            "Message",
            backups.iter().map(|b| b.message.clone()).collect(),
        ));
    }

    let mut lines = Vec::with_capacity(backups.len() + 2);

    let header = columns
        .iter()
        .map(Column::centered_label)
        .collect::<Vec<_>>()
        .join("    ");
    let divider = "-".repeat(header.len());
    lines.push(header);
    lines.push(divider);

    for row in 0..backups.len() {
        let cells: Vec<String> = columns.iter().map(|c| c.cell(row)).collect();
        lines.push(cells.join("    "));
    }

    lines.join("\n")
}

/// Render the report for every save under the shared backup root
///
/// Each save contributes a one-line summary; in verbose mode its full
/// listing follows, and the whole output is framed in a bordered box
/// sized to the longest line plus symmetric padding.
pub fn list_all(config: &Config, options: &ListingOptions, padding: Option<usize>) -> Result<String> {
    let padding = padding.unwrap_or(DEFAULT_BOX_PADDING);
    let root = config.backup_root_directory()?;

    let mut names = Vec::new();
    for entry in fs::read_dir(&root)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    let mut sections = Vec::new();
    for name in &names {
        let save = GameSave::new(name, config)?;
        let mut lines = vec![format!("{} has {} backups", save.name, save.backups().len())];
        if options.verbose {
            let listing = save.get_listing(options)?;
            lines.extend(listing.lines().map(String::from));
        }
        sections.push(lines);
    }

    if !options.verbose {
        let summaries: Vec<&str> = sections.iter().map(|s| s[0].as_str()).collect();
        return Ok(summaries.join("\n"));
    }

    Ok(render_boxed(&sections, padding))
}

/// Frame verbose sections in the ASCII box
fn render_boxed(sections: &[Vec<String>], padding: usize) -> String {
    let pad = " ".repeat(padding);
    let width = sections
        .iter()
        .flatten()
        .map(|line| line.len())
        .max()
        .unwrap_or(0)
        + padding * 2;

    let border = format!("*{}*", "*".repeat(width));
    let blank = format!("*{}*", " ".repeat(width));
    let rule = format!("*{}*", ".".repeat(width));

    let mut out = vec![border.clone()];
    for section in sections {
        out.push(blank.clone());
        out.push(format!("*{}*", center(&section[0], width)));
        out.push(rule.clone());
        out.push(blank.clone());
        for line in &section[1..] {
            out.push(format!(
                "*{:<width$}*",
                format!("{}{}", pad, line),
                width = width
            ));
        }
        out.push(blank.clone());
        out.push(border.clone());
    }
    out.join("\n")
}

/// Center a string in a field, extra space going to the right
fn center(s: &str, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    let margin = width - s.len();
    let left = margin / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(margin - left))
}
