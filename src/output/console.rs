//! Console rendering
//!
//! Two layouts: plain space-separated lines, and a bordered table with
//! columns padded to their widest cell.

use crate::output::traits::{OutputResult, Renderer, ResultSet};
use std::io::Write;

/// Prints result sets to stdout
#[derive(Debug, Clone, Copy)]
pub struct ConsoleRenderer {
    pretty: bool,
}

impl ConsoleRenderer {
    pub fn plain() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    fn format(&self, results: &ResultSet) -> String {
        if self.pretty {
            format_pretty(results)
        } else {
            format_plain(results)
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&self, results: &ResultSet) -> OutputResult<()> {
        let text = self.format(results);
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Formats each row as its fields joined by single spaces
pub fn format_plain(results: &ResultSet) -> String {
    let mut out = String::new();
    for line in results.lines() {
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Formats the result set as a bordered, left-aligned table
///
/// # Example
///
/// ```
/// use docs_parser::output::{format_pretty, ResultSet};
///
/// let mut results = ResultSet::new(["Status", "Count"]);
/// results.push(["A", "12"]);
/// assert_eq!(
///     format_pretty(&results),
///     "+--------+-------+\n| Status | Count |\n+--------+-------+\n| A      | 12    |\n+--------+-------+\n"
/// );
/// ```
pub fn format_pretty(results: &ResultSet) -> String {
    let mut widths: Vec<usize> = results.header().iter().map(|h| h.chars().count()).collect();
    for row in results.rows() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = {
        let mut rule = String::from("+");
        for width in &widths {
            rule.push_str(&"-".repeat(width + 2));
            rule.push('+');
        }
        rule.push('\n');
        rule
    };

    let format_line = |cells: &[String]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let padding = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&format_line(results.header()));
    out.push_str(&rule);
    for row in results.rows() {
        out.push_str(&format_line(row));
    }
    if !results.is_empty() {
        out.push_str(&rule);
    }
    out
}
