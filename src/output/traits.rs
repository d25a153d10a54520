//! Output types and the renderer interface
//!
//! Every mode hands its rows to a [`Renderer`] as a [`ResultSet`]: a fixed
//! header followed by data rows of the same width.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Header-first table of string rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultSet {
    /// Creates an empty result set with the given column names
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a data row; it must have one field per header column
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        debug_assert_eq!(row.len(), self.header.len(), "row width must match header");
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, without the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header followed by every data row
    pub fn lines(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

/// Trait for output renderers
///
/// Renderers do not care which mode produced the rows.
pub trait Renderer {
    /// Renders a complete result set
    fn render(&self, results: &ResultSet) -> OutputResult<()>;
}
