//! CSV file output
//!
//! Files are written with every field quoted and `\n` line endings, named
//! after the mode and the time the run finished.

use crate::output::traits::{OutputResult, Renderer, ResultSet};
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};

/// Format of the timestamp embedded in result file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Writes result sets to timestamped CSV files
#[derive(Debug, Clone)]
pub struct CsvFileRenderer {
    results_dir: PathBuf,
    mode_name: String,
}

impl CsvFileRenderer {
    pub fn new(results_dir: impl Into<PathBuf>, mode_name: &str) -> Self {
        Self {
            results_dir: results_dir.into(),
            mode_name: mode_name.to_string(),
        }
    }

    /// Path the renderer would use for a run finishing at `now`
    pub fn file_path(&self, now: DateTime<Local>) -> PathBuf {
        let file_name = format!(
            "{}_{}.csv",
            self.mode_name,
            now.format(FILE_TIMESTAMP_FORMAT)
        );
        self.results_dir.join(file_name)
    }
}

impl Renderer for CsvFileRenderer {
    fn render(&self, results: &ResultSet) -> OutputResult<()> {
        std::fs::create_dir_all(&self.results_dir)?;
        let path = self.file_path(Local::now());
        write_csv(results, &path)?;
        tracing::info!("Results saved to {}", path.display());
        Ok(())
    }
}

/// Writes the header and rows of `results` to `path`
pub fn write_csv(results: &ResultSet, path: &Path) -> OutputResult<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;

    for line in results.lines() {
        writer.write_record(line)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_quotes_every_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pep.csv");

        let mut results = ResultSet::new(["Status", "Count"]);
        results.push(["A", "2"]);
        results.push(["Totals", "2"]);
        write_csv(&results, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "\"Status\",\"Count\"\n\"A\",\"2\"\n\"Totals\",\"2\"\n"
        );
    }

    #[test]
    fn test_file_path_uses_mode_and_timestamp() {
        let renderer = CsvFileRenderer::new("/tmp/results", "latest-versions");
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            renderer.file_path(now),
            PathBuf::from("/tmp/results/latest-versions_2024-03-09_14-05-07.csv")
        );
    }

    #[test]
    fn test_render_creates_directory() {
        let dir = TempDir::new().unwrap();
        let results_dir = dir.path().join("results");
        let renderer = CsvFileRenderer::new(&results_dir, "whats-new");

        let mut results = ResultSet::new(["Article link", "Title", "Editor, author"]);
        results.push(["https://docs.python.org/3/whatsnew/3.12.html", "What's New", "Editor: A"]);
        renderer.render(&results).unwrap();

        let files: Vec<_> = std::fs::read_dir(&results_dir).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
