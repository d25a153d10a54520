//! Output module for rendering extraction results
//!
//! This module handles:
//! - Printing result sets to the console, plain or as a table
//! - Persisting result sets as CSV files

mod console;
mod csv_output;
mod traits;

pub use console::{format_plain, format_pretty, ConsoleRenderer};
pub use csv_output::{write_csv, CsvFileRenderer, FILE_TIMESTAMP_FORMAT};
pub use traits::{OutputError, OutputResult, Renderer, ResultSet};

use crate::config::OutputConfig;

/// How a result set is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Space-separated lines on stdout
    #[default]
    Plain,
    /// Bordered table on stdout
    Pretty,
    /// CSV file under the results directory
    File,
}

/// Picks the renderer for an output mode
///
/// `mode_name` names result files, e.g. `pep_2024-03-09_14-05-07.csv`.
pub fn renderer_for(mode: OutputMode, config: &OutputConfig, mode_name: &str) -> Box<dyn Renderer> {
    match mode {
        OutputMode::Plain => Box::new(ConsoleRenderer::plain()),
        OutputMode::Pretty => Box::new(ConsoleRenderer::pretty()),
        OutputMode::File => Box::new(CsvFileRenderer::new(&config.results_dir, mode_name)),
    }
}

/// Renders `results` in the requested mode
pub fn control_output(
    results: &ResultSet,
    mode: OutputMode,
    config: &OutputConfig,
    mode_name: &str,
) -> OutputResult<()> {
    renderer_for(mode, config, mode_name).render(results)
}
