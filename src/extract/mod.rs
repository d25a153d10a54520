//! Page extractors and the PEP status cross-validator
//!
//! Each mode starts from one top-level page. If that page cannot be fetched
//! the mode logs the fact and returns `Ok(None)`; structural lookup failures
//! are returned as errors.

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

pub use download::{download, find_archive_url, ARCHIVE_HREF_PATTERN};
pub use latest_versions::{latest_versions, parse_versions, VERSION_LIST_MARKER};
pub use pep::{
    parse_pep_index, pep, read_pep_status, validate, Discrepancy, IndexEntry, StatusTally,
    ValidationReport, STATUS_VALUE_SIBLING_HOPS,
};
pub use whats_new::{whats_new, WHATS_NEW_HEADER};

use crate::config::Config;
use crate::fetch::PageSource;
use crate::output::ResultSet;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

/// Extraction modes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Release notes for every Python version
    WhatsNew,
    /// Documentation versions and their support status
    LatestVersions,
    /// Download the A4 PDF documentation archive
    Download,
    /// Cross-check PEP statuses against the index
    Pep,
}

impl Mode {
    /// Name used on the command line and in result file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs one mode to completion
///
/// # Returns
///
/// * `Ok(Some(ResultSet))` - Rows to hand to the renderer
/// * `Ok(None)` - Nothing to render (top-level page unavailable, or the mode
///   writes its own output)
/// * `Err(ParserError)` - A structural lookup or configuration check failed
pub async fn run_mode<S: PageSource>(
    mode: Mode,
    source: &S,
    config: &Config,
) -> crate::Result<Option<ResultSet>> {
    let main_doc_url = Url::parse(&config.site.main_doc_url)?;

    match mode {
        Mode::WhatsNew => whats_new(source, &main_doc_url).await,
        Mode::LatestVersions => latest_versions(source, &main_doc_url).await,
        Mode::Download => {
            let downloads_dir = std::path::Path::new(&config.output.downloads_dir);
            download(source, &main_doc_url, downloads_dir).await?;
            Ok(None)
        }
        Mode::Pep => {
            let peps_url = Url::parse(&config.site.peps_url)?;
            let report = pep(source, &peps_url, &config.expected_status).await?;
            Ok(report.map(|report| report.to_result_set()))
        }
    }
}

/// Progress bar for loops over detail pages
///
/// indicatif hides the bar when stderr is not a terminal.
fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    match ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})") {
        Ok(style) => pb.set_style(style.progress_chars("=> ")),
        Err(e) => tracing::debug!("Invalid progress template: {}", e),
    }
    pb
}
