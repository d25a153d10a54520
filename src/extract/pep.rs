//! PEP status cross-validation
//!
//! The PEP index shows a one-letter status for every PEP; each PEP page
//! carries the full status in its RFC 2822 style header block. This module
//! checks the two against the expected-status table, counting agreements per
//! status code and collecting every disagreement.
//!
//! A disagreement is a finding, not an error: the run always completes with
//! a best-effort tally. Only a missing header field (page layout changed) or
//! a status code the table does not know stops the run.

use crate::config::ExpectedStatus;
use crate::extract::progress_bar;
use crate::fetch::PageSource;
use crate::output::ResultSet;
use crate::parsing::{
    build_soup, element_text, locate, locate_all, nth_next_sibling, require_attr, resolve_link,
    SearchDescriptor, TagNotFoundError,
};
use crate::{ParserError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use url::Url;

/// Raw sibling hops from the `Status` label to its value
///
/// The header block is rendered as `<dt>Status</dt>\n<dd>Final</dd>`; the
/// first hop lands on the newline text node, the second on the `<dd>`.
pub const STATUS_VALUE_SIBLING_HOPS: usize = 2;

/// Label of the status field in a PEP header block
pub const STATUS_LABEL: &str = "Status";

/// Label of the synthetic row holding the number of PEPs checked
pub const TOTALS_LABEL: &str = "Totals";

/// Column names of the tally report
pub const TALLY_HEADER: [&str; 2] = ["Status", "Count"];

/// One row of the PEP index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Status letter from the index, empty for drafts
    pub code: String,
    /// Link to the PEP page, as written on the index
    pub href: String,
}

/// A PEP whose page status is not acceptable for its index code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub url: String,
    pub actual: String,
    pub expected: BTreeSet<String>,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<&str> = self.expected.iter().map(String::as_str).collect();
        write!(
            f,
            "Mismatched status:\n{}\nStatus on page: {}\nExpected statuses: {}",
            self.url,
            self.actual,
            expected.join(", ")
        )
    }
}

/// Per-code count of PEPs whose statuses agree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTally(BTreeMap<String, usize>);

impl StatusTally {
    /// Starts every code of the table at zero
    pub fn new(expected: &ExpectedStatus) -> Self {
        Self(expected.codes().map(|code| (code.to_string(), 0)).collect())
    }

    fn increment(&mut self, code: &str) {
        if let Some(count) = self.0.get_mut(code) {
            *count += 1;
        }
    }

    pub fn get(&self, code: &str) -> Option<usize> {
        self.0.get(code).copied()
    }

    /// Sum over all codes
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(code, count)| (code.as_str(), *count))
    }
}

/// Outcome of one validation run
///
/// `tally.total() + discrepancies.len() == considered` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub tally: StatusTally,
    pub discrepancies: Vec<Discrepancy>,
    /// PEP pages fetched and checked
    pub considered: usize,
    /// PEP pages that could not be fetched
    pub skipped: usize,
}

impl ValidationReport {
    /// Tally rows followed by the `Totals` row
    pub fn to_result_set(&self) -> ResultSet {
        let mut results = ResultSet::new(TALLY_HEADER);
        for (code, count) in self.tally.iter() {
            results.push([code.to_string(), count.to_string()]);
        }
        results.push([TOTALS_LABEL.to_string(), self.considered.to_string()]);
        results
    }
}

/// Runs the cross-validation against the live PEP index
///
/// # Returns
///
/// * `Ok(Some(ValidationReport))` - Validation completed
/// * `Ok(None)` - The index page could not be fetched
/// * `Err(ParserError)` - A page is missing an expected tag, or the index
///   uses a status code absent from `expected`
pub async fn pep<S: PageSource>(
    source: &S,
    peps_url: &Url,
    expected: &ExpectedStatus,
) -> Result<Option<ValidationReport>> {
    let Some(index) = source.fetch_page(peps_url.as_str()).await else {
        tracing::warn!("PEP index {} is unavailable", peps_url);
        return Ok(None);
    };

    let entries = parse_pep_index(&index)?;
    tracing::info!("Found {} PEPs in the numerical index", entries.len());

    validate(source, peps_url, &entries, expected).await.map(Some)
}

/// Reads `(status code, link)` pairs from the numerical index table
///
/// The first cell holds the type letter followed by the status letter; the
/// type letter is dropped.
pub fn parse_pep_index(html: &str) -> Result<Vec<IndexEntry>> {
    let soup = build_soup(html);
    let section = locate(
        soup.root_element(),
        &SearchDescriptor::tag("section").attr("id", "numerical-index"),
    )?;
    let body = locate(section, &SearchDescriptor::tag("tbody"))?;

    locate_all(body, &SearchDescriptor::tag("tr"))
        .into_iter()
        .map(|row| -> Result<IndexEntry> {
            let anchor = locate(row, &SearchDescriptor::tag("a"))?;
            let href = require_attr(anchor, "href")?;
            let cell = locate(row, &SearchDescriptor::tag("td"))?;
            Ok(IndexEntry {
                code: element_text(cell).trim().chars().skip(1).collect(),
                href: href.to_string(),
            })
        })
        .collect()
}

/// Reads the full status from a PEP page's header block
pub fn read_pep_status(html: &str) -> std::result::Result<String, TagNotFoundError> {
    let soup = build_soup(html);
    let fields = locate(
        soup.root_element(),
        &SearchDescriptor::tag("dl").attr("class", "rfc2822"),
    )?;
    let label_descriptor = SearchDescriptor::any().text(STATUS_LABEL);
    let label = locate(fields, &label_descriptor)?;

    let value = nth_next_sibling(label, STATUS_VALUE_SIBLING_HOPS).ok_or_else(|| {
        TagNotFoundError::new(format!(
            "element {} siblings after {}",
            STATUS_VALUE_SIBLING_HOPS, label_descriptor
        ))
    })?;

    Ok(element_text(value).trim().to_string())
}

/// Checks every index entry against its PEP page
///
/// Entries are processed in index order, one request at a time. A page that
/// cannot be fetched is counted as skipped and left out of the tally and the
/// totals.
pub async fn validate<S: PageSource>(
    source: &S,
    base_url: &Url,
    entries: &[IndexEntry],
    expected: &ExpectedStatus,
) -> Result<ValidationReport> {
    let mut tally = StatusTally::new(expected);
    let mut discrepancies = Vec::new();
    let mut considered = 0;
    let mut skipped = 0;

    let pb = progress_bar(entries.len());
    for entry in entries {
        pb.inc(1);
        let url = resolve_link(base_url, &entry.href)?;
        let Some(page) = source.fetch_page(url.as_str()).await else {
            skipped += 1;
            continue;
        };

        let actual = read_pep_status(&page)?;
        let acceptable = expected.get(&entry.code).ok_or_else(|| {
            tracing::error!(
                "Status code {:?} of {} is not in the expected-status table",
                entry.code,
                url
            );
            ParserError::UnknownStatusCode {
                code: entry.code.clone(),
                url: url.to_string(),
            }
        })?;

        considered += 1;
        if acceptable.contains(&actual) {
            tally.increment(&entry.code);
        } else {
            discrepancies.push(Discrepancy {
                url: url.to_string(),
                actual,
                expected: acceptable.clone(),
            });
        }
    }
    pb.finish_and_clear();

    for discrepancy in &discrepancies {
        tracing::info!("{}", discrepancy);
    }
    if skipped > 0 {
        tracing::warn!(
            "{} PEP pages could not be fetched and are not counted",
            skipped
        );
    }

    Ok(ValidationReport {
        tally,
        discrepancies,
        considered,
        skipped,
    })
}
