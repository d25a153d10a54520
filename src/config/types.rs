use crate::ConfigError;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Main configuration structure for Docs-Parser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "expected-status")]
    pub expected_status: ExpectedStatus,
}

/// Sites the extractors read from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the versioned documentation (must end with `/`)
    #[serde(rename = "main-doc-url")]
    pub main_doc_url: String,

    /// Root of the PEP index (must end with `/`)
    #[serde(rename = "peps-url")]
    pub peps_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            main_doc_url: "https://docs.python.org/3/".to_string(),
            peps_url: "https://peps.python.org/".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the client
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "docs-parser".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/docs-parser/docs-parser".to_string(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path to the SQLite cache file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Age after which a cached response is refetched; `None` keeps responses forever
    #[serde(rename = "expire-after-secs")]
    pub expire_after_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database_path: "./docs_parser_cache.sqlite".to_string(),
            expire_after_secs: None,
        }
    }
}

impl CacheConfig {
    /// Converts `expire-after-secs` into a duration
    ///
    /// Fails for values chrono cannot represent instead of wrapping or panicking.
    pub fn max_age(&self) -> Result<Option<chrono::Duration>, ConfigError> {
        let Some(secs) = self.expire_after_secs else {
            return Ok(None);
        };
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .map(Some)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "expire_after_secs is out of range, got {}",
                    secs
                ))
            })
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving CSV result files
    #[serde(rename = "results-dir")]
    pub results_dir: String,

    /// Directory receiving downloaded archives
    #[serde(rename = "downloads-dir")]
    pub downloads_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: "./results".to_string(),
            downloads_dir: "./downloads".to_string(),
        }
    }
}

/// Maps the short status code shown on the PEP index to the full status
/// strings a PEP page may legitimately carry for it
///
/// Keys are kept sorted so tallies render in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ExpectedStatus(BTreeMap<String, BTreeSet<String>>);

impl ExpectedStatus {
    /// Returns the acceptable full statuses for a short code
    pub fn get(&self, code: &str) -> Option<&BTreeSet<String>> {
        self.0.get(code)
    }

    /// Iterates over the short codes in sorted order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(code, acceptable statuses)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(code, set)| (code.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        [
            ("A", &["Active", "Accepted"][..]),
            ("D", &["Deferred"][..]),
            ("F", &["Final"][..]),
            ("P", &["Provisional"][..]),
            ("R", &["Rejected"][..]),
            ("S", &["Superseded"][..]),
            ("W", &["Withdrawn"][..]),
            ("", &["Draft", "Active"][..]),
        ]
        .into_iter()
        .map(|(code, statuses)| (code, statuses.iter().copied()))
        .collect()
    }
}

impl<K, I, S> FromIterator<(K, I)> for ExpectedStatus
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, statuses)| {
                    (
                        code.into(),
                        statuses.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        )
    }
}
