//! Docs-Parser: a documentation site extractor
//!
//! This crate pulls structured records out of the Python documentation and the
//! PEP index, and cross-validates the status each PEP advertises on the index
//! against the status published on its own page.

pub mod cache;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod parsing;

use thiserror::Error;

/// Main error type for Docs-Parser operations
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error(transparent)]
    TagNotFound(#[from] parsing::TagNotFoundError),

    #[error("No list containing {marker:?} was found in {url}")]
    NoMatchingSection { marker: String, url: String },

    #[error("Status code {code:?} from {url} is missing from the expected-status table")]
    UnknownStatusCode { code: String, url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Docs-Parser operations
pub type Result<T> = std::result::Result<T, ParserError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::Mode;
pub use output::{OutputMode, ResultSet};
