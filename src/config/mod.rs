//! Configuration module for Docs-Parser
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the public Python
//! documentation sites and the stock expected-status table.
//!
//! # Example
//!
//! ```no_run
//! use docs_parser::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docs-parser.toml")).unwrap();
//! println!("Documentation root: {}", config.site.main_doc_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, ExpectedStatus, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
