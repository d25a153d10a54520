use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates the configuration file at `path`
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use docs_parser::config::load_config;
///
/// let config = load_config(Path::new("docs-parser.toml")).unwrap();
/// println!("PEP index: {}", config.site.peps_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// Fingerprints raw configuration text as hex-encoded SHA-256
///
/// The fingerprint goes into the startup log so runs whose reports disagree
/// can be traced back to the configuration they used.
pub fn compute_config_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Reads the file once and returns the validated config with its fingerprint
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, compute_config_hash(&content)))
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}
