use crate::config::types::{
    CacheConfig, Config, ExpectedStatus, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    validate_cache_config(&config.cache)?;
    validate_output_config(&config.output)?;
    validate_expected_status(&config.expected_status)?;
    Ok(())
}

/// Validates site roots
///
/// Roots are joined with relative paths (`whatsnew/`, `download.html`), so a
/// missing trailing slash would silently drop the last path segment.
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_base_url("main-doc-url", &config.main_doc_url)?;
    validate_base_url("peps-url", &config.peps_url)?;
    Ok(())
}

fn validate_base_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    if !url.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must end with '/'",
            name, value
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }
    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.expire_after_secs == Some(0) {
        return Err(ConfigError::Validation(
            "expire_after_secs must be >= 1, got 0".to_string(),
        ));
    }
    config.max_age()?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    if config.downloads_dir.is_empty() {
        return Err(ConfigError::Validation(
            "downloads_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the expected-status table
///
/// An empty code is allowed: drafts carry no status letter on the index.
fn validate_expected_status(expected: &ExpectedStatus) -> Result<(), ConfigError> {
    if expected.is_empty() {
        return Err(ConfigError::Validation(
            "expected-status table cannot be empty".to_string(),
        ));
    }

    for (code, statuses) in expected.iter() {
        if statuses.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Status code '{}' must list at least one acceptable status",
                code
            )));
        }
    }

    Ok(())
}
