use crate::config::types::{Config, ProbeConfig, ReportConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Largest page size the catalog endpoint honors
const MAX_SAMPLE_LIMIT: usize = 250;

/// Smallest chunk budget that still fits a typical result block
const MIN_CHUNK_BUDGET: usize = 200;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_probe_config(&config.probe)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_report_config(&config.report)?;
    Ok(())
}

/// Validates probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.sample_limit < 1 || config.sample_limit > MAX_SAMPLE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "sample-limit must be between 1 and {}, got {}",
            MAX_SAMPLE_LIMIT, config.sample_limit
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.concurrency_limit < 1 || config.concurrency_limit > 500 {
        return Err(ConfigError::Validation(format!(
            "concurrency-limit must be between 1 and 500, got {}",
            config.concurrency_limit
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.chunk_budget < MIN_CHUNK_BUDGET {
        return Err(ConfigError::Validation(format!(
            "chunk-budget must be >= {}, got {}",
            MIN_CHUNK_BUDGET, config.chunk_budget
        )));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
