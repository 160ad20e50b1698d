use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Storefront-Probe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Probe behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Number of products requested from and kept for each catalog
    #[serde(rename = "sample-limit")]
    pub sample_limit: usize,

    /// Overall timeout for one catalog request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of catalog requests in flight at once
    #[serde(rename = "concurrency-limit")]
    pub concurrency_limit: usize,
}

impl ProbeConfig {
    /// Returns the per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sample_limit: 3,
            timeout_secs: 20,
            concurrency_limit: 32,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the probe bot
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the probe bot
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the bot
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Mozilla/5.0 (compatible; Name/Version; +ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "ShopifyCheckerBot".to_string(),
            crawler_version: "2.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum characters per inline text chunk
    #[serde(rename = "chunk-budget")]
    pub chunk_budget: usize,

    /// Directory where TXT/CSV artifacts are written in file mode
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chunk_budget: 3500,
            output_dir: PathBuf::from("."),
        }
    }
}
