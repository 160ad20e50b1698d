//! Storefront-Probe: a batch storefront catalog prober
//!
//! This crate probes HTTP(S) endpoints for a public `/products.json` catalog,
//! samples a few product listings and prices from each, classifies every
//! endpoint, and assembles chat-sized text chunks plus a CSV export.

pub mod batch;
pub mod config;
pub mod prober;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Storefront-Probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

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

/// Errors raised while validating a batch before it starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("No URLs found.")]
    Empty,
}

/// Errors that abort a whole batch run
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Concurrency limit must be between 1 and {max}, got {limit}")]
    InvalidConcurrency { limit: usize, max: usize },

    #[error("Batch cancelled after {completed} of {total} probes")]
    Cancelled { completed: usize, total: usize },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors raised while producing report artifacts
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Storefront-Probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use batch::{check_urls, run_batch, BatchRun, Coordinator, MAX_BATCH_URLS};
pub use config::Config;
pub use prober::{probe, ProbeOutcome, ProductSample, TransportError, TransportErrorKind};
pub use report::{classify, Classification, Report, StatusIcon};
