//! Configuration module for Storefront-Probe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a missing file section falls back to the values
//! the probe has always used.
//!
//! # Example
//!
//! ```no_run
//! use storefront_probe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("probe.toml")).unwrap();
//! println!("Sampling {} products per site", config.probe.sample_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ProbeConfig, ReportConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, resolve_config, ConfigSource,
};
pub use validation::validate;
