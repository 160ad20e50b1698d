use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults; no file was given
    Defaults,

    /// A TOML file, with the SHA-256 of the exact content that was parsed
    File { path: PathBuf, hash: String },
}

impl ConfigSource {
    /// Hex digest of the file content, if a file was loaded
    pub fn hash(&self) -> Option<&str> {
        match self {
            ConfigSource::Defaults => None,
            ConfigSource::File { hash, .. } => Some(hash),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "defaults"),
            ConfigSource::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// Missing sections and keys take their defaults; the merged result is
/// validated before it is returned.
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Computes a SHA-256 hash of the configuration file content
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration and returns both the config and its hash
///
/// The file is read once, so the hash always describes the content that
/// was parsed.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

/// Resolves the effective configuration for a run
///
/// With a path, the file is loaded and hashed. Without one, the defaults are
/// used; they go through the same validation so both paths report the same
/// way.
pub fn resolve_config(path: Option<&Path>) -> ConfigResult<(Config, ConfigSource)> {
    match path {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            let source = ConfigSource::File {
                path: path.to_path_buf(),
                hash,
            };
            Ok((config, source))
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok((config, ConfigSource::Defaults))
        }
    }
}

fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
