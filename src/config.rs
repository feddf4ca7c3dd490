//! Optional TOML configuration for fetching and rendering feeds.
//!
//! A missing file yields `Config::default()`. Unknown keys are accepted and
//! logged, so configuration written for newer versions still loads.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::xml::WriteOptions;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// Every section uses `#[serde(default)]` so any subset of keys can be given.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// `[fetch]`: limits applied to every feed download.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Largest accepted response body in bytes.
    pub max_feed_size: usize,

    /// Feeds fetched at once by `fetch_all`.
    pub concurrency: usize,

    pub user_agent: String,

    /// Allow loopback and private network hosts. Off by default to prevent
    /// SSRF through user-supplied feed URLs.
    pub allow_private_hosts: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_feed_size: 10 * 1024 * 1024,
            concurrency: 10,
            user_agent: concat!("syndkit/", env!("CARGO_PKG_VERSION")).to_string(),
            allow_private_hosts: false,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[output]`: how encoded XML is laid out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub formatted: bool,
    pub indent_width: usize,
    pub trailing_newline: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formatted: true,
            indent_width: 4,
            trailing_newline: true,
        }
    }
}

impl From<&OutputConfig> for WriteOptions {
    fn from(output: &OutputConfig) -> Self {
        Self {
            formatted: output.formatted,
            indent_width: output.indent_width,
            trailing_newline: output.trailing_newline,
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [(&'static str, &'static [&'static str]); 2] = [
        (
            "fetch",
            &[
                "timeout_secs",
                "max_feed_size",
                "concurrency",
                "user_agent",
                "allow_private_hosts",
            ],
        ),
        ("output", &["formatted", "indent_width", "trailing_newline"]),
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty or whitespace-only file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // SEC-014: Check file size before reading to prevent memory exhaustion
        // from a maliciously large or corrupted config file.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw);
        }

        Ok(toml::from_str(content)?)
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions::from(&self.output)
    }
}

fn warn_unknown_keys(raw: &toml::Table) {
    for (section, value) in raw {
        let Some((_, fields)) = Config::KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str()) else {
            tracing::warn!(key = %section, "Unknown key in config file, ignoring");
            continue;
        };
        let Some(table) = value.as_table() else {
            continue;
        };
        for key in table.keys() {
            if !fields.contains(&key.as_str()) {
                tracing::warn!(section = %section, key = %key, "Unknown key in config file, ignoring");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
