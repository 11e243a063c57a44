//! Layered configuration for the storybook generator.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from storie.toml)
//! - `~/.config/storie/storie.toml`
//! - `./storie.toml`
//! - Environment variables `STORIE__SECTION__KEY` (e.g. `STORIE__TEXT__API_KEY`)

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use storie_error::{ConfigError, StorieError, StorieResult};
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../storie.toml");

/// Hosted backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the hosted backend
    pub base_url: Option<String>,
    /// Anonymous (public) API key
    pub anon_key: Option<String>,
    /// Storage bucket receiving page illustrations
    pub bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            anon_key: None,
            bucket: "story-images".to_string(),
        }
    }
}

impl BackendConfig {
    /// Base URL, or a `ConfigError` when unset.
    #[track_caller]
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        require(self.base_url.as_deref(), "backend.base_url")
    }

    /// Anonymous key, or a `ConfigError` when unset.
    #[track_caller]
    pub fn require_anon_key(&self) -> Result<&str, ConfigError> {
        require(self.anon_key.as_deref(), "backend.anon_key")
    }
}

/// Chat-completion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Bearer key for the completion endpoint
    pub api_key: Option<String>,
    /// Full URL of the chat-completions endpoint
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

impl TextConfig {
    /// API key, or a `ConfigError` when unset.
    #[track_caller]
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        require(self.api_key.as_deref(), "text.api_key")
    }
}

/// Image-generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Bearer key for the image endpoint
    pub api_key: Option<String>,
    /// Full URL of the image-generation endpoint
    pub endpoint: String,
    /// Requested resolution
    pub resolution: String,
    /// Requested output format
    pub output_format: String,
    /// Total attempts per image, including the first
    pub max_attempts: usize,
    /// Backoff step in milliseconds; the n-th wait lasts `n * step`
    pub backoff_step_ms: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.wavespeed.ai/api/v3/wavespeed-ai/z-image/turbo".to_string(),
            resolution: "1k".to_string(),
            output_format: "png".to_string(),
            max_attempts: 3,
            backoff_step_ms: 2000,
        }
    }
}

impl ImageConfig {
    /// API key, or a `ConfigError` when unset.
    #[track_caller]
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        require(self.api_key.as_deref(), "image.api_key")
    }
}

/// Storybook lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorybookConfig {
    /// Interval between status polls while a book is generating
    pub poll_interval_ms: u64,
    /// Prompt length beyond which the provisional title is truncated
    pub title_max_chars: usize,
}

impl Default for StorybookConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000,
            title_max_chars: 50,
        }
    }
}

/// Top-level Storie configuration.
///
/// # Example
///
/// ```no_run
/// use storie_core::StorieConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StorieConfig::load()?;
/// let key = config.text.require_api_key()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorieConfig {
    /// Hosted backend
    pub backend: BackendConfig,
    /// Chat completions
    pub text: TextConfig,
    /// Image generation
    pub image: ImageConfig,
    /// Storybook lifecycle
    pub storybook: StorybookConfig,
}

impl StorieConfig {
    /// Load configuration from a single file.
    ///
    /// Values missing from the file fall back to the built-in defaults.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StorieResult<Self> {
        debug!(path = %path.as_ref().display(), "Loading configuration from file");
        build(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(toml: &str) -> StorieResult<Self> {
        build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Load configuration with precedence:
    /// environment > current dir > home dir > bundled defaults.
    pub fn load() -> StorieResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storie/storie.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("storie").required(false))
            .add_source(
                Environment::with_prefix("STORIE")
                    .prefix_separator("__")
                    .separator("__"),
            );

        build(builder)
    }
}

fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> StorieResult<StorieConfig> {
    builder
        .build()
        .map_err(|e| {
            StorieError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            StorieError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}

#[track_caller]
fn require<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::new(format!("{} is not set", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_file_matches_struct_defaults() {
        let bundled = StorieConfig::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(bundled, StorieConfig::default());
    }
}
