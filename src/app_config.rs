use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// two remote services and the language pair they are called with.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Primary machine translation service
    #[serde(default)]
    pub primary: PrimaryServiceConfig,

    /// Post-processing service
    #[serde(default)]
    pub postprocessor: PostprocessorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Primary translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrimaryServiceConfig {
    // @field: Service URL, `src`/`tgt` are appended as query parameters
    #[serde(default = "default_primary_endpoint")]
    pub endpoint: String,

    // @field: Form field carrying the input text
    #[serde(default = "default_input_field")]
    pub input_field: String,

    // @field: Transport timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PrimaryServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_primary_endpoint(),
            input_field: default_input_field(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PrimaryServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Post-processing service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostprocessorConfig {
    // @field: Service URL, `src`/`tgt` are appended as query parameters
    #[serde(default = "default_postprocessor_endpoint")]
    pub endpoint: String,

    // @field: Form field carrying the original text
    #[serde(default = "default_source_field")]
    pub source_field: String,

    // @field: Form field carrying the primary translation
    #[serde(default = "default_target_field")]
    pub target_field: String,

    // @field: Transport timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PostprocessorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_postprocessor_endpoint(),
            source_field: default_source_field(),
            target_field: default_target_field(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PostprocessorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Values given on the command line; each one that is set wins over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub primary_endpoint: Option<String>,
    pub postprocessor_endpoint: Option<String>,
    pub log_level: Option<LogLevel>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "cs".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_primary_endpoint() -> String {
    "https://lindat.mff.cuni.cz/services/translation/api/v2/languages/".to_string()
}

fn default_postprocessor_endpoint() -> String {
    // Development stand-in; point this at the deployed fixer
    "http://localhost:8080/".to_string()
}

fn default_input_field() -> String {
    "input_text".to_string()
}

fn default_source_field() -> String {
    "source_text".to_string()
}

fn default_target_field() -> String {
    "target_text".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .with_context(|| format!("Invalid {} endpoint: {}", name, endpoint))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("Unsupported scheme '{}' for {} endpoint", other, name)),
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        validate_endpoint("primary", &self.primary.endpoint)?;
        validate_endpoint("postprocessor", &self.postprocessor.endpoint)?;

        if self.primary.input_field.trim().is_empty() {
            return Err(anyhow!("Primary input field name must not be empty"));
        }
        if self.postprocessor.source_field.trim().is_empty()
            || self.postprocessor.target_field.trim().is_empty()
        {
            return Err(anyhow!("Postprocessor field names must not be empty"));
        }
        if self.primary.timeout_secs == 0 || self.postprocessor.timeout_secs == 0 {
            return Err(anyhow!("Service timeouts must be greater than zero"));
        }

        Ok(())
    }

    /// Replace the values set in `overrides`, keeping the rest
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(source_lang) = &overrides.source_language {
            self.source_language = source_lang.clone();
        }
        if let Some(target_lang) = &overrides.target_language {
            self.target_language = target_lang.clone();
        }
        if let Some(endpoint) = &overrides.primary_endpoint {
            self.primary.endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &overrides.postprocessor_endpoint {
            self.postprocessor.endpoint = endpoint.clone();
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
    }

    /// Load the configuration at `path`, writing the defaults there first if
    /// the file does not exist yet
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            primary: PrimaryServiceConfig::default(),
            postprocessor: PostprocessorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
