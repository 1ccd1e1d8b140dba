use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub ted: TedSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8002
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
        }
    }
}

fn default_secret_key() -> String {
    "change-this-secret-key-in-production".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TedSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    /// Local JSON file standing in for the API (development)
    pub seed_file: Option<String>,
    /// Wholesale corpus refresh period; no refresh when absent
    pub refresh_interval_secs: Option<u64>,
    pub country: Option<String>,
    pub cpv_code: Option<String>,
}

impl Default for TedSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            max_records: default_max_records(),
            seed_file: None,
            refresh_interval_secs: None,
            country: None,
            cpv_code: None,
        }
    }
}

fn default_api_url() -> String {
    "https://api.ted.europa.eu/v3".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_page_size() -> usize {
    250
}
fn default_max_records() -> usize {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 {
    300
}
fn default_cache_capacity() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with PROCURE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with PROCURE_)
            // e.g., PROCURE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PROCURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PROCURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables on top of the layered config.
///
/// `SECRET_KEY` is the variable the dashboards already deploy with, so it is
/// honored ahead of the prefixed form.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let secret_key = env::var("SECRET_KEY")
        .or_else(|_| env::var("PROCURE_AUTH__SECRET_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(secret) = secret_key {
        builder = builder.set_override("auth.secret_key", secret)?;
    }

    builder.build()
}
