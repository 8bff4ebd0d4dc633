//! Configuration module for cfddns
//!
//! This module handles loading and validating configuration from files and environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::constants::{
    CLOUDFLARE_API_BASE, DEFAULT_IP_SERVICE_URL, DEFAULT_TIMEOUT_SECS, ENV_API_BASE,
    ENV_AUTH_EMAIL, ENV_AUTH_KEY, ENV_IP_SERVICE_URL, ENV_RECORD_NAME, ENV_TIMEOUT, ENV_VERBOSE,
    ENV_ZONE_NAME, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use crate::validation::{is_placeholder, validate_http_url, validate_record_name};

//==============================================================================
// Config
//==============================================================================

/// Configuration for one updater run
///
/// Credentials are wrapped in `Zeroizing` so they are cleared from memory
/// when dropped.
///
/// # Configuration Loading Priority
///
/// 1. Environment variables (highest priority, empty values ignored)
/// 2. Config file (`/etc/cfddns/config.toml` or custom path)
/// 3. Defaults (lowest priority)
#[derive(Debug, Clone, ZeroizeOnDrop)]
pub struct Config {
    /// Cloudflare account email, sent as `X-Auth-Email`
    #[zeroize(skip)]
    pub auth_email: Zeroizing<String>,
    /// Cloudflare global API key, sent as `X-Auth-Key`
    #[zeroize(skip)]
    pub auth_key: Zeroizing<String>,
    /// Zone holding the record (e.g. "example.com")
    #[zeroize(skip)]
    pub zone_name: String,
    /// Full record name (e.g. "home.example.com")
    #[zeroize(skip)]
    pub record_name: String,
    /// API base URL, no trailing slash needed
    #[zeroize(skip)]
    pub api_base: String,
    /// Plain-text IP echo service
    #[zeroize(skip)]
    pub ip_service_url: String,
    /// HTTP request timeout
    ///
    /// Default: 30 seconds
    #[zeroize(skip)]
    pub timeout: Duration,
    /// Enable verbose logging
    #[zeroize(skip)]
    pub verbose: bool,
}

impl Config {
    /// Loads configuration from file and environment variables, then validates it
    ///
    /// A missing file is not an error; everything can come from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `CLOUDFLARE_AUTH_EMAIL`, `CLOUDFLARE_AUTH_KEY`
    /// - `CLOUDFLARE_ZONE_NAME`, `CLOUDFLARE_RECORD_NAME`
    /// - `CLOUDFLARE_API_BASE`
    /// - `CFDDNS_IP_SERVICE_URL`, `CFDDNS_TIMEOUT`, `CFDDNS_VERBOSE`
    ///
    /// # Errors
    ///
    /// `Error::Config` if the file cannot be read or parsed, a required field
    /// is missing or still holds a sample value, or a value is out of range.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load_from_file(config_path)?;
        Self::override_with_env(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(config_path: Option<PathBuf>) -> Result<Self> {
        let mut file = TomlConfig::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::config(format!("Failed to read config {}: {}", path.display(), e))
                })?;
                file = toml::from_str(&content)
                    .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))?;
            }
        }

        Ok(Self {
            auth_email: Zeroizing::new(file.auth_email.unwrap_or_default()),
            auth_key: Zeroizing::new(file.auth_key.unwrap_or_default()),
            zone_name: file.zone_name.unwrap_or_default(),
            record_name: file.record_name.unwrap_or_default(),
            api_base: file
                .api_base
                .unwrap_or_else(|| CLOUDFLARE_API_BASE.to_string()),
            ip_service_url: file
                .ip_service_url
                .unwrap_or_else(|| DEFAULT_IP_SERVICE_URL.to_string()),
            timeout: Duration::from_secs(file.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            verbose: file.verbose.unwrap_or(false),
        })
    }

    fn override_with_env(config: &mut Self) -> Result<()> {
        if let Some(v) = env_value(ENV_AUTH_EMAIL) {
            config.auth_email = Zeroizing::new(v);
        }
        if let Some(v) = env_value(ENV_AUTH_KEY) {
            config.auth_key = Zeroizing::new(v);
        }
        if let Some(v) = env_value(ENV_ZONE_NAME) {
            config.zone_name = v;
        }
        if let Some(v) = env_value(ENV_RECORD_NAME) {
            config.record_name = v;
        }
        if let Some(v) = env_value(ENV_API_BASE) {
            config.api_base = v;
        }
        if let Some(v) = env_value(ENV_IP_SERVICE_URL) {
            config.ip_service_url = v;
        }
        if let Some(v) = env_value(ENV_TIMEOUT) {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid {} value: {}", ENV_TIMEOUT, v)))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = env_value(ENV_VERBOSE) {
            config.verbose = parse_bool_env(&v)
                .ok_or_else(|| Error::config(format!("Invalid {} value: {}", ENV_VERBOSE, v)))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(ENV_AUTH_EMAIL, self.auth_email.as_str())?;
        if !self.auth_email.contains('@') {
            return Err(Error::config(format!(
                "{} must be an email address",
                ENV_AUTH_EMAIL
            )));
        }
        require(ENV_AUTH_KEY, self.auth_key.as_str())?;
        require(ENV_ZONE_NAME, &self.zone_name)?;
        validate_record_name(&self.zone_name)?;
        require(ENV_RECORD_NAME, &self.record_name)?;
        validate_record_name(&self.record_name)?;

        validate_http_url("api_base", &self.api_base)?;
        validate_http_url("ip_service_url", &self.ip_service_url)?;

        let timeout_secs = self.timeout.as_secs();
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(Error::config(format!(
                "timeout must be between {} and {} seconds, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, timeout_secs
            )));
        }

        Ok(())
    }
}

/// Non-empty required value that is not a sample placeholder
fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::config(format!("Missing {}", name)));
    }
    if is_placeholder(value) {
        return Err(Error::config(format!(
            "{} still holds a placeholder value: {}",
            name, value
        )));
    }
    Ok(())
}

/// Reads an environment variable, treating empty as unset
fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parses a boolean value from an environment variable
///
/// Accepts "1", "true", "yes", "on" and "0", "false", "no", "off".
fn parse_bool_env(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// TOML configuration file structure
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    auth_email: Option<String>,
    auth_key: Option<String>,
    zone_name: Option<String>,
    record_name: Option<String>,
    api_base: Option<String>,
    ip_service_url: Option<String>,
    timeout: Option<u64>,
    verbose: Option<bool>,
}

//==============================================================================
// Tests
//==============================================================================
