//! Configuration management for dnsimple-ddns.

use crate::error::{DdnsError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default DNSimple API host.
pub const DEFAULT_API_HOST: &str = "api.dnsimple.com";

/// Default IP echo service.
pub const DEFAULT_IP_SERVICE: &str = "http://jsonip.com";

/// Default TTL written on created and updated records.
pub const DEFAULT_TTL: u32 = 5;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Time between updates in seconds (default: 300 = 5 minutes).
    #[serde(default = "default_interval")]
    pub update_interval_secs: u64,

    /// DNSimple API host, or a full base URL.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// IP echo service returning `{"ip": "..."}`.
    #[serde(default = "default_ip_service")]
    pub ip_service: String,

    /// Value for the X-DNSimple-Domain-Token header
    /// (or environment variable name if prefixed with $).
    #[serde(default)]
    pub domain_token: String,

    /// Domain the entry is for.
    #[serde(default)]
    pub domain: String,

    /// Name of the entry.
    #[serde(default)]
    pub entry_name: String,

    /// TTL in seconds for the managed record.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

fn default_interval() -> u64 {
    300
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_ip_service() -> String {
    DEFAULT_IP_SERVICE.to_string()
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_interval_secs: default_interval(),
            api_host: default_api_host(),
            ip_service: default_ip_service(),
            domain_token: String::new(),
            domain: String::new(),
            entry_name: String::new(),
            ttl: DEFAULT_TTL,
        }
    }
}

/// Values supplied on the command line; `Some` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub update_interval: Option<Duration>,
    pub api_host: Option<String>,
    pub ip_service: Option<String>,
    pub domain_token: Option<String>,
    pub domain: Option<String>,
    pub entry_name: Option<String>,
    pub ttl: Option<u32>,
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DdnsError::Config("Could not find config directory".to_string()))?;

        Ok(config_dir.join("dnsimple-ddns").join("config.toml"))
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn merge(mut self, overrides: Overrides) -> Self {
        if let Some(interval) = overrides.update_interval {
            self.update_interval_secs = interval.as_secs();
        }
        if let Some(host) = overrides.api_host {
            self.api_host = host;
        }
        if let Some(service) = overrides.ip_service {
            self.ip_service = service;
        }
        if let Some(token) = overrides.domain_token {
            self.domain_token = token;
        }
        if let Some(domain) = overrides.domain {
            self.domain = domain;
        }
        if let Some(name) = overrides.entry_name {
            self.entry_name = name;
        }
        if let Some(ttl) = overrides.ttl {
            self.ttl = ttl;
        }
        self.domain_token = resolve_env(&self.domain_token);
        self
    }

    /// Check that everything needed to run the loop is present.
    pub fn validate(&self) -> Result<()> {
        if self.domain_token.is_empty() || self.domain.is_empty() || self.entry_name.is_empty() {
            return Err(DdnsError::Config("-t, -d and -n must be set".to_string()));
        }
        if self.update_interval_secs == 0 {
            return Err(DdnsError::Config(
                "update interval must be at least one second".to_string(),
            ));
        }
        if self.ttl == 0 {
            return Err(DdnsError::Config("ttl must be positive".to_string()));
        }
        Ok(())
    }

    /// Time between updates.
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    /// Base URL of the DNSimple API, `https://` unless a scheme is given.
    pub fn api_base_url(&self) -> String {
        let host = self.api_host.trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }

    /// Fully qualified name of the managed entry.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.entry_name, self.domain)
    }
}

/// Resolve environment variable references (values starting with $).
fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_else(|_| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}

/// Parse a whole-second interval such as `300`, `90s`, `5m` or `1h30m`.
pub fn parse_interval(input: &str) -> std::result::Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = input.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in duration {:?}", input))?;
        if digits == 0 {
            return Err(format!("invalid duration {:?}", input));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|_| format!("invalid duration {:?}", input))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "s" => 1,
            "m" => 60,
            "h" => 3600,
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, input)),
        };
        total = value
            .checked_mul(scale)
            .map(Duration::from_secs)
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| "duration too large".to_string())?;
        rest = &rest[unit_len..];
    }
    Ok(total)
}
