use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const DEFAULT_GITHUB_API_TIMEOUT_SECS: u64 = 30;

/// Process configuration, read once at start-up.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_pool_size: u32,
    pub github_api_url: Url,
    pub github_api_token: String,
    pub github_api_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingVar: {name} is not set")]
    MissingVar { name: &'static str },

    #[error("InvalidUrl: {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("InvalidNumber: {name}={value}: {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("InvalidAddr: {name}={value}: {source}")]
    InvalidAddr {
        name: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("ZeroPoolSize: DATABASE_POOL_SIZE must be at least 1")]
    ZeroPoolSize,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::MissingVar { name: "DATABASE_URL" })?;
        let github_api_token =
            get("GITHUB_API_TOKEN").ok_or(ConfigError::MissingVar { name: "GITHUB_API_TOKEN" })?;

        let github_api_url = get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_owned());
        let github_api_url = Url::parse(&github_api_url)
            .map_err(|source| ConfigError::InvalidUrl { name: "GITHUB_API_URL", source })?;

        let github_api_timeout = match get("GITHUB_API_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number::<u64>("GITHUB_API_TIMEOUT_SECS", value)?),
            None => Duration::from_secs(DEFAULT_GITHUB_API_TIMEOUT_SECS),
        };

        let database_pool_size = match get("DATABASE_POOL_SIZE") {
            Some(value) => parse_number::<u32>("DATABASE_POOL_SIZE", value)?,
            None => DEFAULT_POOL_SIZE,
        };
        if database_pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr { name: "BIND_ADDR", value: bind_addr.clone(), source })?;

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());

        Ok(Self {
            database_url,
            database_pool_size,
            github_api_url,
            github_api_token,
            github_api_timeout,
            bind_addr,
            log_level,
        })
    }
}

fn parse_number<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { name, value, source })
}

// Credentials stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("database_pool_size", &self.database_pool_size)
            .field("github_api_url", &self.github_api_url.as_str())
            .field("github_api_token", &"<redacted>")
            .field("github_api_timeout", &self.github_api_timeout)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}
