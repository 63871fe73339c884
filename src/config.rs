//! Server configuration.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("{0} is required")]
    Missing(&'static str),
}

type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}` (expected compact or json)")),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct ShopConfig {
    pub http_port: u16,
    pub bind_addr: IpAddr,
    /// Shared secret for gateway payment signatures.
    pub payment_key_secret: String,
    /// Share of a design line credited to its creator, in `[0, 1]`.
    pub royalty_rate: Decimal,
    pub min_withdrawal: Decimal,
    /// Inbox capacity of every actor.
    pub actor_buffer: usize,
    /// Emails that register with the admin role.
    pub admin_emails: Vec<String>,
    pub log_format: LogFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            payment_key_secret: String::new(),
            royalty_rate: Decimal::new(10, 2),
            min_withdrawal: Decimal::from(100),
            actor_buffer: 64,
            admin_emails: Vec::new(),
            log_format: LogFormat::Compact,
        }
    }
}

impl std::fmt::Debug for ShopConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopConfig")
            .field("http_port", &self.http_port)
            .field("bind_addr", &self.bind_addr)
            .field("payment_key_secret", &"[REDACTED]")
            .field("royalty_rate", &self.royalty_rate)
            .field("min_withdrawal", &self.min_withdrawal)
            .field("actor_buffer", &self.actor_buffer)
            .field("admin_emails", &self.admin_emails)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ShopConfig {
    /// Loads configuration from `DROPSHOP_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable fails to parse or the result is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ShopConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = Env(lookup);
        let mut config = Self::default();

        if let Some(port) = env.parse("DROPSHOP_HTTP_PORT")? {
            config.http_port = port;
        }
        if let Some(addr) = env.parse("DROPSHOP_BIND_ADDR")? {
            config.bind_addr = addr;
        }
        if let Some(secret) = env.string("DROPSHOP_PAYMENT_KEY_SECRET") {
            config.payment_key_secret = secret;
        }
        if let Some(rate) = env.parse("DROPSHOP_ROYALTY_RATE")? {
            config.royalty_rate = rate;
        }
        if let Some(min) = env.parse("DROPSHOP_MIN_WITHDRAWAL")? {
            config.min_withdrawal = min;
        }
        if let Some(buffer) = env.parse("DROPSHOP_ACTOR_BUFFER")? {
            config.actor_buffer = buffer;
        }
        if let Some(emails) = env.string("DROPSHOP_ADMIN_EMAILS") {
            config.admin_emails = emails
                .split(',')
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect();
        }
        if let Some(format) = env.parse("DROPSHOP_LOG_FORMAT")? {
            config.log_format = format;
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if a value is out of range or the payment secret is empty.
    pub fn validate(&self) -> Result<()> {
        if self.payment_key_secret.trim().is_empty() {
            return Err(ConfigError::Missing("DROPSHOP_PAYMENT_KEY_SECRET"));
        }
        if self.royalty_rate < Decimal::ZERO || self.royalty_rate > Decimal::ONE {
            return Err(ConfigError::Invalid {
                name: "DROPSHOP_ROYALTY_RATE",
                reason: "must be between 0 and 1".to_string(),
            });
        }
        if self.min_withdrawal <= Decimal::ZERO {
            return Err(ConfigError::Invalid {
                name: "DROPSHOP_MIN_WITHDRAWAL",
                reason: "must be positive".to_string(),
            });
        }
        if self.actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                name: "DROPSHOP_ACTOR_BUFFER",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn string(&self, name: &str) -> Option<String> {
        (self.0)(name).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse<T>(&self, name: &'static str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(v) = self.string(name) else {
            return Ok(None);
        };
        v.parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid { name, reason: e.to_string() })
    }
}
