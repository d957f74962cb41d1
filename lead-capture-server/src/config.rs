//! Server configuration from environment variables.
//!
//!   LEAD_BIND_ADDR          : listen address (default: 0.0.0.0:3000)
//!   LEAD_SUBMIT_DELAY_MS    : simulated sink delay (default: 1000)
//!   LEAD_WEBHOOK_URL        : forward leads to this URL instead of logging them
//!   LEAD_WEBHOOK_TIMEOUT_MS : webhook request timeout (default: 10000)

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;
const DEFAULT_WEBHOOK_TIMEOUT_MS: u64 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub submit_delay: Duration,
    pub webhook: Option<WebhookConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let bind_addr: SocketAddr = match get("LEAD_BIND_ADDR") {
            Some(value) => parse_var("LEAD_BIND_ADDR", &value)?,
            None => parse_var("LEAD_BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };

        let submit_delay = match get("LEAD_SUBMIT_DELAY_MS") {
            Some(value) => Duration::from_millis(parse_var("LEAD_SUBMIT_DELAY_MS", &value)?),
            None => Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
        };

        let webhook = match get("LEAD_WEBHOOK_URL") {
            Some(value) => {
                let url: Url = parse_var("LEAD_WEBHOOK_URL", &value)?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(invalid(
                        "LEAD_WEBHOOK_URL",
                        &value,
                        "scheme must be http or https",
                    ));
                }
                let timeout_ms = match get("LEAD_WEBHOOK_TIMEOUT_MS") {
                    Some(raw) => parse_var("LEAD_WEBHOOK_TIMEOUT_MS", &raw)?,
                    None => DEFAULT_WEBHOOK_TIMEOUT_MS,
                };
                Some(WebhookConfig {
                    url,
                    timeout: Duration::from_millis(timeout_ms),
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            submit_delay,
            webhook,
        })
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(var, value, e))
}

fn invalid(var: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
