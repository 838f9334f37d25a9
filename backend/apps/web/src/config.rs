//! Runtime configuration from the environment

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use account::config::MAX_SESSION_TTL;
use account::{AccountConfig, BackendConfig};
use anyhow::{Context, anyhow, bail};
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: SocketAddr,
    pub backend: BackendConfig,
    pub account: AccountConfig,
}

impl WebConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = get("URL_WEB_API")
            .or_else(|| get("UrlWebAPI"))
            .ok_or_else(|| anyhow!("URL_WEB_API must be set"))?;
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("URL_WEB_API is not a valid URL: {base_url}"))?;

        let mut backend = BackendConfig::new(base_url);
        if let Some(secs) = get("BACKEND_TIMEOUT_SECS") {
            backend.timeout = parse_secs("BACKEND_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = get("BACKEND_CONNECT_TIMEOUT_SECS") {
            backend.connect_timeout = parse_secs("BACKEND_CONNECT_TIMEOUT_SECS", &secs)?;
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        let mut account = match get("SESSION_SECRET") {
            Some(secret) => AccountConfig {
                session_secret: parse_secret(&secret)?,
                ..AccountConfig::default()
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
                AccountConfig::with_random_secret()
            }
            None => bail!("SESSION_SECRET must be set in production"),
        };

        account.cookie_secure = match get("COOKIE_SECURE") {
            Some(value) => parse_bool("COOKIE_SECURE", &value)?,
            None => !cfg!(debug_assertions),
        };

        if let Some(secs) = get("SESSION_TTL_SECS") {
            account.session_ttl = parse_secs("SESSION_TTL_SECS", &secs)?;
            if account.session_ttl > MAX_SESSION_TTL {
                bail!(
                    "SESSION_TTL_SECS must be at most {}",
                    MAX_SESSION_TTL.as_secs()
                );
            }
        }

        if let Some(roles) = get("LISTING_ROLES") {
            account.listing_roles = roles
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(Self {
            bind_addr,
            backend,
            account,
        })
    }
}

fn parse_secret(value: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(value.trim())
        .context("SESSION_SECRET must be standard base64")?;

    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

fn parse_secs(key: &str, value: &str) -> anyhow::Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds: {value}"))?;

    if secs == 0 {
        bail!("{key} must be greater than zero");
    }

    Ok(Duration::from_secs(secs))
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be true or false: {other}"),
    }
}
