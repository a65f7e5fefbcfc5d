use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub http_timeout_seconds: u64,
    pub page_size: usize,
    /// Backing file for the local key-value store. Absent means the store
    /// is purely in-memory and nothing survives a restart.
    pub storage_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env_or("API_URL", "http://localhost:5000");
        let api_base_url =
            Url::parse(&api_base_url).map_err(|err| anyhow!("invalid API_URL: {}", err))?;

        Ok(Self {
            api_base_url,
            http_timeout_seconds: env_or_parse("HTTP_TIMEOUT_SECONDS", "10")?,
            page_size: env_or_parse("FEED_PAGE_SIZE", "2")?,
            storage_path: std::env::var("STORAGE_PATH").ok().map(PathBuf::from),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
