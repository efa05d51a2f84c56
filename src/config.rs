use dotenvy::dotenv;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_FILE_SIZE_LIMIT: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub upload_base: String,
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub file_size_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_url = get("API_URL")
            .or_else(|| get("NEXT_PUBLIC_API_URL"))
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or(ConfigError::Missing("API_URL"))?;
        let upload_base = get("UPLOAD_BASE")
            .or_else(|| get("NEXT_PUBLIC_UPLOAD_BASE"))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{api_url}/uploads"));

        Ok(Self {
            upload_base,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            api_token: get("API_TOKEN"),
            page_size: parse_or("PAGE_SIZE", get("PAGE_SIZE"), DEFAULT_PAGE_SIZE)?,
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                15u64,
            )?),
            file_size_limit: parse_or(
                "FILE_SIZE_LIMIT",
                get("FILE_SIZE_LIMIT"),
                DEFAULT_FILE_SIZE_LIMIT,
            )?,
            api_url,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
