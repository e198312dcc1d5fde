// Startup configuration read from the process environment (and `.env`, which
// main loads before calling `BotConfig::from_env`).

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::core::relay::{ResponsePolicy, ResponseTiming};
use crate::infra::codeforces::codeforces_client;
use crate::infra::kaggle::kaggle_client;

const DEFAULT_RESULT_CAP: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Add it to your environment or .env file.")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the bot needs at runtime, built once and handed to each service.
#[derive(Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub cp_channel_id: u64,
    pub kaggle_channel_id: u64,
    pub kaggle_username: String,
    pub kaggle_key: String,
    pub response_timing: ResponseTiming,
    pub result_cap: usize,
    pub codeforces_api_url: String,
    pub kaggle_api_url: String,
    pub http_timeout: Option<Duration>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let response_timing = match get("RESPONSE_TIMING") {
            None => ResponseTiming::DeferFirst,
            Some(value) => parse_timing(&value).ok_or(ConfigError::Invalid {
                name: "RESPONSE_TIMING",
                value,
            })?,
        };

        let result_cap = match get("RESULT_CAP") {
            None => DEFAULT_RESULT_CAP,
            Some(value) => match value.parse::<usize>() {
                Ok(cap) if cap > 0 => cap,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "RESULT_CAP",
                        value,
                    })
                }
            },
        };

        let http_timeout = get("HTTP_TIMEOUT_SECS")
            .map(|value| match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::Invalid {
                    name: "HTTP_TIMEOUT_SECS",
                    value,
                }),
            })
            .transpose()?;

        Ok(Self {
            discord_token: require("DISCORD_TOKEN")?,
            cp_channel_id: parse_channel("CP_CHANNEL_ID", require("CP_CHANNEL_ID")?)?,
            kaggle_channel_id: parse_channel("KAGGLE_CHANNEL_ID", require("KAGGLE_CHANNEL_ID")?)?,
            kaggle_username: require("KAGGLE_USERNAME")?,
            kaggle_key: require("KAGGLE_KEY")?,
            response_timing,
            result_cap,
            codeforces_api_url: get("CODEFORCES_API_URL")
                .unwrap_or_else(|| codeforces_client::DEFAULT_BASE_URL.to_string()),
            kaggle_api_url: get("KAGGLE_API_URL")
                .unwrap_or_else(|| kaggle_client::DEFAULT_BASE_URL.to_string()),
            http_timeout,
        })
    }

    pub fn response_policy(&self, ephemeral: bool) -> ResponsePolicy {
        ResponsePolicy {
            timing: self.response_timing,
            ephemeral,
            cap: Some(self.result_cap),
        }
    }
}

// Hand-written so the token and API key never end up in logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"<redacted>")
            .field("cp_channel_id", &self.cp_channel_id)
            .field("kaggle_channel_id", &self.kaggle_channel_id)
            .field("kaggle_username", &self.kaggle_username)
            .field("kaggle_key", &"<redacted>")
            .field("response_timing", &self.response_timing)
            .field("result_cap", &self.result_cap)
            .field("codeforces_api_url", &self.codeforces_api_url)
            .field("kaggle_api_url", &self.kaggle_api_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn parse_channel(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_timing(value: &str) -> Option<ResponseTiming> {
    match value.to_ascii_lowercase().as_str() {
        "defer" | "deferred" | "defer_first" => Some(ResponseTiming::DeferFirst),
        "immediate" => Some(ResponseTiming::Immediate),
        _ => None,
    }
}
