//! Settings that come from the environment.

use crate::paginator::DEFAULT_VIDEO_CAP;
use crate::retry::RetryPolicy;
use crate::youtube_api::client::DEFAULT_BASE_URL;
use eyre::{Context, eyre};
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
pub const MAX_VIDEOS_VAR: &str = "CHANNEL_ANALYZER_MAX_VIDEOS";
pub const CONCURRENCY_VAR: &str = "CHANNEL_ANALYZER_CONCURRENCY";
pub const TIMEOUT_VAR: &str = "CHANNEL_ANALYZER_TIMEOUT_SECS";
pub const RETRIES_VAR: &str = "CHANNEL_ANALYZER_RETRIES";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` until one is found in the environment or given on the command line.
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_videos: usize,
    pub batch_concurrency: usize,
    pub request_timeout: Duration,
    /// Total attempts per playlist page or video batch request.
    pub retry_attempts: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("max_videos", &self.max_videos)
            .field("batch_concurrency", &self.batch_concurrency)
            .field("request_timeout", &self.request_timeout)
            .field("retry_attempts", &self.retry_attempts)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_videos: DEFAULT_VIDEO_CAP,
            batch_concurrency: 1,
            request_timeout: DEFAULT_TIMEOUT,
            retry_attempts: RetryPolicy::default().max_attempts,
        }
    }
}

impl Config {
    /// Reads the process environment. Unset variables keep their defaults.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`], but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            api_key: var(API_KEY_VAR).map(|key| key.trim().to_string()),
            base_url: var(BASE_URL_VAR).unwrap_or(defaults.base_url),
            max_videos: parse_var(MAX_VIDEOS_VAR, var(MAX_VIDEOS_VAR))?
                .unwrap_or(defaults.max_videos),
            batch_concurrency: parse_var(CONCURRENCY_VAR, var(CONCURRENCY_VAR))?
                .unwrap_or(defaults.batch_concurrency),
            request_timeout: parse_var(TIMEOUT_VAR, var(TIMEOUT_VAR))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            retry_attempts: parse_var(RETRIES_VAR, var(RETRIES_VAR))?
                .unwrap_or(defaults.retry_attempts),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.batch_concurrency == 0 {
            return Err(eyre!("batch concurrency must be at least 1"));
        }
        if self.retry_attempts == 0 {
            return Err(eyre!("retry attempts must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(eyre!("request timeout must be positive"));
        }
        Ok(())
    }

    /// The API key, or an error telling the user how to provide one.
    pub fn require_api_key(&self) -> eyre::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            eyre!("no YouTube API key configured; set {API_KEY_VAR} or pass --api-key")
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            ..RetryPolicy::default()
        }
    }

    /// An HTTP client whose requests time out after [`Config::request_timeout`].
    pub fn http_client(&self) -> eyre::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build HTTP client")
    }
}

fn parse_var<T>(name: &str, value: Option<String>) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(|value| {
            value
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a non-negative integer, got {value:?}"))
        })
        .transpose()
}
