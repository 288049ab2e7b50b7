//! Per-video statistics for the recent uploads of a YouTube channel.
//!
//! A run takes a channel reference (URL, `@handle` or channel ID) and goes through four stages,
//! each in its own module:
//!
//! 1. [`resolver`] turns the reference into a channel ID,
//! 2. [`channel_info`] looks the channel up and finds its uploads playlist,
//! 3. [`paginator`] lists the playlist up to a cap,
//! 4. [`metrics`] fetches details for the listed videos in batches of 50.
//!
//! [`pipeline::Pipeline`] strings them together, and [`report`] and [`export`] present the
//! result.

pub mod channel_info;
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod paginator;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod retry;
pub mod youtube_api;

pub use config::Config;
pub use error::{PipelineError, ResolveError};
pub use metrics::{BatchFailure, VideoRecord};
pub use pipeline::{ChannelReport, Pipeline, RunRequest};
pub use resolver::ChannelId;
pub use retry::RetryPolicy;
pub use youtube_api::{YouTubeApi, YouTubeClient};

/// Builds a pipeline that talks to the YouTube API as `config` describes.
pub fn pipeline_from_config(config: &Config) -> eyre::Result<Pipeline<YouTubeClient>> {
    let client = YouTubeClient::new(config.require_api_key()?, config.http_client()?)
        .with_base_url(&config.base_url);
    Ok(Pipeline::new(client)
        .retry_policy(config.retry_policy())
        .batch_concurrency(config.batch_concurrency))
}
