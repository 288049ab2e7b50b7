//! Running all stages for one channel reference.

use crate::channel_info::{ChannelSummary, fetch_channel_summary};
use crate::error::PipelineError;
use crate::metrics::{BatchFailure, VideoRecord, fetch_video_records};
use crate::paginator::{DEFAULT_VIDEO_CAP, collect_video_ids};
use crate::resolver::resolve_channel_id;
use crate::retry::RetryPolicy;
use crate::youtube_api::YouTubeApi;
use serde::Serialize;

/// The input of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Channel URL, `@handle` or channel ID, as the user typed it.
    pub reference: String,
    /// Upper bound on the number of videos to analyze.
    pub max_videos: usize,
}

impl RunRequest {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            max_videos: DEFAULT_VIDEO_CAP,
        }
    }

    pub fn max_videos(mut self, max_videos: usize) -> Self {
        self.max_videos = max_videos;
        self
    }
}

/// Everything a run found out about a channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    pub channel: ChannelSummary,
    /// The channel's most recent uploads, newest first.
    pub videos: Vec<VideoRecord>,
    /// Batches of videos whose details could not be fetched. Non-empty means `videos` is
    /// incomplete.
    pub failed_batches: Vec<BatchFailure>,
}

impl ChannelReport {
    pub fn is_partial(&self) -> bool {
        !self.failed_batches.is_empty()
    }
}

/// Resolves a channel reference and gathers per-video metrics for the channel's uploads.
#[derive(Debug, Clone)]
pub struct Pipeline<A> {
    api: A,
    retry: RetryPolicy,
    batch_concurrency: usize,
}

impl<A: YouTubeApi> Pipeline<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            retry: RetryPolicy::default(),
            batch_concurrency: 1,
        }
    }

    /// Sets how playlist page and video batch requests are retried.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets how many video batches may be requested at the same time. Values below 1 mean 1.
    pub fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    /// Runs resolution, channel lookup, playlist listing and metrics fetching, in that order.
    ///
    /// The first stage that fails ends the run. Video batches that fail after retrying do not;
    /// they are listed in [`ChannelReport::failed_batches`].
    #[tracing::instrument(skip(self, request), fields(reference = %request.reference, max_videos = request.max_videos))]
    pub async fn run(&self, request: &RunRequest) -> Result<ChannelReport, PipelineError> {
        let channel_id = resolve_channel_id(&request.reference, Some(&self.api)).await?;

        let channel = fetch_channel_summary(&self.api, &channel_id)
            .await
            .map_err(|error| PipelineError::Upstream {
                stage: "channel lookup",
                error,
            })?
            .ok_or_else(|| PipelineError::ChannelNotFound(channel_id.clone()))?;

        tracing::info!(
            channel_id = %channel.id,
            title = %channel.title,
            "found channel"
        );

        let Some(uploads) = channel.uploads_playlist_id.as_deref() else {
            tracing::info!(channel_id = %channel.id, "channel has no uploads playlist");
            return Err(PipelineError::NoUploads(channel.id));
        };

        let video_ids = collect_video_ids(
            &self.api,
            uploads,
            request.max_videos,
            &self.retry,
        )
        .await
        .map_err(|error| PipelineError::Upstream {
            stage: "playlist listing",
            error,
        })?;

        let outcome =
            fetch_video_records(&self.api, &video_ids, self.batch_concurrency, &self.retry).await;

        tracing::info!(
            channel_id = %channel.id,
            listed = video_ids.len(),
            analyzed = outcome.records.len(),
            failed_batches = outcome.failures.len(),
            "channel analysis done"
        );

        Ok(ChannelReport {
            channel,
            videos: outcome.records,
            failed_batches: outcome.failures,
        })
    }
}
