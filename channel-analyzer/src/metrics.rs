//! Per-video metrics: fetching video details in batches and normalizing them into
//! [`VideoRecord`]s.

use crate::channel_info::parse_count;
use crate::retry::RetryPolicy;
use crate::youtube_api::{Video, YouTubeApi};
use eyre::Context;
use futures::StreamExt;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Span, SpanRelativeTo, Unit};
use serde::{Deserialize, Serialize};

/// The most video IDs `videos.list` accepts in one request.
pub const BATCH_SIZE: usize = 50;

/// One row of the result set.
///
/// Field names in serialized form are the dashboard's column headers, and the field order is
/// the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "Video ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// The UTC calendar date the video was published on.
    #[serde(rename = "Published")]
    pub published: Option<Date>,
    #[serde(rename = "Views")]
    pub views: u64,
    #[serde(rename = "Likes")]
    pub likes: u64,
    #[serde(rename = "Comments")]
    pub comments: u64,
    /// `(likes + comments) / views` as a percentage, rounded to 3 decimals. 0 for unviewed videos.
    #[serde(rename = "Engagement %")]
    pub engagement_pct: f64,
    /// Length in minutes, rounded to 2 decimals.
    #[serde(rename = "Duration (min)")]
    pub duration_min: f64,
    #[serde(rename = "Thumbnail")]
    pub thumbnail_url: String,
    /// Short link to the video.
    #[serde(rename = "URL")]
    pub url: String,
}

impl VideoRecord {
    /// Normalizes a `videos.list` item. Missing counts become 0, a missing duration becomes 0
    /// minutes, and a missing title becomes empty.
    pub fn from_video(video: Video) -> Self {
        let views = parse_count(video.statistics.view_count.as_deref());
        let likes = parse_count(video.statistics.like_count.as_deref());
        let comments = parse_count(video.statistics.comment_count.as_deref());

        let duration_min = match video.content_details.duration.as_deref() {
            None => 0.0,
            Some(iso) => duration_minutes(iso).unwrap_or_else(|e| {
                tracing::warn!(video_id = %video.id, duration = iso, error = %e, "unparseable video duration");
                0.0
            }),
        };

        Self {
            title: video.snippet.title,
            published: video
                .snippet
                .published_at
                .map(|at| at.to_zoned(TimeZone::UTC).date()),
            views,
            likes,
            comments,
            engagement_pct: engagement_pct(views, likes, comments),
            duration_min,
            thumbnail_url: video
                .snippet
                .thumbnails
                .preferred_url()
                .unwrap_or_default()
                .to_string(),
            url: watch_url(&video.id),
            id: video.id,
        }
    }
}

/// The canonical short link for a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://youtu.be/{video_id}")
}

/// `(likes + comments) / views × 100`, rounded to 3 decimals, or 0 if the video has no views.
pub fn engagement_pct(views: u64, likes: u64, comments: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    let interactions = likes.saturating_add(comments) as f64;
    round_to(interactions / views as f64 * 100.0, 3)
}

/// Converts an ISO 8601 duration such as `PT4M13S` to minutes, rounded to 2 decimals.
///
/// Days are taken to be 24 hours long; YouTube uses them for streams longer than a day
/// (`P1DT2H3M4S`).
pub fn duration_minutes(iso: &str) -> eyre::Result<f64> {
    let span: Span = iso
        .parse()
        .with_context(|| format!("parse ISO 8601 duration {iso:?}"))?;
    let seconds = span
        .total((Unit::Second, SpanRelativeTo::days_are_24_hours()))
        .with_context(|| format!("convert duration {iso:?} to seconds"))?;
    Ok(round_to(seconds.max(0.0) / 60.0, 2))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// A batch whose `videos.list` request failed even after retrying.
///
/// Its videos are missing from [`BatchOutcome::records`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// Position of the batch among all batches, starting at 0.
    pub index: usize,
    pub video_ids: Vec<String>,
    pub error: String,
}

/// The result of fetching metrics for a list of videos.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// One record per video YouTube returned, in request order.
    pub records: Vec<VideoRecord>,
    pub failures: Vec<BatchFailure>,
}

/// Fetches and normalizes metrics for `video_ids`.
///
/// The IDs are split into consecutive batches of [`BATCH_SIZE`], and one `videos.list` request is
/// made per batch, each retried according to `retry`. Up to `concurrency` batches are in flight
/// at once; records still come out in batch order, and within a batch in response order.
///
/// Videos YouTube does not return (private, deleted) are skipped. A batch that keeps failing is
/// reported in [`BatchOutcome::failures`] and contributes no records.
#[tracing::instrument(skip(api, video_ids, retry), fields(videos = video_ids.len()))]
pub async fn fetch_video_records<A: YouTubeApi>(
    api: &A,
    video_ids: &[String],
    concurrency: usize,
    retry: &RetryPolicy,
) -> BatchOutcome {
    let requests = video_ids
        .chunks(BATCH_SIZE)
        .enumerate()
        .map(move |(index, batch)| async move {
            let result = retry
                .run("videos.list", || api.list_videos(batch))
                .await
                .with_context(|| format!("fetch details for video batch {index}"));
            (index, batch, result)
        });

    // `buffered` yields in input order no matter which request finishes first
    let responses = futures::stream::iter(requests).buffered(concurrency.max(1));
    let mut responses = std::pin::pin!(responses);

    let mut outcome = BatchOutcome::default();
    while let Some((index, batch, result)) = responses.next().await {
        match result {
            Ok(response) => {
                tracing::trace!(
                    batch = index,
                    requested = batch.len(),
                    returned_items = response.items.len(),
                    "fetched video batch"
                );
                outcome
                    .records
                    .extend(response.items.into_iter().map(VideoRecord::from_video));
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(
                    batch = index,
                    videos = batch.len(),
                    error = %error,
                    "giving up on video batch; its videos will be missing"
                );
                outcome.failures.push(BatchFailure {
                    index,
                    video_ids: batch.to_vec(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        records = outcome.records.len(),
        failed_batches = outcome.failures.len(),
        "fetched video metrics"
    );
    outcome
}
