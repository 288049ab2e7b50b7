//! YouTube Data API v3 client library.
//!
//! This module covers the four read-only calls needed to go from a channel to the statistics of
//! its videos:
//!
//! 1. `search.list` (type `channel`) to turn a handle like `@name` into a channel ID,
//! 2. `channels.list` to get a channel's statistics and the ID of its *uploads playlist*,
//! 3. `playlistItems.list` to page through that playlist, 50 videos at a time,
//! 4. `videos.list` to get snippet, statistics and content details for up to 50 videos at once.
//!
//! The calls are expressed as the [`YouTubeApi`] trait so that the pipeline stages built on top of
//! them can run against something other than the real API. [`YouTubeClient`] is the HTTP
//! implementation.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use channel_analyzer::youtube_api::{YouTubeApi, YouTubeClient};
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new("my-api-key", reqwest::Client::new());
//! let channels = client.list_channels("UC_x5XG1OV2P6uZZ5FSM9Ttw").await?;
//! for channel in channels.items {
//!     println!("{} ({})", channel.snippet.map(|s| s.title).unwrap_or_default(), channel.id);
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;

pub mod channels;
pub mod client;
pub(crate) mod lenient;
#[cfg(test)]
pub(crate) mod mock;
pub mod playlist_items;
pub mod search;
pub mod types;
pub mod videos;

pub use client::{ApiError, YouTubeClient};
pub use types::{PageInfo, PagedStream, Thumbnail, Thumbnails};

pub use channels::{Channel, ChannelListResponse, ChannelSnippet, ChannelStatistics};
pub use playlist_items::{PlaylistItem, PlaylistItemListResponse};
pub use search::{SearchListResponse, SearchResult};
pub use videos::{Video, VideoListResponse, VideoStatistics};

/// The YouTube Data API calls this crate depends on.
///
/// Every method is a single request/response round-trip. Failures of any kind (network, quota,
/// authentication, malformed responses) surface as an `Err`; callers decide whether to retry.
pub trait YouTubeApi: Sync {
    /// Search for channels matching `query`, returning at most `max_results` results.
    fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = eyre::Result<SearchListResponse>> + Send;

    /// Look up a single channel by ID.
    ///
    /// An unknown ID is not an error; the response simply contains no items.
    fn list_channels(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<ChannelListResponse>> + Send;

    /// Fetch one page of a playlist, continuing from `page_token` if given.
    fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> impl Future<Output = eyre::Result<PlaylistItemListResponse>> + Send;

    /// Fetch details for up to 50 videos.
    fn list_videos(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = eyre::Result<VideoListResponse>> + Send;
}

impl<T: YouTubeApi> YouTubeApi for &T {
    fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = eyre::Result<SearchListResponse>> + Send {
        (**self).search_channels(query, max_results)
    }

    fn list_channels(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<ChannelListResponse>> + Send {
        (**self).list_channels(channel_id)
    }

    fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> impl Future<Output = eyre::Result<PlaylistItemListResponse>> + Send {
        (**self).list_playlist_items(playlist_id, max_results, page_token)
    }

    fn list_videos(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = eyre::Result<VideoListResponse>> + Send {
        (**self).list_videos(video_ids)
    }
}
