//! Core YouTube API client functionality.

use crate::youtube_api::{
    YouTubeApi, channels::ChannelListResponse, playlist_items::PlaylistItemListResponse,
    search::SearchListResponse, videos::VideoListResponse,
};
use eyre::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::instrument;

/// Where the YouTube Data API v3 lives.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// A non-success HTTP response from the YouTube API.
///
/// This is kept as a distinct type (rather than a formatted [`eyre::Report`]) so that callers can
/// look at the status code, e.g. to decide whether the request is worth retrying.
#[derive(Debug, thiserror::Error)]
#[error("YouTube API {endpoint} request failed with status {status}: {body}")]
pub struct ApiError {
    /// The API endpoint that was called, e.g. `videos`.
    pub endpoint: String,
    pub status: StatusCode,
    /// The raw response body, which for YouTube is a JSON error object.
    pub body: String,
}

impl ApiError {
    /// Whether the same request might succeed if sent again later.
    ///
    /// That is the case for rate limiting (429) and for server-side errors (5xx). Quota
    /// exhaustion is reported as 403 and is *not* transient within any reasonable retry window.
    pub fn is_transient(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS || self.status.is_server_error()
    }
}

/// Client for the read-only parts of the YouTube Data API v3.
///
/// All requests are authenticated with an API key, which is sufficient for reading public
/// channel and video metadata. The client is cheap to clone; clones share the underlying HTTP
/// connection pool.
#[derive(Clone)]
pub struct YouTubeClient {
    /// The API key sent along with every request.
    api_key: String,
    /// Base URL of the API, without a trailing slash.
    base_url: String,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a new YouTube API client that talks to [`DEFAULT_BASE_URL`].
    ///
    /// # Arguments
    ///
    /// * `api_key` - A YouTube Data API key
    /// * `client` - Shared HTTP client for making API requests. Any request timeout configured on
    ///   it applies to every API call.
    pub fn new(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Sends requests to `base_url` instead of the real YouTube API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a GET request to a YouTube API list endpoint and parses the JSON response.
    ///
    /// The API key is appended to `query_params`. Non-success responses are turned into an
    /// [`ApiError`] carrying the status code and response body.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("send request to YouTube API: {endpoint}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError {
                endpoint: endpoint.to_string(),
                status,
                body,
            }
            .into());
        }

        response
            .json()
            .await
            .with_context(|| format!("parse YouTube {endpoint} API response as JSON"))
    }
}

impl YouTubeApi for YouTubeClient {
    /// Searches for channels matching `query` using `search.list`.
    ///
    /// # API Cost
    ///
    /// This operation costs 100 quota units per call.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        let max_results_string = max_results.to_string();
        let query_params = [
            ("part", "snippet"),
            ("type", "channel"),
            ("q", query),
            ("maxResults", max_results_string.as_str()),
        ];

        let results: SearchListResponse = self.get_json("search", &query_params).await?;

        tracing::debug!(
            query,
            total_results = results.page_info.total_results,
            returned_items = results.items.len(),
            "searched channels"
        );

        Ok(results)
    }

    /// Looks up a channel by ID using `channels.list`, including its snippet, statistics and
    /// content details.
    ///
    /// # API Cost
    ///
    /// This operation costs 1 quota unit per call.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    async fn list_channels(&self, channel_id: &str) -> eyre::Result<ChannelListResponse> {
        let query_params = [
            ("part", "contentDetails,snippet,statistics"),
            ("id", channel_id),
        ];

        let channels: ChannelListResponse = self.get_json("channels", &query_params).await?;

        tracing::debug!(
            channel_id,
            returned_items = channels.items.len(),
            "fetched channel"
        );

        Ok(channels)
    }

    /// Fetches one page of a playlist's items using `playlistItems.list`.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist to list, e.g. a channel's uploads playlist
    /// * `max_results` - Maximum number of items to return (1-50)
    /// * `page_token` - Token for retrieving a specific page of results
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
        }

        let items: PlaylistItemListResponse =
            self.get_json("playlistItems", &query_params).await?;

        tracing::debug!(
            playlist_id,
            total_results = items.page_info.total_results,
            returned_items = items.items.len(),
            has_next_page = items.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(items)
    }

    /// Fetches snippet, statistics and content details for up to 50 videos using `videos.list`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, video_ids), fields(requested = video_ids.len()))]
    async fn list_videos(&self, video_ids: &[String]) -> eyre::Result<VideoListResponse> {
        let ids = video_ids.join(",");
        let query_params = [("part", "snippet,statistics,contentDetails"), ("id", &*ids)];

        let videos: VideoListResponse = self.get_json("videos", &query_params).await?;

        tracing::debug!(
            requested = video_ids.len(),
            returned_items = videos.items.len(),
            "fetched video details"
        );

        Ok(videos)
    }
}
