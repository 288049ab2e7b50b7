//! In-memory stand-in for the YouTube API, for testing the pipeline stages.
//!
//! The mock serves canned channels, playlists and videos, records every call it receives, and can
//! be told to fail specific calls with a given HTTP status.

use crate::youtube_api::{
    ApiError, ChannelListResponse, PlaylistItemListResponse, SearchListResponse,
    VideoListResponse, YouTubeApi,
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// A call received by [`MockYouTube`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Search { query: String, max_results: u32 },
    Channels(String),
    PlaylistItems {
        playlist_id: String,
        page_token: Option<String>,
    },
    Videos(Vec<String>),
}

/// Which endpoint a queued failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Endpoint {
    Search,
    Channels,
    PlaylistItems,
    Videos,
}

#[derive(Debug, Default)]
pub(crate) struct MockYouTube {
    search_results: HashMap<String, Vec<Value>>,
    channels: HashMap<String, Value>,
    /// Pages of video ids, per playlist.
    playlists: HashMap<String, Vec<Vec<String>>>,
    videos: HashMap<String, Value>,
    /// Any `videos.list` call that includes one of these ids fails with a 500.
    poisoned_videos: HashSet<String>,
    /// The next calls to an endpoint fail with these statuses, in order.
    queued_failures: Mutex<HashMap<Endpoint, VecDeque<StatusCode>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockYouTube {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_search_result(mut self, query: &str, channel_id: &str) -> Self {
        self.search_results
            .entry(query.to_string())
            .or_default()
            .push(json!({
                "kind": "youtube#searchResult",
                "id": { "kind": "youtube#channel", "channelId": channel_id },
                "snippet": { "channelId": channel_id, "title": format!("Channel {channel_id}") }
            }));
        self
    }

    /// Registers a channel resource as it would be returned by `channels.list`.
    pub(crate) fn with_channel(mut self, channel: Value) -> Self {
        let id = channel["id"]
            .as_str()
            .expect("channel resource needs an id")
            .to_string();
        self.channels.insert(id, channel);
        self
    }

    /// Registers a playlist served in the given pages.
    pub(crate) fn with_playlist_pages(mut self, playlist_id: &str, pages: Vec<Vec<String>>) -> Self {
        self.playlists.insert(playlist_id.to_string(), pages);
        self
    }

    /// Registers a playlist of `count` videos named `vid-000`, `vid-001`, ... in pages of 50.
    ///
    /// A minimal video resource is registered for each of them too.
    pub(crate) fn with_uploads(mut self, playlist_id: &str, count: usize) -> Self {
        let ids: Vec<String> = (0..count).map(|i| format!("vid-{i:03}")).collect();
        for (i, id) in ids.iter().enumerate() {
            let views = 1000 + i as u64;
            self = self.with_video(video_json(id, Some(views), Some(10), Some(5), Some("PT1M")));
        }
        let pages = ids.chunks(50).map(<[String]>::to_vec).collect();
        self.with_playlist_pages(playlist_id, pages)
    }

    /// Registers a video resource as it would be returned by `videos.list`.
    pub(crate) fn with_video(mut self, video: Value) -> Self {
        let id = video["id"]
            .as_str()
            .expect("video resource needs an id")
            .to_string();
        self.videos.insert(id, video);
        self
    }

    pub(crate) fn with_poisoned_video(mut self, video_id: &str) -> Self {
        self.poisoned_videos.insert(video_id.to_string());
        self
    }

    /// Makes the next `times` calls to `endpoint` fail with `status`.
    pub(crate) fn fail_next(self, endpoint: Endpoint, status: StatusCode, times: usize) -> Self {
        self.queued_failures
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .extend(std::iter::repeat_n(status, times));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count_calls(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (call, endpoint),
                    (Call::Search { .. }, Endpoint::Search)
                        | (Call::Channels(_), Endpoint::Channels)
                        | (Call::PlaylistItems { .. }, Endpoint::PlaylistItems)
                        | (Call::Videos(_), Endpoint::Videos)
                )
            })
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn queued_failure(&self, endpoint: Endpoint) -> eyre::Result<()> {
        let status = self
            .queued_failures
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        match status {
            Some(status) => Err(api_error(endpoint, status)),
            None => Ok(()),
        }
    }
}

fn api_error(endpoint: Endpoint, status: StatusCode) -> eyre::Report {
    ApiError {
        endpoint: format!("{endpoint:?}"),
        status,
        body: r#"{"error":{"message":"mock failure"}}"#.to_string(),
    }
    .into()
}

/// A `videos.list` item. `None` leaves the corresponding field out entirely.
pub(crate) fn video_json(
    id: &str,
    views: Option<u64>,
    likes: Option<u64>,
    comments: Option<u64>,
    duration: Option<&str>,
) -> Value {
    let mut statistics = serde_json::Map::new();
    if let Some(views) = views {
        statistics.insert("viewCount".into(), json!(views.to_string()));
    }
    if let Some(likes) = likes {
        statistics.insert("likeCount".into(), json!(likes.to_string()));
    }
    if let Some(comments) = comments {
        statistics.insert("commentCount".into(), json!(comments.to_string()));
    }
    let mut content_details = serde_json::Map::new();
    if let Some(duration) = duration {
        content_details.insert("duration".into(), json!(duration));
    }
    json!({
        "kind": "youtube#video",
        "id": id,
        "snippet": {
            "publishedAt": "2024-03-09T17:45:00Z",
            "title": format!("Video {id}"),
            "thumbnails": {
                "default": { "url": format!("https://i.ytimg.com/vi/{id}/default.jpg") },
                "high": { "url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg") }
            }
        },
        "statistics": statistics,
        "contentDetails": content_details,
    })
}

/// A `channels.list` item with all three parts filled in.
pub(crate) fn channel_json(id: &str, uploads: &str) -> Value {
    json!({
        "kind": "youtube#channel",
        "id": id,
        "snippet": {
            "title": "Test Channel",
            "publishedAt": "2012-01-01T00:00:00Z",
            "thumbnails": {
                "default": { "url": "https://yt3.ggpht.com/test=s88" },
                "high": { "url": "https://yt3.ggpht.com/test=s800" }
            }
        },
        "contentDetails": { "relatedPlaylists": { "uploads": uploads } },
        "statistics": {
            "viewCount": "123456",
            "subscriberCount": "7890",
            "hiddenSubscriberCount": false,
            "videoCount": "130"
        }
    })
}

impl YouTubeApi for MockYouTube {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        self.record(Call::Search {
            query: query.to_string(),
            max_results,
        });
        self.queued_failure(Endpoint::Search)?;
        let items: Vec<Value> = self
            .search_results
            .get(query)
            .map(|results| results.iter().take(max_results as usize).cloned().collect())
            .unwrap_or_default();
        Ok(serde_json::from_value(json!({
            "kind": "youtube#searchListResponse",
            "pageInfo": { "totalResults": items.len(), "resultsPerPage": max_results },
            "items": items,
        }))?)
    }

    async fn list_channels(&self, channel_id: &str) -> eyre::Result<ChannelListResponse> {
        self.record(Call::Channels(channel_id.to_string()));
        self.queued_failure(Endpoint::Channels)?;
        let items: Vec<Value> = self.channels.get(channel_id).cloned().into_iter().collect();
        Ok(serde_json::from_value(json!({
            "kind": "youtube#channelListResponse",
            "pageInfo": { "totalResults": items.len(), "resultsPerPage": 5 },
            "items": items,
        }))?)
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        self.record(Call::PlaylistItems {
            playlist_id: playlist_id.to_string(),
            page_token: page_token.map(str::to_string),
        });
        self.queued_failure(Endpoint::PlaylistItems)?;
        let Some(pages) = self.playlists.get(playlist_id) else {
            return Err(api_error(Endpoint::PlaylistItems, StatusCode::NOT_FOUND));
        };
        let page = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| api_error(Endpoint::PlaylistItems, StatusCode::BAD_REQUEST))?,
        };
        let ids = pages.get(page).cloned().unwrap_or_default();
        assert!(ids.len() <= max_results as usize, "page larger than maxResults");
        let items: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "kind": "youtube#playlistItem",
                    "id": format!("item-{id}"),
                    "contentDetails": { "videoId": id, "videoPublishedAt": "2024-03-09T17:45:00Z" }
                })
            })
            .collect();
        let next_page_token = (page + 1 < pages.len()).then(|| format!("page-{}", page + 1));
        Ok(serde_json::from_value(json!({
            "kind": "youtube#playlistItemListResponse",
            "pageInfo": {
                "totalResults": pages.iter().map(Vec::len).sum::<usize>(),
                "resultsPerPage": max_results
            },
            "items": items,
            "nextPageToken": next_page_token,
        }))?)
    }

    async fn list_videos(&self, video_ids: &[String]) -> eyre::Result<VideoListResponse> {
        self.record(Call::Videos(video_ids.to_vec()));
        self.queued_failure(Endpoint::Videos)?;
        assert!(video_ids.len() <= 50, "videos.list accepts at most 50 ids");
        if video_ids.iter().any(|id| self.poisoned_videos.contains(id)) {
            return Err(api_error(Endpoint::Videos, StatusCode::INTERNAL_SERVER_ERROR));
        }
        // unknown ids are left out, like YouTube does for private or deleted videos
        let items: Vec<Value> = video_ids
            .iter()
            .filter_map(|id| self.videos.get(id).cloned())
            .collect();
        Ok(serde_json::from_value(json!({
            "kind": "youtube#videoListResponse",
            "pageInfo": { "totalResults": items.len(), "resultsPerPage": items.len() },
            "items": items,
        }))?)
    }
}
