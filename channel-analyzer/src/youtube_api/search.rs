//! YouTube Search API types.

use crate::youtube_api::types::{PageInfo, Thumbnails};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#searchListResponse`.
    #[serde(default)]
    pub kind: String,
    /// A list of results that match the search criteria.
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A search result points at a single video, channel or playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    #[serde(default)]
    pub snippet: SearchResultSnippet,
}

impl SearchResult {
    /// The channel this result belongs to.
    ///
    /// For channel results this is the channel itself.
    pub fn channel_id(&self) -> Option<&str> {
        self.snippet
            .channel_id
            .as_deref()
            .or(self.id.channel_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Identifies the resource that matched the search request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultId {
    /// The type of the resource, e.g. `youtube#channel`.
    pub kind: String,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "playlistId")]
    pub playlist_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchResultSnippet {
    /// The channel that published the resource.
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}
