//! YouTube Videos API types.

use crate::youtube_api::lenient;
use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `videos.list` API call.
///
/// Videos that are private, deleted or otherwise unavailable are silently left out of `items`, so
/// a request for 50 ids may return fewer than 50 videos.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#videoListResponse`.
    #[serde(default)]
    pub kind: String,
    /// A list of videos that match the request criteria. Items without a usable `id` are
    /// dropped.
    #[serde(default, deserialize_with = "lenient::items")]
    pub items: VecDeque<Video>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `video` resource represents a YouTube video.
///
/// Every part defaults to empty so that a video with missing, `null` or oddly typed fields still
/// parses; those values end up as zero counts, zero duration and an empty title.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    /// Basic details about the video, such as its title and thumbnails.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub snippet: VideoSnippet,
    /// Contains statistics about the video.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub statistics: VideoStatistics,
    /// Information about the video content, including its length.
    #[serde(rename = "contentDetails", default, deserialize_with = "lenient::or_default")]
    pub content_details: VideoContentDetails,
}

/// Basic details about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoSnippet {
    /// The date and time that the video was published.
    #[serde(rename = "publishedAt", default, deserialize_with = "lenient::timestamp")]
    pub published_at: Option<Timestamp>,
    /// The ID of the channel that the video was uploaded to.
    #[serde(rename = "channelId", default, deserialize_with = "lenient::string")]
    pub channel_id: Option<String>,
    /// The video's title.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Thumbnail images of the video.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub thumbnails: Thumbnails,
    /// Channel title for the channel that the video belongs to.
    #[serde(rename = "channelTitle", default, deserialize_with = "lenient::string")]
    pub channel_title: Option<String>,
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount", default, deserialize_with = "lenient::string")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    ///
    /// Absent when the uploader has hidden the like count.
    #[serde(rename = "likeCount", default, deserialize_with = "lenient::string")]
    pub like_count: Option<String>,
    /// The number of users who currently have the video marked as a favorite video.
    /// Note: This property is deprecated and always returns 0.
    #[serde(rename = "favoriteCount", default, deserialize_with = "lenient::string")]
    pub favorite_count: Option<String>,
    /// The number of comments for the video.
    ///
    /// Absent when comments are disabled.
    #[serde(rename = "commentCount", default, deserialize_with = "lenient::string")]
    pub comment_count: Option<String>,
}

/// Information about the video content.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration, e.g. `PT15M33S`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: Option<String>,
    /// Whether the video is available in high definition (`hd`) or only standard definition (`sd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Whether captions are available for the video (`"true"` or `"false"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}
