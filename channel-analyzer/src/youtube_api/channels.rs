//! YouTube Channels API types.

use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// When no channel matches the requested id, YouTube leaves out `items` entirely rather than
/// sending an empty list, so it defaults to empty here.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#channelListResponse`.
    #[serde(default)]
    pub kind: String,
    /// A list of channels that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `channel` resource contains information about a YouTube channel.
///
/// Only the parts requested by this crate (`snippet`, `statistics` and `contentDetails`) are
/// modelled. Each of them is optional in the response, depending on which parts were asked for.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    /// Basic details about the channel, such as its title and thumbnails.
    pub snippet: Option<ChannelSnippet>,
    /// Channel-level view, subscriber and video counts.
    pub statistics: Option<ChannelStatistics>,
    /// Playlists associated with the channel.
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

/// The snippet object contains basic details about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelSnippet {
    /// The channel's title.
    #[serde(default)]
    pub title: String,
    /// The channel's description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The channel's handle, e.g. `@GoogleDevelopers`.
    #[serde(rename = "customUrl", skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    /// The date and time that the channel was created.
    #[serde(rename = "publishedAt")]
    pub published_at: Option<Timestamp>,
    /// Channel logos in various resolutions.
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Statistics for the channel.
///
/// YouTube reports all counts as decimal strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChannelStatistics {
    /// The number of times the channel has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of subscribers that the channel has, rounded down to three significant figures.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    /// Whether the channel's subscriber count is publicly visible.
    #[serde(rename = "hiddenSubscriberCount", default)]
    pub hidden_subscriber_count: bool,
    /// The number of public videos uploaded to the channel.
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

/// The `contentDetails` object encapsulates information about the channel's content.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#contentDetails>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists", default)]
    pub related_playlists: RelatedPlaylists,
}

/// Playlists associated with the channel.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The ID of the playlist that contains the channel's uploaded videos.
    pub uploads: Option<String>,
    /// The ID of the playlist that contains the channel's liked videos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
}
