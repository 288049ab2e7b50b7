//! Channel-level metadata: title, logo, totals, and the uploads playlist.

use crate::resolver::ChannelId;
use crate::youtube_api::{Channel, YouTubeApi};
use eyre::Context;
use serde::Serialize;

/// What the dashboard header shows about a channel, plus where to find its videos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub title: String,
    /// The playlist holding every public upload of the channel. `None` when YouTube lists no
    /// uploads playlist for it, in which case there is nothing to analyze.
    pub uploads_playlist_id: Option<String>,
    pub video_count: u64,
    pub view_count: u64,
    /// `None` when the channel hides its subscriber count.
    pub subscriber_count: Option<u64>,
    pub logo_url: Option<String>,
}

/// Parses one of YouTube's stringly-typed counters, treating anything missing or malformed as 0.
pub(crate) fn parse_count(count: Option<&str>) -> u64 {
    count.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

impl ChannelSummary {
    fn from_channel(channel: Channel) -> Self {
        let uploads_playlist_id = channel
            .content_details
            .and_then(|details| details.related_playlists.uploads)
            .filter(|uploads| !uploads.is_empty());

        let (title, logo_url) = match channel.snippet {
            Some(snippet) => {
                let logo_url = snippet.thumbnails.preferred_url().map(str::to_string);
                (snippet.title, logo_url)
            }
            None => (String::new(), None),
        };

        let statistics = channel.statistics.unwrap_or_default();
        let subscriber_count = if statistics.hidden_subscriber_count {
            None
        } else {
            statistics
                .subscriber_count
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
        };

        Self {
            id: ChannelId::new(channel.id),
            title,
            uploads_playlist_id,
            video_count: parse_count(statistics.video_count.as_deref()),
            view_count: parse_count(statistics.view_count.as_deref()),
            subscriber_count,
            logo_url,
        }
    }
}

/// Looks up a channel's summary.
///
/// Returns `Ok(None)` if YouTube knows no channel with this ID. Only transport failures are
/// errors; a channel without an uploads playlist comes back with `uploads_playlist_id: None`.
#[tracing::instrument(skip(api), fields(channel_id = %channel_id))]
pub async fn fetch_channel_summary<A: YouTubeApi>(
    api: &A,
    channel_id: &ChannelId,
) -> eyre::Result<Option<ChannelSummary>> {
    let response = api
        .list_channels(channel_id.as_str())
        .await
        .context("fetch channel details")?;

    let Some(channel) = response.items.into_iter().next() else {
        tracing::info!("channel not found");
        return Ok(None);
    };

    let summary = ChannelSummary::from_channel(channel);
    tracing::debug!(
        title = %summary.title,
        uploads = ?summary.uploads_playlist_id,
        videos = summary.video_count,
        "fetched channel summary"
    );
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::mock::{MockYouTube, channel_json};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ID: &str = "UC_x5XG1OV2P6uZZ5FSM9Ttw";

    #[tokio::test]
    async fn summary_from_full_channel() {
        let yt = MockYouTube::new().with_channel(channel_json(ID, "UU_x5XG1OV2P6uZZ5FSM9Ttw"));
        let summary = fetch_channel_summary(&yt, &ChannelId::new(ID))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            summary,
            ChannelSummary {
                id: ChannelId::new(ID),
                title: "Test Channel".to_string(),
                uploads_playlist_id: Some("UU_x5XG1OV2P6uZZ5FSM9Ttw".to_string()),
                video_count: 130,
                view_count: 123456,
                subscriber_count: Some(7890),
                logo_url: Some("https://yt3.ggpht.com/test=s800".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn unknown_channel_is_none() {
        let yt = MockYouTube::new();
        let summary = fetch_channel_summary(&yt, &ChannelId::new(ID)).await.unwrap();
        assert_eq!(summary, None);
    }

    #[tokio::test]
    async fn hidden_subscribers_and_default_logo() {
        let yt = MockYouTube::new().with_channel(json!({
            "id": ID,
            "snippet": {
                "title": "Quiet Channel",
                "thumbnails": { "default": { "url": "https://yt3.ggpht.com/q=s88" } }
            },
            "contentDetails": { "relatedPlaylists": { "uploads": "UUquiet" } },
            "statistics": {
                "viewCount": "10",
                "subscriberCount": "0",
                "hiddenSubscriberCount": true,
                "videoCount": "1"
            }
        }));
        let summary = fetch_channel_summary(&yt, &ChannelId::new(ID))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.subscriber_count, None);
        assert_eq!(summary.logo_url.as_deref(), Some("https://yt3.ggpht.com/q=s88"));
        assert_eq!(summary.view_count, 10);
    }

    #[tokio::test]
    async fn missing_statistics_default_to_zero() {
        let yt = MockYouTube::new().with_channel(json!({
            "id": ID,
            "contentDetails": { "relatedPlaylists": { "uploads": "UUbare" } }
        }));
        let summary = fetch_channel_summary(&yt, &ChannelId::new(ID))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.title, "");
        assert_eq!(summary.video_count, 0);
        assert_eq!(summary.view_count, 0);
        assert_eq!(summary.subscriber_count, None);
        assert_eq!(summary.logo_url, None);
    }

    #[tokio::test]
    async fn channel_without_uploads_playlist_has_no_uploads() {
        let yt = MockYouTube::new()
            .with_channel(json!({ "id": ID, "snippet": { "title": "x" } }))
            .with_channel(json!({
                "id": "UCemptyuploadsxxxxxxxxxx",
                "contentDetails": { "relatedPlaylists": { "uploads": "" } }
            }));

        let summary = fetch_channel_summary(&yt, &ChannelId::new(ID))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.title, "x");
        assert_eq!(summary.uploads_playlist_id, None);

        let summary = fetch_channel_summary(&yt, &ChannelId::new("UCemptyuploadsxxxxxxxxxx"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.uploads_playlist_id, None);
    }

    #[test]
    fn counts_parse_leniently() {
        assert_eq!(parse_count(Some("42")), 42);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(Some("-3")), 0);
        assert_eq!(parse_count(None), 0);
    }
}
