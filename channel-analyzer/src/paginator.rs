//! Walking a channel's uploads playlist.

use crate::retry::RetryPolicy;
use crate::youtube_api::{PagedStream, YouTubeApi};
use eyre::Context;
use std::collections::VecDeque;
use tokio_stream::{Stream, StreamExt};

/// The most items `playlistItems.list` returns per page.
pub const PAGE_SIZE: u32 = 50;

/// Default number of videos to collect from a channel.
pub const DEFAULT_VIDEO_CAP: usize = 120;

/// Streams the video IDs of a playlist, in playlist order, fetching pages of [`PAGE_SIZE`] as
/// they are needed.
///
/// Each page request is retried according to `retry`. A page that still fails ends the stream
/// with that error.
pub fn playlist_video_ids<'a, A: YouTubeApi>(
    api: &'a A,
    playlist_id: &'a str,
    retry: &'a RetryPolicy,
) -> impl Stream<Item = eyre::Result<String>> + 'a {
    PagedStream::new(move |page_token: Option<String>| async move {
        let token = page_token.as_deref();
        let page = retry
            .run("playlistItems.list", || {
                api.list_playlist_items(playlist_id, PAGE_SIZE, token)
            })
            .await
            .with_context(|| format!("list items of playlist {playlist_id}"))?;

        let ids: VecDeque<String> = page
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect();
        Ok((ids, page.next_page_token))
    })
}

/// Collects at most `cap` video IDs from a playlist.
///
/// The listing stops as soon as `cap` IDs are held: surplus IDs on the last page are dropped
/// and no further page is requested. It also stops, possibly below `cap`, when YouTube reports
/// no next page.
#[tracing::instrument(skip(api, retry))]
pub async fn collect_video_ids<A: YouTubeApi>(
    api: &A,
    playlist_id: &str,
    cap: usize,
    retry: &RetryPolicy,
) -> eyre::Result<Vec<String>> {
    let ids = playlist_video_ids(api, playlist_id, retry).take(cap);
    let mut ids = std::pin::pin!(ids);

    let mut collected = Vec::with_capacity(cap.min(1000));
    while let Some(id) = ids.next().await {
        collected.push(id?);
    }

    tracing::debug!(collected = collected.len(), "collected playlist video ids");
    Ok(collected)
}
