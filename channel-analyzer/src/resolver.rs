//! Turning whatever the user typed into a canonical channel ID.
//!
//! Accepted forms, checked in this order:
//!
//! 1. anything containing `/channel/<ID>`, e.g. `https://www.youtube.com/channel/UC...?si=x`,
//! 2. anything containing `/@<handle>`, e.g. `https://www.youtube.com/@name/videos`, or a bare
//!    `@handle`. Handles are looked up with a channel search,
//! 3. a raw 24-character channel ID.

use crate::error::ResolveError;
use crate::youtube_api::YouTubeApi;
use serde::Serialize;
use std::fmt;

const CHANNEL_MARKER: &str = "/channel/";
const HANDLE_MARKER: &str = "/@";
const CHANNEL_ID_LEN: usize = 24;

/// The canonical identifier of a YouTube channel, e.g. `UC_x5XG1OV2P6uZZ5FSM9Ttw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Accepts `s` only if it has the shape of a channel ID: exactly 24 characters from
    /// `[A-Za-z0-9_-]`.
    pub fn parse_raw(s: &str) -> Option<Self> {
        let well_formed = s.len() == CHANNEL_ID_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a channel reference turned out to contain, before any network lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReference {
    /// The reference names the channel directly.
    Id(ChannelId),
    /// The reference names the channel by handle (without the leading `@`).
    Handle(String),
}

/// Classifies a channel reference without talking to YouTube.
pub fn parse_reference(reference: &str) -> Result<ParsedReference, ResolveError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ResolveError::Empty);
    }

    if let Some((_, rest)) = reference.rsplit_once(CHANNEL_MARKER) {
        let id = rest
            .split(['?', '#', '/'])
            .next()
            .unwrap_or_default();
        if id.is_empty() {
            return Err(ResolveError::Unrecognized(reference.to_string()));
        }
        return Ok(ParsedReference::Id(ChannelId::new(id)));
    }

    let handle = if let Some((_, rest)) = reference.split_once(HANDLE_MARKER) {
        Some(leading_handle(rest))
    } else {
        reference
            .strip_prefix('@')
            .filter(|rest| leading_handle(rest) == *rest)
            .map(leading_handle)
    };
    if let Some(handle) = handle.filter(|handle| !handle.is_empty()) {
        return Ok(ParsedReference::Handle(handle.to_string()));
    }

    ChannelId::parse_raw(reference)
        .map(ParsedReference::Id)
        .ok_or_else(|| ResolveError::Unrecognized(reference.to_string()))
}

/// The longest prefix of `s` made of characters YouTube allows in handles.
fn leading_handle(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        .unwrap_or(s.len());
    &s[..end]
}

/// Resolves a channel reference to a channel ID.
///
/// Handle references need `search` to look the handle up; exactly one `search.list` call is
/// made for them. All other forms are resolved locally.
#[tracing::instrument(skip(search))]
pub async fn resolve_channel_id<A: YouTubeApi>(
    reference: &str,
    search: Option<&A>,
) -> Result<ChannelId, ResolveError> {
    let handle = match parse_reference(reference)? {
        ParsedReference::Id(id) => {
            tracing::debug!(channel_id = %id, "channel reference names channel directly");
            return Ok(id);
        }
        ParsedReference::Handle(handle) => handle,
    };

    let Some(search) = search else {
        return Err(ResolveError::SearchUnavailable(handle));
    };

    let results = search
        .search_channels(&handle, 1)
        .await
        .map_err(ResolveError::Upstream)?;

    let id = results
        .items
        .iter()
        .find_map(|result| result.channel_id())
        .map(ChannelId::new)
        .ok_or_else(|| ResolveError::HandleNotFound(handle.clone()))?;

    tracing::debug!(handle, channel_id = %id, "resolved channel handle");
    Ok(id)
}
