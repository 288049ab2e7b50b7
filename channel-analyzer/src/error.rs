use crate::resolver::ChannelId;

/// Why a channel reference could not be turned into a channel ID.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no channel reference given")]
    Empty,
    #[error("`{0}` is not a channel URL, handle or channel ID")]
    Unrecognized(String),
    #[error("cannot look up handle @{0} without access to channel search")]
    SearchUnavailable(String),
    #[error("no channel found for handle @{0}")]
    HandleNotFound(String),
    #[error("channel search failed: {0:#}")]
    Upstream(eyre::Report),
}

/// Why a pipeline run stopped before producing a report.
///
/// Each variant maps to one message the user can act on; see [`PipelineError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no channel reference given")]
    MissingReference,
    #[error("could not resolve channel reference")]
    Unresolved(#[source] ResolveError),
    #[error("channel {0} does not exist")]
    ChannelNotFound(ChannelId),
    #[error("channel {0} has no uploads playlist")]
    NoUploads(ChannelId),
    #[error("{stage} failed: {error:#}")]
    Upstream {
        stage: &'static str,
        error: eyre::Report,
    },
}

impl From<ResolveError> for PipelineError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Empty => PipelineError::MissingReference,
            ResolveError::Upstream(error) => PipelineError::Upstream {
                stage: "channel search",
                error,
            },
            e => PipelineError::Unresolved(e),
        }
    }
}

impl PipelineError {
    /// A message suitable for showing to the person who entered the channel reference.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingReference => {
                "Please enter a channel URL, @handle or channel ID.".to_string()
            }
            PipelineError::Unresolved(ResolveError::HandleNotFound(handle)) => {
                format!("No channel goes by the handle @{handle}. Check the spelling and try again.")
            }
            PipelineError::Unresolved(_) => {
                "That doesn't look like a channel URL, @handle or channel ID. \
                Try a link like https://www.youtube.com/channel/UC... or https://www.youtube.com/@name."
                    .to_string()
            }
            PipelineError::ChannelNotFound(id) => {
                format!("YouTube has no channel with ID {id}. Check the reference and try again.")
            }
            PipelineError::NoUploads(id) => {
                format!("Channel {id} has no public uploads to analyze.")
            }
            PipelineError::Upstream { stage, .. } => {
                format!("The YouTube API request failed ({stage}). Please try again later.")
            }
        }
    }
}
