//! Projection of episodes into the inline-query answer understood by the
//! messaging gateway.

use serde::Serialize;

use crate::types::Episode;

/// Seconds the gateway may cache an answer, applied to every response
pub const CACHE_TIME_SECS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineAnswer {
    pub inline_query_id: String,
    pub results: Vec<InlineResult>,
    pub cache_time: u32,
}

impl InlineAnswer {
    pub fn new(inline_query_id: impl Into<String>, episodes: Vec<Episode>) -> Self {
        InlineAnswer {
            inline_query_id: inline_query_id.into(),
            results: episodes.into_iter().map(InlineResult::from).collect(),
            cache_time: CACHE_TIME_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineResult {
    /// Rich result the client embeds as a playable video
    Video {
        id: String,
        video_url: String,
        mime_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<String>,
        title: String,
        caption: String,
        description: String,
    },
    /// Result that sends only the media url as text, for media the client
    /// cannot embed
    Link {
        id: String,
        title: String,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<String>,
        input_message_content: InputTextMessageContent,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    pub parse_mode: &'static str,
}

impl InlineResult {
    pub fn id(&self) -> &str {
        match self {
            InlineResult::Video { id, .. } | InlineResult::Link { id, .. } => id,
        }
    }
}

impl From<Episode> for InlineResult {
    fn from(episode: Episode) -> Self {
        let Episode {
            id,
            title,
            description,
            media_url,
            mime_type,
            thumbnail_url,
            render_as_link_only,
            ..
        } = episode;

        if render_as_link_only {
            InlineResult::Link {
                id,
                title,
                description,
                thumbnail_url,
                input_message_content: InputTextMessageContent {
                    message_text: media_url,
                    parse_mode: "Markdown",
                },
            }
        } else {
            InlineResult::Video {
                id,
                video_url: media_url,
                mime_type,
                thumbnail_url,
                title,
                caption: description.clone(),
                description,
            }
        }
    }
}
