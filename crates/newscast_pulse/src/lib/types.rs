use chrono::{DateTime, Utc};
use serde::Serialize;

/// Newest unit of media of a show, normalized from either feed shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    /// guid of the podcast item or id of the video. Clients use it to tell
    /// results apart.
    pub id: String,
    pub title: String,
    pub description: String,
    pub media_url: String,
    pub mime_type: String,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub render_as_link_only: bool,
}

impl Episode {
    pub const HTML_MIME_TYPE: &'static str = "text/html";

    pub fn with_link_only(mut self, link_only: bool) -> Self {
        self.render_as_link_only = link_only;
        self
    }
}
