#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Feed {url} responded with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedFeed(reason.into())
    }

    /// Whether the feed could not be retrieved, as opposed to being retrieved
    /// in an unexpected shape
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::HttpStatus { .. })
    }
}

impl From<roxmltree::Error> for Error {
    fn from(value: roxmltree::Error) -> Self {
        Error::MalformedFeed(format!("invalid XML: {value}"))
    }
}
