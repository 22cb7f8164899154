pub mod fetcher;

use std::{borrow::Cow, future::Future, ops::Deref};

use crate::error::Error;

/// Retrieves raw feed documents. Implementations perform exactly one request
/// per call and never cache.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = anyhow::Result<FeedDocument>> + Send;
}

impl<T: FeedFetcher + Send + Sync> FeedFetcher for &T {
    async fn fetch(&self, url: &str) -> anyhow::Result<FeedDocument> {
        (**self).fetch(url).await
    }
}

/// Raw bytes of a fetched RSS or Atom document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument(Vec<u8>);

impl Deref for FeedDocument {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FeedDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        FeedDocument(bytes)
    }

    /// Decodes the document as text using the encoding named in its XML
    /// declaration.
    ///
    /// UTF-8 (the default) is borrowed as is. ISO-8859-1 and US-ASCII are
    /// widened byte by byte. Any other declared encoding is read as UTF-8.
    pub fn text(&self) -> Result<Cow<'_, str>, Error> {
        match declared_encoding(&self.0).as_deref() {
            Some("iso-8859-1" | "iso_8859-1" | "latin1" | "latin-1" | "l1" | "us-ascii" | "ascii") => {
                Ok(Cow::Owned(self.0.iter().copied().map(char::from).collect()))
            }
            _ => std::str::from_utf8(&self.0)
                .map(Cow::Borrowed)
                .map_err(|e| Error::malformed(format!("feed is not valid UTF-8: {e}"))),
        }
    }
}

/// Lowercased `encoding` pseudo-attribute of a leading `<?xml ...?>`
/// declaration
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&rest[..end]).ok()?;

    let (_, value) = declaration.split_once("encoding")?;
    let value = value.trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|c| matches!(*c, '"' | '\''))?;
    let (encoding, _) = value[1..].split_once(quote)?;
    Some(encoding.trim().to_ascii_lowercase())
}

impl From<Vec<u8>> for FeedDocument {
    fn from(value: Vec<u8>) -> Self {
        FeedDocument(value)
    }
}

impl From<String> for FeedDocument {
    fn from(value: String) -> Self {
        FeedDocument(value.into_bytes())
    }
}

impl From<&str> for FeedDocument {
    fn from(value: &str) -> Self {
        FeedDocument(value.as_bytes().to_vec())
    }
}
