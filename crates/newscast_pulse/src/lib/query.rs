use std::{convert::Infallible, str::FromStr};

/// Parsed form of an inline query `<keyword> [quality] [link-only]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub keyword: String,
    pub quality: Option<String>,
    /// `Some(true)` for `true`/`1`/`yes`, `Some(false)` for any other value
    pub link_only: Option<bool>,
}

impl Query {
    /// Keyword used for an empty query; every built-in show carries it
    pub const WILDCARD: &'static str = "all";

    /// Lowercases and splits `text` on whitespace. Tokens past the third are
    /// ignored.
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        let mut tokens = text.split_whitespace();

        let keyword = tokens.next().unwrap_or(Self::WILDCARD).to_string();
        let quality = tokens.next().map(str::to_string);
        let link_only = tokens
            .next()
            .map(|flag| matches!(flag, "true" | "1" | "yes"));

        Query {
            keyword,
            quality,
            link_only,
        }
    }
}

impl FromStr for Query {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Query::parse(s))
    }
}
