mod error;
pub mod feed;
pub mod inline;
pub mod parser;
pub mod query;
mod resolver;
pub mod tracing;
pub mod types;

pub use error::Error;
pub use feed::{fetcher::HttpFetcher, FeedDocument, FeedFetcher};
pub use inline::{InlineAnswer, InlineResult, CACHE_TIME_SECS};
pub use parser::EntryPolicy;
pub use query::Query;
pub use resolver::{builder::EpisodeResolverBuilder, select_feeds, EpisodeResolver, FeedSelection};
pub use types::Episode;
