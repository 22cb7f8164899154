pub mod builder;

use anyhow::Context;
use futures::future::join_all;
use itertools::Itertools;
use newscast_registry::{Quality, ShowDefinition, ShowRegistry};

use crate::{
    feed::FeedFetcher,
    inline::InlineAnswer,
    parser::{parse_podcast_feed, parse_video_feed, EntryPolicy},
    query::Query,
    types::Episode,
};

/// Feed chosen for one matched show of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSelection<'r> {
    pub show: &'r ShowDefinition,
    pub quality_key: &'r str,
    pub quality: &'r Quality,
    /// Effective render mode. Video-platform pages are always sent as a link.
    pub link_only: bool,
}

/// Matches `query` against the registry and picks the feed of every show
/// that offers the requested quality, in registry order.
///
/// Shows that lack the requested quality are skipped: quality vocabularies
/// differ between shows, so this is not an error.
pub fn select_feeds<'r>(registry: &'r ShowRegistry, query: &Query) -> Vec<FeedSelection<'r>> {
    registry
        .lookup(&query.keyword)
        .into_iter()
        .filter_map(|show| {
            let (quality_key, quality) = match query.quality.as_deref() {
                Some(requested) => {
                    let Some((key, quality)) = show.qualities.get_key_value(requested) else {
                        tracing::debug!(show = %show.name, quality = requested, "Show does not offer quality, skipping");
                        return None;
                    };
                    (key.as_str(), quality)
                }
                None => show.default_quality()?,
            };

            let link_only = match quality {
                Quality::Podcast { .. } => query.link_only.unwrap_or(show.render_as_link_only),
                Quality::VideoPlatform { .. } => true,
            };

            Some(FeedSelection {
                show,
                quality_key,
                quality,
                link_only,
            })
        })
        .collect()
}

/// Resolves inline queries into the newest episodes of the matching shows
#[derive(Debug)]
pub struct EpisodeResolver<'r, F>
where
    F: FeedFetcher + Send + Sync,
{
    registry: &'r ShowRegistry,
    fetcher: F,
    entry_policy: EntryPolicy,
}

impl<'r, F> EpisodeResolver<'r, F>
where
    F: FeedFetcher + Send + Sync,
{
    pub fn new(registry: &'r ShowRegistry, fetcher: F) -> Self {
        EpisodeResolver {
            registry,
            fetcher,
            entry_policy: EntryPolicy::default(),
        }
    }

    pub fn registry(&self) -> &'r ShowRegistry {
        self.registry
    }

    pub fn entry_policy(&self) -> EntryPolicy {
        self.entry_policy
    }

    /// Fetches and parses the feed of a single selection.
    ///
    /// Returns `Ok(None)` when a video-platform feed has no entry for the show.
    #[tracing::instrument(skip_all, fields(show = %selection.show.name, quality = selection.quality_key))]
    async fn resolve_show(&self, selection: &FeedSelection<'_>) -> anyhow::Result<Option<Episode>> {
        let url = selection.quality.url();
        let document = self
            .fetcher
            .fetch(url)
            .await
            .with_context(|| format!("Failed to fetch feed {url}"))?;
        let document = document.text()?;

        let episode = match selection.quality {
            Quality::Podcast { .. } => Some(
                parse_podcast_feed(&document, self.entry_policy)
                    .with_context(|| format!("Failed to parse podcast feed {url}"))?
                    .with_link_only(selection.link_only),
            ),
            Quality::VideoPlatform { title_filter, .. } => {
                parse_video_feed(&document, title_filter, self.entry_policy)
                    .with_context(|| format!("Failed to parse video feed {url}"))?
            }
        };

        Ok(episode)
    }

    /// Resolves `query_text` into at most one episode per matched show.
    ///
    /// Feeds are fetched concurrently but the result keeps registry order.
    /// A show whose feed cannot be fetched or parsed is logged and left out;
    /// the remaining shows are still returned.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, query_text: &str) -> Vec<Episode> {
        let query = Query::parse(query_text);
        let selections = select_feeds(self.registry, &query);
        tracing::info!(?query, shows = selections.len(), "Resolving query");

        let results = join_all(
            selections
                .iter()
                .map(|selection| self.resolve_show(selection)),
        )
        .await;

        let episodes = results
            .into_iter()
            .zip(&selections)
            .filter_map(|(result, selection)| {
                result
                    .inspect_err(|e| {
                        tracing::warn!(
                            error = ?e,
                            show = %selection.show.name,
                            url = selection.quality.url(),
                            "Failed to resolve show, leaving it out"
                        )
                    })
                    .ok()
                    .flatten()
            })
            .collect::<Vec<_>>();

        if !episodes.is_empty() {
            tracing::info!(
                media_urls = %episodes.iter().map(|e| e.media_url.as_str()).join(", "),
                "Resolved episodes"
            );
        }

        episodes
    }

    /// Resolves `query_text` and wraps the episodes into the answer payload
    /// for the inline query `inline_query_id`.
    pub async fn answer(&self, inline_query_id: impl Into<String>, query_text: &str) -> InlineAnswer {
        let episodes = self.resolve(query_text).await;
        InlineAnswer::new(inline_query_id, episodes)
    }
}
