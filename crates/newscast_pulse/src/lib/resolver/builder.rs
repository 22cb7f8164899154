use newscast_registry::ShowRegistry;

use crate::{feed::FeedFetcher, parser::EntryPolicy, EpisodeResolver};

pub struct EpisodeResolverBuilder<R = (), F = ()> {
    registry: R,
    fetcher: F,
    entry_policy: EntryPolicy,
}

impl EpisodeResolverBuilder {
    pub fn new() -> Self {
        Self {
            registry: (),
            fetcher: (),
            entry_policy: EntryPolicy::default(),
        }
    }
}

impl Default for EpisodeResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, F> EpisodeResolverBuilder<R, F> {
    pub fn registry(self, registry: &ShowRegistry) -> EpisodeResolverBuilder<&ShowRegistry, F> {
        EpisodeResolverBuilder {
            registry,
            fetcher: self.fetcher,
            entry_policy: self.entry_policy,
        }
    }

    pub fn fetcher<F2: FeedFetcher + Send + Sync>(
        self,
        fetcher: F2,
    ) -> EpisodeResolverBuilder<R, F2> {
        EpisodeResolverBuilder {
            registry: self.registry,
            fetcher,
            entry_policy: self.entry_policy,
        }
    }

    pub fn entry_policy(mut self, entry_policy: EntryPolicy) -> Self {
        self.entry_policy = entry_policy;
        self
    }

    /// Compare publication dates instead of trusting feed order
    pub fn newest_by_date(self) -> Self {
        self.entry_policy(EntryPolicy::NewestByDate)
    }
}

impl<'r, F> EpisodeResolverBuilder<&'r ShowRegistry, F>
where
    F: FeedFetcher + Send + Sync,
{
    pub fn build(self) -> EpisodeResolver<'r, F> {
        EpisodeResolver {
            registry: self.registry,
            fetcher: self.fetcher,
            entry_policy: self.entry_policy,
        }
    }
}
