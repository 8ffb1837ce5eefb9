//! Request-scoped aggregation pipeline: three fetches, one join.

use std::time::{Duration, Instant};

use crate::aggregate::fetcher::Fetcher;
use crate::aggregate::joiner::join;
use crate::aggregate::records::CombinedRecord;
use crate::aggregate::types::{AggregationResult, Collection, Record};
use crate::config::schema::{ServiceConfig, UpstreamConfig};
use crate::observability::metrics;

/// Fetches the upstream collections and joins them.
#[derive(Clone, Debug)]
pub struct Aggregator {
    fetcher: Fetcher,
    upstream: UpstreamConfig,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher, upstream: UpstreamConfig) -> Self {
        Self { fetcher, upstream }
    }

    /// Build an aggregator from the upstream and timeout sections of `config`.
    pub fn from_config(config: &ServiceConfig) -> reqwest::Result<Self> {
        let fetcher = Fetcher::new(
            Duration::from_secs(config.timeouts.fetch_secs),
            Duration::from_secs(config.timeouts.connect_secs),
        )?;
        Ok(Self::new(fetcher, config.upstream.clone()))
    }

    /// Fetch all three collections concurrently and join them.
    pub async fn combined_data(&self) -> AggregationResult<Vec<CombinedRecord>> {
        let (comments, posts, users) = tokio::try_join!(
            self.fetch(Collection::Comments, &self.upstream.comments_url),
            self.fetch(Collection::Posts, &self.upstream.posts_url),
            self.fetch(Collection::Users, &self.upstream.users_url),
        )?;

        let combined = join(&comments, &posts, &users)?;

        let dropped = comments.len() - combined.len();
        metrics::record_join(combined.len(), dropped);
        tracing::debug!(
            comments = comments.len(),
            posts = posts.len(),
            users = users.len(),
            emitted = combined.len(),
            dropped,
            "Collections joined"
        );

        Ok(combined)
    }

    async fn fetch(&self, collection: Collection, url: &str) -> AggregationResult<Vec<Record>> {
        let start = Instant::now();
        let result = self.fetcher.fetch(url).await;

        match &result {
            Ok(records) => {
                metrics::record_fetch(collection, "success", start);
                tracing::debug!(%collection, url, records = records.len(), "Upstream fetched");
            }
            Err(e) => {
                metrics::record_fetch(collection, e.kind(), start);
                tracing::warn!(%collection, url, kind = e.kind(), "Upstream fetch failed");
            }
        }

        result
    }
}
