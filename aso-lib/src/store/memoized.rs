use super::{AppRecord, CollectionQuery, Marketplace, SearchQuery, StoreKind, Suggestion};
use crate::Result;
use core::hash::Hash;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

const LOG_TARGET: &str = "  memoized";

#[derive(Debug, Default)]
struct Responses {
    search: HashMap<SearchQuery, Vec<AppRecord>>,
    list: HashMap<CollectionQuery, Vec<AppRecord>>,
    app: HashMap<String, AppRecord>,
    similar: HashMap<String, Vec<AppRecord>>,
    suggest: HashMap<String, Vec<Suggestion>>,
}

/// Caches successful marketplace responses for as long as the wrapper lives.
///
/// Failures are not cached, so a retried request reaches the inner marketplace again.
/// Concurrent identical requests that both miss the cache are both forwarded.
#[derive(Debug)]
pub struct Memoized<M> {
    inner: M,
    responses: Mutex<Responses>,
}

impl<M: Marketplace> Memoized<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            responses: Mutex::new(Responses::default()),
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &M {
        &self.inner
    }

    fn responses(&self) -> MutexGuard<'_, Responses> {
        self.responses.lock().expect("lock not poisoned")
    }

    async fn memo<K, V>(
        &self,
        table: fn(&mut Responses) -> &mut HashMap<K, V>,
        key: K,
        fetch: impl Future<Output = Result<V>>,
    ) -> Result<V>
    where
        K: Eq + Hash + core::fmt::Debug,
        V: Clone,
    {
        let hit = table(&mut self.responses()).get(&key).cloned();
        if let Some(hit) = hit {
            log::trace!(target: LOG_TARGET, "cache hit for {key:?}");
            return Ok(hit);
        }

        let value = fetch.await?;
        let _ = table(&mut self.responses()).insert(key, value.clone());
        Ok(value)
    }
}

impl<M: Marketplace> Marketplace for Memoized<M> {
    fn kind(&self) -> StoreKind {
        self.inner.kind()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<AppRecord>> {
        self.memo(|r| &mut r.search, query.clone(), self.inner.search(query)).await
    }

    async fn list(&self, query: &CollectionQuery) -> Result<Vec<AppRecord>> {
        self.memo(|r| &mut r.list, query.clone(), self.inner.list(query)).await
    }

    async fn app(&self, id: &str) -> Result<AppRecord> {
        self.memo(|r| &mut r.app, id.to_string(), self.inner.app(id)).await
    }

    async fn similar(&self, id: &str) -> Result<Vec<AppRecord>> {
        self.memo(|r| &mut r.similar, id.to_string(), self.inner.similar(id)).await
    }

    async fn suggest(&self, term: &str) -> Result<Vec<Suggestion>> {
        self.memo(|r| &mut r.suggest, term.to_string(), self.inner.suggest(term)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::CountingMarketplace;
    use crate::store::{CatalogMarketplace, Collection};

    fn counting() -> CountingMarketplace {
        CountingMarketplace::new(
            CatalogMarketplace::new(StoreKind::GooglePlay)
                .with_app(AppRecord::new("todo", "Todo List"))
                .with_suggestion("todo", Some(10.0)),
        )
    }

    #[tokio::test]
    async fn test_identical_requests_hit_upstream_once() {
        let memoized = Memoized::new(counting());

        let query = SearchQuery::new("todo", 10);
        let first = memoized.search(&query).await.unwrap();
        let second = memoized.search(&query).await.unwrap();
        assert_eq!(first, second);

        let chart = StoreKind::GooglePlay.chart_query(Collection::TopFree, None);
        let _ = memoized.list(&chart).await.unwrap();
        let _ = memoized.list(&chart).await.unwrap();
        let _ = memoized.suggest("to").await.unwrap();
        let _ = memoized.suggest("to").await.unwrap();

        assert_eq!(memoized.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_distinct_requests_are_forwarded() {
        let memoized = Memoized::new(counting());

        let _ = memoized.search(&SearchQuery::new("todo", 10)).await.unwrap();
        let _ = memoized.search(&SearchQuery::new("todo", 10).with_full_detail()).await.unwrap();
        let _ = memoized.search(&SearchQuery::new("todo", 20)).await.unwrap();

        assert_eq!(memoized.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let memoized = Memoized::new(counting());

        assert!(memoized.app("missing").await.is_err());
        assert!(memoized.app("missing").await.is_err());
        let _ = memoized.app("todo").await.unwrap();
        let _ = memoized.app("todo").await.unwrap();

        assert_eq!(memoized.inner().calls(), 3);
    }
}
