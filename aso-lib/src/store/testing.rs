//! Test double that counts how often each marketplace operation runs.

use super::{AppRecord, CatalogMarketplace, CollectionQuery, Marketplace, SearchQuery, StoreKind, Suggestion};
use crate::Result;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct CountingMarketplace {
    inner: CatalogMarketplace,
    searches: AtomicUsize,
    lists: AtomicUsize,
    others: AtomicUsize,
}

impl CountingMarketplace {
    pub const fn new(inner: CatalogMarketplace) -> Self {
        Self {
            inner,
            searches: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            others: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.searches() + self.lists() + self.others.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

impl Marketplace for CountingMarketplace {
    fn kind(&self) -> StoreKind {
        self.inner.kind()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<AppRecord>> {
        let _ = self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search(query).await
    }

    async fn list(&self, query: &CollectionQuery) -> Result<Vec<AppRecord>> {
        let _ = self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(query).await
    }

    async fn app(&self, id: &str) -> Result<AppRecord> {
        let _ = self.others.fetch_add(1, Ordering::SeqCst);
        self.inner.app(id).await
    }

    async fn similar(&self, id: &str) -> Result<Vec<AppRecord>> {
        let _ = self.others.fetch_add(1, Ordering::SeqCst);
        self.inner.similar(id).await
    }

    async fn suggest(&self, term: &str) -> Result<Vec<Suggestion>> {
        let _ = self.others.fetch_add(1, Ordering::SeqCst);
        self.inner.suggest(term).await
    }
}
