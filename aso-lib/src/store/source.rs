use super::{AppRecord, CatalogMarketplace, CollectionQuery, HttpMarketplace, Marketplace, SearchQuery, StoreKind, Suggestion};
use crate::Result;

/// The marketplace adapter selected by configuration.
#[derive(Debug)]
pub enum Source {
    Catalog(CatalogMarketplace),
    Http(HttpMarketplace),
}

impl Marketplace for Source {
    fn kind(&self) -> StoreKind {
        match self {
            Self::Catalog(catalog) => catalog.kind(),
            Self::Http(http) => http.kind(),
        }
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<AppRecord>> {
        match self {
            Self::Catalog(catalog) => catalog.search(query).await,
            Self::Http(http) => http.search(query).await,
        }
    }

    async fn list(&self, query: &CollectionQuery) -> Result<Vec<AppRecord>> {
        match self {
            Self::Catalog(catalog) => catalog.list(query).await,
            Self::Http(http) => http.list(query).await,
        }
    }

    async fn app(&self, id: &str) -> Result<AppRecord> {
        match self {
            Self::Catalog(catalog) => catalog.app(id).await,
            Self::Http(http) => http.app(id).await,
        }
    }

    async fn similar(&self, id: &str) -> Result<Vec<AppRecord>> {
        match self {
            Self::Catalog(catalog) => catalog.similar(id).await,
            Self::Http(http) => http.similar(id).await,
        }
    }

    async fn suggest(&self, term: &str) -> Result<Vec<Suggestion>> {
        match self {
            Self::Catalog(catalog) => catalog.suggest(term).await,
            Self::Http(http) => http.suggest(term).await,
        }
    }
}
