//! Marketplace access
//!
//! The scorers never talk to a store directly. They go through the [`Marketplace`] capability,
//! which exposes the handful of queries every store supports: keyword search, top chart
//! listings, app detail, similar apps, and search-as-you-type suggestions.
//!
//! Two adapters are provided:
//!
//! - [`CatalogMarketplace`] answers from an in-memory snapshot, typically loaded from a JSON file.
//! - [`HttpMarketplace`] queries a JSON gateway in front of a store's web endpoints.
//!
//! [`Memoized`] wraps any adapter and caches responses for the lifetime of a run, which matters
//! because visibility scoring issues the same chart queries once per keyword.

mod app_record;
mod catalog;
mod http;
mod memoized;
mod query;
mod source;
mod store_kind;
mod throttler;

#[cfg(test)]
pub(crate) mod testing;

pub use app_record::AppRecord;
pub use catalog::{CatalogMarketplace, CatalogSnapshot, ChartEntry};
pub use http::HttpMarketplace;
pub use memoized::Memoized;
pub use query::{Collection, CollectionQuery, SearchQuery, Suggestion};
pub use source::Source;
pub use store_kind::{ITUNES_PRIORITY_CEILING, InstallsScore, StoreKind, SuggestScoring};
pub use throttler::Throttler;

/// The operations a marketplace must answer.
///
/// Every call may fail; adapters report failures as [`ohno::AppError`] and scorers propagate
/// them unchanged.
pub trait Marketplace: Send + Sync {
    /// Which store this adapter talks to, selecting limits and scoring policy.
    fn kind(&self) -> StoreKind;

    /// Search apps by keyword, in store relevance order.
    fn search(&self, query: &SearchQuery) -> impl Future<Output = crate::Result<Vec<AppRecord>>> + Send;

    /// List a top chart, in chart order.
    fn list(&self, query: &CollectionQuery) -> impl Future<Output = crate::Result<Vec<AppRecord>>> + Send;

    /// Fetch the full detail of a single app.
    fn app(&self, id: &str) -> impl Future<Output = crate::Result<AppRecord>> + Send;

    /// Apps the store considers similar to the given one.
    fn similar(&self, id: &str) -> impl Future<Output = crate::Result<Vec<AppRecord>>> + Send;

    /// Search-as-you-type suggestions for a partial term, in store order.
    fn suggest(&self, term: &str) -> impl Future<Output = crate::Result<Vec<Suggestion>>> + Send;
}
