use super::{AppRecord, CollectionQuery, Marketplace, SearchQuery, StoreKind, Suggestion, Throttler};
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

const LOG_TARGET: &str = "      http";

/// Pause applied when a 429 response carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Upper bound on how long a single rate-limit response may stall the adapter.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

/// Queries a JSON gateway that fronts a store's web endpoints.
///
/// The gateway is expected to return already-normalized JSON:
///
/// | Route | Returns |
/// |---|---|
/// | `GET /search?term&num&fullDetail` | array of apps |
/// | `GET /list?collection&category&num` | array of apps |
/// | `GET /apps/{id}` | one app |
/// | `GET /apps/{id}/similar` | array of apps |
/// | `GET /suggest?term` | array of strings or `{term, priority}` objects |
///
/// Requests share a [`Throttler`], so at most `max_concurrent_requests` are in flight and a
/// rate-limited response holds back every request that follows it.
#[derive(Debug, Clone)]
pub struct HttpMarketplace {
    kind: StoreKind,
    client: reqwest::Client,
    base: Url,
    throttler: Arc<Throttler>,
}

impl HttpMarketplace {
    /// Create an adapter for the gateway at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute http(s) URL or the HTTP client
    /// cannot be built
    pub fn new(kind: StoreKind, endpoint: &str, request_timeout: Duration, max_concurrent_requests: usize) -> Result<Self> {
        let base = Url::parse(endpoint).into_app_err_with(|| format!("invalid gateway endpoint '{endpoint}'"))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            bail!("gateway endpoint '{endpoint}' must be an absolute http or https URL");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("aso/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            kind,
            client,
            base,
            throttler: Arc::new(Throttler::new(max_concurrent_requests)),
        })
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base.clone();

        {
            let Ok(mut path) = url.path_segments_mut() else {
                return Err(app_err!("gateway endpoint '{}' cannot carry a path", self.base));
            };
            let _ = path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, subject: impl Fn() -> String) -> Result<T> {
        let _permit = self.throttler.acquire().await?;

        log::debug!(target: LOG_TARGET, "GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("requesting '{url}'"))?;

        match response.status() {
            StatusCode::NOT_FOUND => bail!("{} not found", subject()),
            StatusCode::TOO_MANY_REQUESTS => {
                let delay = retry_after(response.headers());
                if self.throttler.pause_for(delay) {
                    log::warn!(target: LOG_TARGET, "Rate limited by the gateway, pausing requests for {}s", delay.as_secs());
                }
                bail!("rate limited while requesting '{url}'");
            }
            _ => {}
        }

        let response = response
            .error_for_status()
            .into_app_err_with(|| format!("requesting {}", subject()))?;

        response
            .json::<T>()
            .await
            .into_app_err_with(|| format!("decoding {} from '{url}'", subject()))
    }
}

fn retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER, |secs| Duration::from_secs(secs).min(MAX_RETRY_AFTER))
}

impl Marketplace for HttpMarketplace {
    fn kind(&self) -> StoreKind {
        self.kind
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<AppRecord>> {
        let url = self.url(
            &["search"],
            &[
                ("term", query.term.clone()),
                ("num", query.num.to_string()),
                ("fullDetail", query.full_detail.to_string()),
            ],
        )?;
        self.get_json(url, || format!("search results for '{}'", query.term)).await
    }

    async fn list(&self, query: &CollectionQuery) -> Result<Vec<AppRecord>> {
        let mut params = vec![("collection", query.collection.wire_name(self.kind).to_string())];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        params.push(("num", query.num.to_string()));

        let url = self.url(&["list"], &params)?;
        self.get_json(url, || format!("collection '{}'", query.collection.wire_name(self.kind)))
            .await
    }

    async fn app(&self, id: &str) -> Result<AppRecord> {
        let url = self.url(&["apps", id], &[])?;
        self.get_json(url, || format!("app '{id}'")).await
    }

    async fn similar(&self, id: &str) -> Result<Vec<AppRecord>> {
        let url = self.url(&["apps", id, "similar"], &[])?;
        self.get_json(url, || format!("app '{id}'")).await
    }

    async fn suggest(&self, term: &str) -> Result<Vec<Suggestion>> {
        let url = self.url(&["suggest"], &[("term", term.to_string())])?;
        self.get_json(url, || format!("suggestions for '{term}'")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn adapter(endpoint: &str) -> HttpMarketplace {
        HttpMarketplace::new(StoreKind::GooglePlay, endpoint, Duration::from_secs(5), 4).unwrap()
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        assert!(HttpMarketplace::new(StoreKind::GooglePlay, "mailto:someone@example.com", Duration::from_secs(1), 1).is_err());
        assert!(HttpMarketplace::new(StoreKind::GooglePlay, "not a url", Duration::from_secs(1), 1).is_err());
    }

    #[test]
    fn test_url_appends_segments() {
        let url = adapter("http://localhost:3000/api/").url(&["apps", "com.example.app"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/apps/com.example.app");

        let url = adapter("http://localhost:3000").url(&["apps", "a b", "similar"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/apps/a%20b/similar");
    }

    #[test]
    fn test_url_encodes_query() {
        let url = adapter("http://localhost:3000")
            .url(&["search"], &[("term", "todo & list".to_string()), ("num", "10".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/search?term=todo+%26+list&num=10");
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), DEFAULT_RETRY_AFTER);

        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));
        assert_eq!(retry_after(&headers), Duration::from_secs(12));

        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("86400"));
        assert_eq!(retry_after(&headers), MAX_RETRY_AFTER);

        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
        assert_eq!(retry_after(&headers), DEFAULT_RETRY_AFTER);
    }
}
