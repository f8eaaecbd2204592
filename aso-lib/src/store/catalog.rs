use super::{AppRecord, Collection, CollectionQuery, Marketplace, SearchQuery, StoreKind, Suggestion};
use crate::Result;
use camino::Utf8Path;
use core::cmp::Ordering;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

const LOG_TARGET: &str = "   catalog";

/// Maximum number of entries a suggest call returns, matching what stores show while typing.
const MAX_SUGGESTIONS: usize = 10;

/// A top chart recorded in a catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEntry {
    pub collection: Collection,

    #[serde(default)]
    pub category: Option<String>,

    /// App ids in chart order.
    pub apps: Vec<String>,
}

/// On-disk form of a catalog: a frozen picture of a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSnapshot {
    /// Store the snapshot was taken from; overrides the configured store when present.
    #[serde(default)]
    pub store: Option<StoreKind>,

    #[serde(default)]
    pub apps: Vec<AppRecord>,

    #[serde(default)]
    pub charts: Vec<ChartEntry>,

    /// App id to the ids the store lists as similar.
    #[serde(default)]
    pub similar: HashMap<String, Vec<String>>,

    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Answers marketplace queries from an in-memory snapshot.
///
/// Search relevance is approximated: an app whose title contains the whole term ranks first,
/// then apps whose title contains every word of the term, then apps whose summary or
/// description supplies the missing words. Within a tier, more popular apps come first and
/// remaining ties keep snapshot order.
///
/// Searches that do not ask for full detail return records with an empty description, just as
/// a store's search page only carries summaries.
#[derive(Debug, Clone)]
pub struct CatalogMarketplace {
    kind: StoreKind,
    apps: Vec<AppRecord>,
    by_id: HashMap<String, usize>,
    charts: Vec<ChartEntry>,
    similar: HashMap<String, Vec<String>>,
    suggestions: Vec<Suggestion>,
}

impl CatalogMarketplace {
    #[must_use]
    pub fn new(kind: StoreKind) -> Self {
        Self::from_snapshot(CatalogSnapshot::default(), kind)
    }

    #[must_use]
    pub fn from_snapshot(snapshot: CatalogSnapshot, default_kind: StoreKind) -> Self {
        let mut catalog = Self {
            kind: snapshot.store.unwrap_or(default_kind),
            apps: Vec::with_capacity(snapshot.apps.len()),
            by_id: HashMap::with_capacity(snapshot.apps.len()),
            charts: snapshot.charts,
            similar: snapshot.similar,
            suggestions: snapshot.suggestions,
        };

        for app in snapshot.apps {
            catalog.insert(app);
        }

        catalog
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot
    pub fn load(path: &Utf8Path, default_kind: StoreKind) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading catalog snapshot '{path}'"))?;
        let snapshot: CatalogSnapshot =
            serde_json::from_str(&text).into_app_err_with(|| format!("parsing catalog snapshot '{path}'"))?;

        log::info!(
            target: LOG_TARGET,
            "Loaded {} apps, {} charts and {} suggestions from '{path}'",
            snapshot.apps.len(),
            snapshot.charts.len(),
            snapshot.suggestions.len()
        );

        Ok(Self::from_snapshot(snapshot, default_kind))
    }

    #[must_use]
    pub fn with_app(mut self, app: AppRecord) -> Self {
        self.insert(app);
        self
    }

    #[must_use]
    pub fn with_chart(mut self, collection: Collection, category: Option<&str>, ids: &[&str]) -> Self {
        self.charts.push(ChartEntry {
            collection,
            category: category.map(str::to_string),
            apps: ids.iter().map(|id| (*id).to_string()).collect(),
        });
        self
    }

    #[must_use]
    pub fn with_similar(mut self, id: &str, similar: &[&str]) -> Self {
        let _ = self
            .similar
            .insert(id.to_string(), similar.iter().map(|id| (*id).to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, term: &str, priority: Option<f64>) -> Self {
        self.suggestions.push(Suggestion::new(term, priority));
        self
    }

    /// Later records with the same id replace earlier ones in place.
    fn insert(&mut self, app: AppRecord) {
        if let Some(&index) = self.by_id.get(&app.id) {
            self.apps[index] = app;
        } else {
            let _ = self.by_id.insert(app.id.clone(), self.apps.len());
            self.apps.push(app);
        }
    }

    fn get(&self, id: &str) -> Option<&AppRecord> {
        self.by_id.get(id).map(|&index| &self.apps[index])
    }

    fn resolve_all<'a>(&self, ids: impl IntoIterator<Item = &'a String>) -> Vec<AppRecord> {
        ids.into_iter().filter_map(|id| self.get(id)).cloned().collect()
    }

    fn relevance(app: &AppRecord, term: &str, words: &[&str]) -> Option<u8> {
        let title = app.title.to_lowercase();
        if title.contains(term) {
            return Some(3);
        }

        if words.iter().all(|word| title.contains(word)) {
            return Some(2);
        }

        let body = format!(
            "{title} {} {}",
            app.summary.as_deref().unwrap_or_default(),
            app.description
        )
        .to_lowercase();

        words.iter().all(|word| body.contains(word)).then_some(1)
    }

    fn by_popularity(&self, left: &AppRecord, right: &AppRecord) -> Ordering {
        self.kind.popularity(right).total_cmp(&self.kind.popularity(left))
    }

    fn search_now(&self, query: &SearchQuery) -> Vec<AppRecord> {
        let term = query.term.trim().to_lowercase();
        let words: Vec<&str> = term.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(u8, &AppRecord)> = self
            .apps
            .iter()
            .filter_map(|app| Self::relevance(app, &term, &words).map(|relevance| (relevance, app)))
            .collect();

        // stable, so equal apps keep snapshot order
        hits.sort_by(|(left_rel, left), (right_rel, right)| right_rel.cmp(left_rel).then_with(|| self.by_popularity(left, right)));

        hits.into_iter()
            .take(query.num)
            .map(|(_, app)| {
                let mut app = app.clone();
                if !query.full_detail {
                    app.description.clear();
                }
                app
            })
            .collect()
    }

    fn list_now(&self, query: &CollectionQuery) -> Vec<AppRecord> {
        let recorded = self
            .charts
            .iter()
            .find(|chart| chart.collection == query.collection && chart.category == query.category);

        if let Some(chart) = recorded {
            let mut apps = self.resolve_all(&chart.apps);
            apps.truncate(query.num);
            return apps;
        }

        // no recorded chart, so rank the matching apps by popularity
        let wants_free = query.collection == Collection::TopFree;
        let mut apps: Vec<&AppRecord> = self
            .apps
            .iter()
            .filter(|app| app.free == wants_free)
            .filter(|app| query.category.is_none() || app.genre == query.category)
            .collect();
        apps.sort_by(|left, right| self.by_popularity(left, right));
        apps.into_iter().take(query.num).cloned().collect()
    }

    fn suggest_now(&self, term: &str) -> Vec<Suggestion> {
        let prefix = term.to_lowercase();

        if self.suggestions.is_empty() {
            let mut titles: Vec<&AppRecord> = self.apps.iter().collect();
            titles.sort_by(|left, right| self.by_popularity(left, right));

            let mut terms: Vec<Suggestion> = Vec::new();
            for app in titles {
                let title = app.title.to_lowercase();
                if title.starts_with(&prefix) && !terms.iter().any(|s| s.term == title) {
                    terms.push(Suggestion::new(title, None));
                }
            }
            terms.truncate(MAX_SUGGESTIONS);
            return terms;
        }

        let mut matches: Vec<&Suggestion> = self
            .suggestions
            .iter()
            .filter(|suggestion| suggestion.term.to_lowercase().starts_with(&prefix))
            .collect();
        matches.sort_by(|left, right| right.priority.unwrap_or(0.0).total_cmp(&left.priority.unwrap_or(0.0)));
        matches.into_iter().take(MAX_SUGGESTIONS).cloned().collect()
    }
}

impl Marketplace for CatalogMarketplace {
    fn kind(&self) -> StoreKind {
        self.kind
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<AppRecord>> {
        let results = self.search_now(query);
        log::debug!(target: LOG_TARGET, "search '{}' matched {} apps", query.term, results.len());
        Ok(results)
    }

    async fn list(&self, query: &CollectionQuery) -> Result<Vec<AppRecord>> {
        Ok(self.list_now(query))
    }

    async fn app(&self, id: &str) -> Result<AppRecord> {
        match self.get(id) {
            Some(app) => Ok(app.clone()),
            None => bail!("app '{id}' not found in catalog"),
        }
    }

    async fn similar(&self, id: &str) -> Result<Vec<AppRecord>> {
        if self.get(id).is_none() {
            bail!("app '{id}' not found in catalog");
        }

        Ok(self.similar.get(id).map(|ids| self.resolve_all(ids)).unwrap_or_default())
    }

    async fn suggest(&self, term: &str) -> Result<Vec<Suggestion>> {
        Ok(self.suggest_now(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str, title: &str, installs: u64) -> AppRecord {
        let mut app = AppRecord::new(id, title);
        app.installs = Some(installs);
        app.description = format!("{title} description");
        app
    }

    fn catalog() -> CatalogMarketplace {
        CatalogMarketplace::new(StoreKind::GooglePlay)
            .with_app(app("notes", "Quick Notes", 500))
            .with_app(app("todo", "Todo List", 1_000))
            .with_app(app("list", "List of Todo", 50_000))
            .with_app({
                let mut planner = app("planner", "Day Planner", 10_000);
                planner.description = "Keep a todo list for every day".to_string();
                planner
            })
    }

    #[tokio::test]
    async fn test_search_relevance_tiers() {
        let results = catalog().search(&SearchQuery::new("todo list", 10)).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|app| app.id.as_str()).collect();
        assert_eq!(ids, ["todo", "list", "planner"]);
    }

    #[tokio::test]
    async fn test_search_ties_prefer_popular_apps() {
        let catalog = catalog().with_app(app("todo2", "Todo List Pro", 2_000));
        let results = catalog.search(&SearchQuery::new("todo list", 2)).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|app| app.id.as_str()).collect();
        assert_eq!(ids, ["todo2", "todo"]);
    }

    #[tokio::test]
    async fn test_search_detail_level() {
        let catalog = catalog();
        let summary = catalog.search(&SearchQuery::new("notes", 5)).await.unwrap();
        assert!(!summary[0].has_detail());

        let full = catalog.search(&SearchQuery::new("notes", 5).with_full_detail()).await.unwrap();
        assert!(full[0].has_detail());
    }

    #[tokio::test]
    async fn test_empty_term_matches_nothing() {
        assert!(catalog().search(&SearchQuery::new("   ", 5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_uses_recorded_chart() {
        let catalog = catalog().with_chart(Collection::TopFree, Some("PRODUCTIVITY"), &["todo", "missing", "notes"]);
        let query = CollectionQuery {
            collection: Collection::TopFree,
            category: Some("PRODUCTIVITY".to_string()),
            num: 120,
        };
        let ids: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|app| app.id).collect();
        assert_eq!(ids, ["todo", "notes"]);
    }

    #[tokio::test]
    async fn test_list_derives_chart_by_popularity() {
        let mut paid = app("paid", "Paid Todo", 1_000_000);
        paid.free = false;
        let catalog = catalog().with_app(paid);

        let query = StoreKind::GooglePlay.chart_query(Collection::TopFree, None);
        let ids: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|app| app.id).collect();
        assert_eq!(ids, ["list", "planner", "todo", "notes"]);

        let query = StoreKind::GooglePlay.chart_query(Collection::TopPaid, None);
        let ids: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|app| app.id).collect();
        assert_eq!(ids, ["paid"]);
    }

    #[tokio::test]
    async fn test_app_and_similar() {
        let catalog = catalog().with_similar("todo", &["list", "unknown", "planner"]);
        assert_eq!(catalog.app("todo").await.unwrap().title, "Todo List");
        assert!(catalog.app("nope").await.is_err());

        let similar: Vec<String> = catalog.similar("todo").await.unwrap().into_iter().map(|app| app.id).collect();
        assert_eq!(similar, ["list", "planner"]);
        assert!(catalog.similar("notes").await.unwrap().is_empty());
        assert!(catalog.similar("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_suggest_prefix_and_priority() {
        let catalog = catalog()
            .with_suggestion("panda", Some(100.0))
            .with_suggestion("panda pop", Some(7000.0))
            .with_suggestion("pandora", None)
            .with_suggestion("zebra", Some(9000.0));

        let terms: Vec<String> = catalog.suggest("Pan").await.unwrap().into_iter().map(|s| s.term).collect();
        assert_eq!(terms, ["panda pop", "panda", "pandora"]);
    }

    #[tokio::test]
    async fn test_suggest_falls_back_to_titles() {
        let terms: Vec<String> = catalog().suggest("t").await.unwrap().into_iter().map(|s| s.term).collect();
        assert_eq!(terms, ["todo list"]);
    }

    #[test]
    fn test_snapshot_store_overrides_default() {
        let snapshot: CatalogSnapshot = serde_json::from_str(r#"{"store": "itunes", "apps": [{"id": 1, "title": "One"}]}"#).unwrap();
        let catalog = CatalogMarketplace::from_snapshot(snapshot, StoreKind::GooglePlay);
        assert_eq!(catalog.kind(), StoreKind::AppStore);
        assert!(catalog.get("1").is_some());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("missing.json")).unwrap();
        let err = CatalogMarketplace::load(&path, StoreKind::GooglePlay).unwrap_err();
        assert!(err.to_string().contains("reading catalog snapshot"));
    }
}
