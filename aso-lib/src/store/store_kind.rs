use super::{AppRecord, Collection, CollectionQuery};
use crate::Error;
use crate::calc;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The marketplace an adapter talks to.
///
/// Each store has its own result limits and reports popularity and search suggestions
/// differently; the per-store policy lives here so scorers stay store-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    /// Google Play
    #[serde(rename = "gplay")]
    #[strum(serialize = "gplay")]
    #[value(name = "gplay")]
    GooglePlay,

    /// Apple App Store
    #[serde(rename = "itunes")]
    #[strum(serialize = "itunes")]
    #[value(name = "itunes")]
    AppStore,
}

/// How a store's search suggestions translate into a traffic sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestScoring {
    /// Type the keyword one character at a time and score how early it is suggested.
    PrefixDepth,

    /// Look the keyword up in the suggestions and score its reported priority.
    Priority,
}

/// Average popularity of a set of apps together with its normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstallsScore {
    pub avg: f64,
    pub score: f64,
}

const GPLAY_MAX_SEARCH: usize = 250;
const GPLAY_MAX_LIST: usize = 120;
const GPLAY_INSTALLS_CEILING: f64 = 1_000_000.0;

const ITUNES_MAX_SEARCH: usize = 200;
const ITUNES_MAX_LIST: usize = 100;
const ITUNES_REVIEWS_CEILING: f64 = 100_000.0;

/// Priority at which an App Store suggestion is considered maximally popular.
pub const ITUNES_PRIORITY_CEILING: f64 = 8000.0;

impl StoreKind {
    /// Largest number of results a search may return.
    #[must_use]
    pub const fn max_search(self) -> usize {
        match self {
            Self::GooglePlay => GPLAY_MAX_SEARCH,
            Self::AppStore => ITUNES_MAX_SEARCH,
        }
    }

    /// Largest number of results a collection listing may return.
    #[must_use]
    pub const fn max_list(self) -> usize {
        match self {
            Self::GooglePlay => GPLAY_MAX_LIST,
            Self::AppStore => ITUNES_MAX_LIST,
        }
    }

    /// The raw popularity statistic of an app: install floor on Google Play, review count on
    /// the App Store. Missing statistics count as zero.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "popularity counts are far below 2^52")]
    pub fn popularity(self, app: &AppRecord) -> f64 {
        let raw = match self {
            Self::GooglePlay => app.installs,
            Self::AppStore => app.reviews,
        };
        raw.unwrap_or(0) as f64
    }

    /// Average popularity of `apps` and its score on the 1..=10 scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] when `apps` is empty.
    pub fn installs_score(self, apps: &[AppRecord]) -> Result<InstallsScore, Error> {
        if apps.is_empty() {
            return Err(Error::NoData("installs"));
        }

        #[expect(clippy::cast_precision_loss, reason = "app counts are small")]
        let count = apps.len() as f64;
        let avg = apps.iter().map(|app| self.popularity(app)).sum::<f64>() / count;

        let ceiling = match self {
            Self::GooglePlay => GPLAY_INSTALLS_CEILING,
            Self::AppStore => ITUNES_REVIEWS_CEILING,
        };

        Ok(InstallsScore {
            avg,
            score: calc::z_score(ceiling, avg),
        })
    }

    /// Build a query for one of the top charts, sized at the store's listing limit.
    #[must_use]
    pub fn chart_query(self, collection: Collection, category: Option<&str>) -> CollectionQuery {
        CollectionQuery {
            collection,
            category: category.map(str::to_string),
            num: self.max_list(),
        }
    }

    /// The chart an app competes in: top free or top paid depending on its price, within
    /// its own category.
    #[must_use]
    pub fn collection_query(self, app: &AppRecord) -> CollectionQuery {
        self.chart_query(Collection::for_app(app.free), app.genre.as_deref())
    }

    #[must_use]
    pub const fn suggest_scoring(self) -> SuggestScoring {
        match self {
            Self::GooglePlay => SuggestScoring::PrefixDepth,
            Self::AppStore => SuggestScoring::Priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn with_installs(installs: u64) -> AppRecord {
        let mut app = AppRecord::new(format!("app{installs}"), "App");
        app.installs = Some(installs);
        app
    }

    fn with_reviews(reviews: u64) -> AppRecord {
        let mut app = AppRecord::new(format!("app{reviews}"), "App");
        app.reviews = Some(reviews);
        app
    }

    #[test]
    fn test_limits() {
        assert_eq!(StoreKind::GooglePlay.max_search(), 250);
        assert_eq!(StoreKind::GooglePlay.max_list(), 120);
        assert_eq!(StoreKind::AppStore.max_search(), 200);
        assert_eq!(StoreKind::AppStore.max_list(), 100);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(StoreKind::from_str("gplay").unwrap(), StoreKind::GooglePlay);
        assert_eq!(StoreKind::from_str("iTunes").unwrap(), StoreKind::AppStore);
        assert_eq!(StoreKind::AppStore.to_string(), "itunes");
        assert!(StoreKind::from_str("amazon").is_err());
    }

    #[test]
    fn test_google_play_installs_score() {
        let apps = [with_installs(1_000_000), with_installs(1_000_000)];
        let result = StoreKind::GooglePlay.installs_score(&apps).unwrap();
        assert!((result.avg - 1_000_000.0).abs() < f64::EPSILON);
        assert!((result.score - 10.0).abs() < f64::EPSILON);

        let apps = [with_installs(0), with_installs(1_000_000)];
        let result = StoreKind::GooglePlay.installs_score(&apps).unwrap();
        assert!((result.score - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_app_store_uses_reviews() {
        let apps = [with_reviews(100_000), with_reviews(300_000)];
        let result = StoreKind::AppStore.installs_score(&apps).unwrap();
        assert!((result.avg - 200_000.0).abs() < f64::EPSILON);
        assert!((result.score - 10.0).abs() < f64::EPSILON);

        // installs are ignored on the App Store
        let result = StoreKind::AppStore.installs_score(&[with_installs(5_000_000)]).unwrap();
        assert!((result.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_installs_score_empty() {
        assert!(matches!(StoreKind::GooglePlay.installs_score(&[]), Err(Error::NoData(_))));
    }

    #[test]
    fn test_chart_query_uses_list_limit() {
        let query = StoreKind::AppStore.chart_query(Collection::TopPaid, Some("6014"));
        assert_eq!(query.num, 100);
        assert_eq!(query.category.as_deref(), Some("6014"));
        assert_eq!(query.collection, Collection::TopPaid);
    }

    #[test]
    fn test_collection_query_follows_price_and_genre() {
        let mut app = AppRecord::new("game", "Game");
        app.free = false;
        app.genre = Some("GAME_PUZZLE".to_string());

        let query = StoreKind::GooglePlay.collection_query(&app);
        assert_eq!(query.collection, Collection::TopPaid);
        assert_eq!(query.category.as_deref(), Some("GAME_PUZZLE"));
        assert_eq!(query.num, 120);

        app.free = true;
        app.genre = None;
        let query = StoreKind::GooglePlay.collection_query(&app);
        assert_eq!(query.collection, Collection::TopFree);
        assert_eq!(query.category, None);
    }
}
