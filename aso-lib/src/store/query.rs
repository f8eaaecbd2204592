use super::StoreKind;
use serde::{Deserialize, Serialize};

/// The two top charts the scorers consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    #[serde(alias = "topselling_free", alias = "topfreeapplications")]
    TopFree,

    #[serde(alias = "topselling_paid", alias = "toppaidapplications")]
    TopPaid,
}

impl Collection {
    /// The chart identifier the given store uses for this collection.
    #[must_use]
    pub const fn wire_name(self, kind: StoreKind) -> &'static str {
        match (kind, self) {
            (StoreKind::GooglePlay, Self::TopFree) => "topselling_free",
            (StoreKind::GooglePlay, Self::TopPaid) => "topselling_paid",
            (StoreKind::AppStore, Self::TopFree) => "topfreeapplications",
            (StoreKind::AppStore, Self::TopPaid) => "toppaidapplications",
        }
    }

    /// The chart an app with the given price model appears in.
    #[must_use]
    pub const fn for_app(free: bool) -> Self {
        if free { Self::TopFree } else { Self::TopPaid }
    }
}

/// A request for one of the top charts, optionally restricted to a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionQuery {
    pub collection: Collection,
    pub category: Option<String>,
    pub num: usize,
}

/// A keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub term: String,
    pub num: usize,

    /// Ask for full app detail (description, update time, ...) rather than summaries.
    pub full_detail: bool,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>, num: usize) -> Self {
        Self {
            term: term.into(),
            num,
            full_detail: false,
        }
    }

    #[must_use]
    pub const fn with_full_detail(mut self) -> Self {
        self.full_detail = true;
        self
    }
}

/// One entry of a store's search-as-you-type suggestions.
///
/// Google Play only reports the suggested term; the App Store attaches a priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSuggestion")]
pub struct Suggestion {
    pub term: String,
    pub priority: Option<f64>,
}

impl Suggestion {
    #[must_use]
    pub fn new(term: impl Into<String>, priority: Option<f64>) -> Self {
        Self {
            term: term.into(),
            priority,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSuggestion {
    Term(String),
    Entry {
        #[serde(alias = "value")]
        term: String,
        #[serde(default)]
        priority: Option<f64>,
    },
}

impl From<RawSuggestion> for Suggestion {
    fn from(raw: RawSuggestion) -> Self {
        match raw {
            RawSuggestion::Term(term) => Self::new(term, None),
            RawSuggestion::Entry { term, priority } => Self::new(term, priority),
        }
    }
}
