//! Keyword suggestion
//!
//! A suggestion starts from a seed (an app, or a list of apps or keywords) and a [`Strategy`]
//! that turns the seed into a set of candidate apps. The keywords of every candidate are then
//! pooled, and the keywords shared by the most candidates are suggested.

mod resolve;
mod strategy;

pub use resolve::validate;
pub use strategy::Strategy;

use crate::Error;
use crate::keywords::{TextMiner, app_keywords};
use crate::store::{AppRecord, Marketplace};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Number of keywords suggested unless configured otherwise.
pub const DEFAULT_SUGGESTION_COUNT: usize = 30;

/// What a suggestion starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// A single app id.
    App(String),

    /// App ids or keywords, depending on the strategy.
    List(Vec<String>),
}

impl Seed {
    /// Shape `values` the way `strategy` expects: a single app id for single-app strategies,
    /// a list otherwise.
    #[must_use]
    pub fn for_strategy(strategy: Strategy, mut values: Vec<String>) -> Self {
        if strategy.requires_list() || values.len() != 1 {
            Self::List(values)
        } else {
            Self::App(values.remove(0))
        }
    }

    fn values(&self) -> &[String] {
        match self {
            Self::App(id) => core::slice::from_ref(id),
            Self::List(values) => values,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuggestOptions {
    /// Maximum number of keywords returned.
    pub num: usize,

    /// Keywords never suggested.
    pub exclude: Vec<String>,

    /// For keyword strategies, leave out the seed keywords themselves.
    pub exclude_seeds: bool,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            num: DEFAULT_SUGGESTION_COUNT,
            exclude: Vec::new(),
            exclude_seeds: false,
        }
    }
}

/// A suggested keyword and the number of times it occurred across the candidate apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedKeyword {
    pub keyword: String,
    pub count: usize,
}

/// Suggest keywords for `seed` using `strategy`.
///
/// The seed shape is checked before any marketplace call.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the seed does not fit the strategy, or [`Error::Upstream`]
/// if a marketplace or mining call fails
pub async fn suggest<M: Marketplace, T: TextMiner>(
    market: &M,
    miner: &T,
    seed: &Seed,
    strategy: Strategy,
    options: &SuggestOptions,
) -> Result<Vec<SuggestedKeyword>, Error> {
    let apps = resolve::candidates(market, miner, seed, strategy).await?;

    let mut excluded: HashSet<String> = options.exclude.iter().map(|keyword| keyword.to_lowercase()).collect();
    if options.exclude_seeds && strategy.seeds_are_keywords() {
        excluded.extend(seed.values().iter().map(|keyword| keyword.to_lowercase()));
    }

    reduce(miner, &apps, &excluded, options.num)
}

/// Count how often each keyword occurs across `apps` and keep the `num` most frequent.
///
/// Keywords with equal counts keep the order in which they were first seen.
fn reduce(miner: &impl TextMiner, apps: &[AppRecord], excluded: &HashSet<String>, num: usize) -> Result<Vec<SuggestedKeyword>, Error> {
    let mut counted: Vec<SuggestedKeyword> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for app in apps {
        for keyword in app_keywords(miner, app)? {
            if excluded.contains(&keyword) {
                continue;
            }

            if let Some(&at) = index.get(&keyword) {
                counted[at].count += 1;
            } else {
                let _ = index.insert(keyword.clone(), counted.len());
                counted.push(SuggestedKeyword { keyword, count: 1 });
            }
        }
    }

    // stable, so ties keep first-seen order
    counted.sort_by(|left, right| right.count.cmp(&left.count));
    counted.truncate(num);
    Ok(counted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::FrequencyMiner;
    use crate::store::testing::CountingMarketplace;
    use crate::store::{CatalogMarketplace, StoreKind};

    fn app(id: &str, title: &str, description: &str) -> AppRecord {
        let mut app = AppRecord::new(id, title);
        app.description = description.to_string();
        app
    }

    fn apps() -> Vec<AppRecord> {
        vec![
            app("a", "Budget", "Expense tracker"),
            app("b", "Budget", "Savings goals"),
            app("c", "Budget", "Expense reports"),
            app("d", "Invoices", "Expense tracker"),
        ]
    }

    fn keywords(suggested: &[SuggestedKeyword]) -> Vec<&str> {
        suggested.iter().map(|keyword| keyword.keyword.as_str()).collect()
    }

    #[test]
    fn test_reduce_by_frequency() {
        let suggested = reduce(&FrequencyMiner::default(), &apps(), &HashSet::new(), 2).unwrap();
        assert_eq!(
            suggested,
            [
                SuggestedKeyword {
                    keyword: "budget".into(),
                    count: 3,
                },
                SuggestedKeyword {
                    keyword: "expense".into(),
                    count: 3,
                },
            ]
        );
    }

    #[test]
    fn test_reduce_excludes_keywords() {
        let excluded: HashSet<String> = ["budget".to_string()].into();
        let suggested = reduce(&FrequencyMiner::default(), &apps(), &excluded, 1).unwrap();
        assert_eq!(keywords(&suggested), ["expense"]);
    }

    #[test]
    fn test_reduce_ignores_candidate_order() {
        let miner = FrequencyMiner::default();
        let forward = reduce(&miner, &apps(), &HashSet::new(), 3).unwrap();

        let mut reversed = apps();
        reversed.reverse();
        let backward = reduce(&miner, &reversed, &HashSet::new(), 3).unwrap();

        let forward: HashSet<&str> = keywords(&forward).into_iter().collect();
        let backward: HashSet<&str> = keywords(&backward).into_iter().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_seed_for_strategy() {
        assert_eq!(Seed::for_strategy(Strategy::Similar, vec!["a".into()]), Seed::App("a".into()));
        assert_eq!(Seed::for_strategy(Strategy::Arbitrary, vec!["a".into()]), Seed::List(vec!["a".into()]));
        assert_eq!(
            Seed::for_strategy(Strategy::Category, vec!["a".into(), "b".into()]),
            Seed::List(vec!["a".into(), "b".into()])
        );
    }

    #[tokio::test]
    async fn test_invalid_seed_makes_no_calls() {
        let market = CountingMarketplace::new(CatalogMarketplace::new(StoreKind::GooglePlay));
        let miner = FrequencyMiner::default();

        let result = suggest(&market, &miner, &Seed::App("a".into()), Strategy::Arbitrary, &SuggestOptions::default()).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let seed = Seed::List(vec!["a".into(), "b".into()]);
        let result = suggest(&market, &miner, &seed, Strategy::Similar, &SuggestOptions::default()).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        assert_eq!(market.calls(), 0);
    }

    #[tokio::test]
    async fn test_keywords_strategy_excludes_seeds() {
        let mut market = CatalogMarketplace::new(StoreKind::GooglePlay);
        for candidate in apps() {
            market = market.with_app(candidate);
        }

        let options = SuggestOptions {
            exclude_seeds: true,
            ..SuggestOptions::default()
        };
        let seed = Seed::List(vec!["Expense".into()]);
        let suggested = suggest(&market, &FrequencyMiner::default(), &seed, Strategy::Keywords, &options).await.unwrap();

        assert!(!suggested.is_empty());
        assert!(suggested.iter().all(|keyword| keyword.keyword != "expense"));
        assert_eq!(suggested[0].keyword, "budget");
    }
}
