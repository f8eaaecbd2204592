//! Candidate app resolution for each strategy.

use super::{Seed, Strategy};
use crate::Error;
use crate::keywords::{self, TextMiner, app_keywords};
use crate::store::{AppRecord, Marketplace, SearchQuery};
use futures_util::future::try_join_all;

const LOG_TARGET: &str = "   suggest";

/// Number of the seed app's keywords searched by the competition strategy.
const COMPETITION_KEYWORDS: usize = 10;

/// Number of top results taken per searched keyword.
const APPS_PER_KEYWORD: usize = 10;

/// Number of autocomplete suggestions considered per seed keyword.
const SUGGESTIONS_PER_SEED: usize = 15;

/// Check that `seed` has the shape `strategy` needs.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when a list strategy gets a single id, a single-app strategy
/// gets a list, or the list is empty
pub fn validate(seed: &Seed, strategy: Strategy) -> Result<(), Error> {
    match (seed, strategy.requires_list()) {
        (Seed::App(_), true) => Err(Error::InvalidInput(if strategy.seeds_are_keywords() {
            format!("the {strategy} strategy requires a list of seed keywords")
        } else {
            format!("the {strategy} strategy requires a list of app ids")
        })),
        (Seed::List(_), false) => Err(Error::InvalidInput(format!("the {strategy} strategy requires a single app id"))),
        (Seed::List(values), true) if values.is_empty() => Err(Error::InvalidInput(format!("the {strategy} strategy requires at least one seed"))),
        _ => Ok(()),
    }
}

/// Resolve the candidate apps of `strategy` for `seed`.
pub async fn candidates<M: Marketplace, T: TextMiner>(market: &M, miner: &T, seed: &Seed, strategy: Strategy) -> Result<Vec<AppRecord>, Error> {
    validate(seed, strategy)?;

    let apps = match (strategy, seed) {
        (Strategy::Similar, Seed::App(id)) => market.similar(id).await?,
        (Strategy::Category, Seed::App(id)) => category(market, id).await?,
        (Strategy::Competition, Seed::App(id)) => competition(market, miner, id).await?,
        (Strategy::Arbitrary, Seed::List(ids)) => try_join_all(ids.iter().map(|id| market.app(id))).await?,
        (Strategy::Keywords, Seed::List(keywords)) => top_apps(market, keywords).await?,
        (Strategy::Search, Seed::List(terms)) => {
            let keywords = search_keywords(market, miner, terms).await?;
            top_apps(market, &keywords).await?
        }
        _ => unreachable!("seed shape already validated"),
    };

    log::debug!(target: LOG_TARGET, "The {strategy} strategy resolved {} candidate apps", apps.len());
    Ok(apps)
}

fn without_app(apps: Vec<AppRecord>, id: &str) -> Vec<AppRecord> {
    apps.into_iter().filter(|app| app.id != id).collect()
}

async fn category<M: Marketplace>(market: &M, id: &str) -> Result<Vec<AppRecord>, Error> {
    let app = market.app(id).await?;
    let chart = market.list(&market.kind().collection_query(&app)).await?;
    Ok(without_app(chart, id))
}

async fn competition<M: Marketplace, T: TextMiner>(market: &M, miner: &T, id: &str) -> Result<Vec<AppRecord>, Error> {
    let app = market.app(id).await?;
    let mut keywords = app_keywords(miner, &app)?;
    keywords.truncate(COMPETITION_KEYWORDS);

    Ok(without_app(top_apps(market, &keywords).await?, id))
}

/// The top apps for each keyword, concatenated in keyword order.
///
/// Apps ranking for several keywords appear once per keyword.
async fn top_apps<M: Marketplace>(market: &M, keywords: &[String]) -> Result<Vec<AppRecord>, Error> {
    let queries: Vec<SearchQuery> = keywords
        .iter()
        .map(|keyword| SearchQuery::new(keyword.clone(), APPS_PER_KEYWORD).with_full_detail())
        .collect();
    let lists = try_join_all(queries.iter().map(|query| market.search(query))).await?;

    Ok(lists.into_iter().flatten().collect())
}

/// The distinct keywords found in the autocomplete suggestions for `terms`.
async fn search_keywords<M: Marketplace, T: TextMiner>(market: &M, miner: &T, terms: &[String]) -> Result<Vec<String>, Error> {
    let suggestions = try_join_all(terms.iter().map(|term| market.suggest(term))).await?;

    let mut keywords: Vec<String> = Vec::new();
    for suggestion in suggestions.iter().flat_map(|list| list.iter().take(SUGGESTIONS_PER_SEED)) {
        for keyword in keywords::extract(miner, &suggestion.term)? {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
    }

    Ok(keywords)
}
