//! App visibility
//!
//! Visibility adds up how well an app ranks for each of its own top keywords, weighted by the
//! traffic of the keyword, plus bonuses for placing in its global and category charts. Unlike
//! the other scores it is an open-ended sum: every extra ranking keyword raises it.

use super::{as_f64, find_rank, traffic};
use crate::Error;
use crate::calc;
use crate::keywords::{TextMiner, app_keywords};
use crate::store::{AppRecord, Marketplace, SearchQuery};
use futures_util::future::try_join_all;
use serde::Serialize;

const LOG_TARGET: &str = "visibility";

/// Number of the app's own keywords checked for a ranking.
const KEYWORD_COUNT: usize = 20;

const GLOBAL_CHART_WEIGHT: f64 = 100.0;
const CATEGORY_CHART_WEIGHT: f64 = 10.0;

/// How the app fares for one of its keywords.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordVisibility {
    pub keyword: String,
    pub rank: usize,
    pub traffic: f64,
    pub score: f64,
}

/// Where the app places in one chart; unranked apps score 0.
#[derive(Debug, Clone, Serialize)]
pub struct ChartVisibility {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Collections {
    pub global: ChartVisibility,
    pub category: ChartVisibility,
}

/// Visibility of an app with the keyword and chart placements it was computed from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub app_id: String,

    /// Only keywords the app ranks for, in the order they were extracted.
    pub keywords: Vec<KeywordVisibility>,
    pub collections: Collections,
    pub score: f64,
}

impl Visibility {
    /// Sum of the keyword and chart scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        let keywords: f64 = self.keywords.iter().map(|keyword| keyword.score).sum();
        calc::round(keywords + self.collections.global.score + self.collections.category.score)
    }
}

fn rank_score(weight: f64, list_size: usize, rank: Option<usize>) -> f64 {
    rank.map_or(0.0, |rank| calc::round(weight * calc::i_score(1.0, as_f64(list_size), as_f64(rank))))
}

/// Score how visible the app with `app_id` currently is.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if a marketplace or mining call fails
pub async fn score<M: Marketplace, T: TextMiner>(market: &M, miner: &T, app_id: &str) -> Result<Visibility, Error> {
    let app = market.app(app_id).await?;

    let (keywords, collections) = tokio::try_join!(keyword_scores(market, miner, &app), collection_scores(market, &app))?;

    let mut visibility = Visibility {
        app_id: app.id,
        keywords,
        collections,
        score: 0.0,
    };
    visibility.score = visibility.total();

    Ok(visibility)
}

async fn keyword_scores<M: Marketplace, T: TextMiner>(market: &M, miner: &T, app: &AppRecord) -> Result<Vec<KeywordVisibility>, Error> {
    let mut keywords = app_keywords(miner, app)?;
    keywords.truncate(KEYWORD_COUNT);

    let max_search = market.kind().max_search();
    let queries: Vec<SearchQuery> = keywords
        .iter()
        .map(|keyword| SearchQuery::new(keyword.clone(), max_search).with_full_detail())
        .collect();
    let lists = try_join_all(queries.iter().map(|query| market.search(query))).await?;

    let ranked: Vec<(String, usize, Vec<AppRecord>)> = keywords
        .into_iter()
        .zip(lists)
        .filter_map(|(keyword, list)| find_rank(&list, &app.id).map(|rank| (keyword, rank, list)))
        .collect();

    log::debug!(target: LOG_TARGET, "App '{}' ranks for {} of its keywords", app.id, ranked.len());

    let traffics = try_join_all(ranked.iter().map(|(keyword, _, list)| traffic::score(market, keyword, list))).await?;

    Ok(ranked
        .into_iter()
        .zip(traffics)
        .map(|((keyword, rank, _), traffic)| KeywordVisibility {
            keyword,
            rank,
            traffic: traffic.score,
            score: rank_score(traffic.score, max_search, Some(rank)),
        })
        .collect())
}

async fn collection_scores<M: Marketplace>(market: &M, app: &AppRecord) -> Result<Collections, Error> {
    let kind = market.kind();
    let category_query = kind.collection_query(app);
    let mut global_query = category_query.clone();
    global_query.category = None;

    let (global, category) = tokio::try_join!(market.list(&global_query), market.list(&category_query))?;

    let global_rank = find_rank(&global, &app.id);
    let category_rank = find_rank(&category, &app.id);

    Ok(Collections {
        global: ChartVisibility {
            rank: global_rank,
            score: rank_score(GLOBAL_CHART_WEIGHT, kind.max_list(), global_rank),
        },
        category: ChartVisibility {
            rank: category_rank,
            score: rank_score(CATEGORY_CHART_WEIGHT, kind.max_list(), category_rank),
        },
    })
}
