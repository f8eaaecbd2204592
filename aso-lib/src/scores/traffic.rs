//! Keyword traffic
//!
//! A keyword carries a lot of traffic when the store suggests it early, it is short, the apps
//! ranking for it are popular, and those apps also place well in their top charts.

use super::suggest::{self as suggest_score, SuggestScore};
use super::{MAX_KEYWORD_LENGTH, TOP_APPS, as_f64, find_rank};
use crate::Error;
use crate::calc;
use crate::store::{AppRecord, CollectionQuery, InstallsScore, Marketplace};
use futures_util::future::try_join_all;
use serde::Serialize;

const LOG_TARGET: &str = "   traffic";

const SUGGEST_WEIGHT: f64 = 8.0;
const LENGTH_WEIGHT: f64 = 1.0;
const INSTALLS_WEIGHT: f64 = 2.0;
const RANKED_WEIGHT: f64 = 3.0;

const RANKED_COUNT_WEIGHT: f64 = 5.0;
const RANKED_POSITION_WEIGHT: f64 = 1.0;

/// Average chart positions past this get the lowest position score.
const MAX_AVERAGE_RANK: f64 = 100.0;

#[derive(Debug, Clone, Serialize)]
pub struct KeywordLength {
    pub length: usize,
    pub score: f64,
}

/// How many of the top apps place in their own chart, and how high.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranked {
    pub count: usize,
    pub avg_rank: Option<f64>,
    pub score: f64,
}

/// Traffic of a keyword with the statistics it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct Traffic {
    pub suggest: SuggestScore,
    pub ranked: Ranked,
    pub installs: InstallsScore,
    pub length: KeywordLength,
    pub score: f64,
}

impl Traffic {
    /// Recombine the breakdown with the fixed weights.
    #[must_use]
    pub fn weighted(&self) -> f64 {
        calc::aggregate(
            &[SUGGEST_WEIGHT, LENGTH_WEIGHT, INSTALLS_WEIGHT, RANKED_WEIGHT],
            &[self.suggest.score, self.length.score, self.installs.score, self.ranked.score],
        )
    }
}

/// Score the traffic of `keyword` given its search results, best first.
///
/// When the results only carry summaries, the top apps are fetched in full first.
///
/// # Errors
///
/// Returns [`Error::NoData`] if `apps` is empty, or [`Error::Upstream`] if a marketplace call fails
pub async fn score<M: Marketplace>(market: &M, keyword: &str, apps: &[AppRecord]) -> Result<Traffic, Error> {
    let Some(first) = apps.first() else {
        return Err(Error::NoData("traffic"));
    };

    let top = &apps[..apps.len().min(TOP_APPS)];
    let top = if first.has_detail() {
        top.to_vec()
    } else {
        log::debug!(target: LOG_TARGET, "Fetching details of the top {} apps for '{keyword}'", top.len());
        try_join_all(top.iter().map(|app| market.app(&app.id))).await?
    };

    let (ranked, suggest) = tokio::try_join!(ranked(market, &top), suggest_score::score(market, keyword))?;

    let length = keyword.chars().count();
    let mut traffic = Traffic {
        suggest,
        ranked,
        installs: market.kind().installs_score(&top)?,
        length: KeywordLength {
            length,
            score: calc::i_score(1.0, as_f64(MAX_KEYWORD_LENGTH), as_f64(length)),
        },
        score: 0.0,
    };
    traffic.score = traffic.weighted();

    Ok(traffic)
}

/// Rank each app within its own chart, fetching every distinct chart once.
async fn ranked<M: Marketplace>(market: &M, apps: &[AppRecord]) -> Result<Ranked, Error> {
    let kind = market.kind();
    let app_queries: Vec<CollectionQuery> = apps.iter().map(|app| kind.collection_query(app)).collect();

    let mut queries: Vec<&CollectionQuery> = Vec::new();
    for query in &app_queries {
        if !queries.contains(&query) {
            queries.push(query);
        }
    }

    let charts = try_join_all(queries.iter().map(|query| market.list(query))).await?;

    let ranks: Vec<usize> = apps
        .iter()
        .zip(&app_queries)
        .filter_map(|(app, query)| {
            let chart = queries.iter().position(|candidate| *candidate == query)?;
            find_rank(&charts[chart], &app.id)
        })
        .collect();

    if ranks.is_empty() {
        return Ok(Ranked {
            count: 0,
            avg_rank: None,
            score: 1.0,
        });
    }

    let count = ranks.len();
    let avg_rank = as_f64(ranks.iter().sum()) / as_f64(count);
    let score = calc::aggregate(
        &[RANKED_COUNT_WEIGHT, RANKED_POSITION_WEIGHT],
        &[
            calc::z_score(as_f64(TOP_APPS), as_f64(count)),
            calc::i_score(1.0, MAX_AVERAGE_RANK, avg_rank),
        ],
    );

    Ok(Ranked {
        count,
        avg_rank: Some(avg_rank),
        score,
    })
}
