//! Keyword and app scoring
//!
//! Every scorer gathers a handful of raw statistics from the marketplace, normalizes each one
//! onto the 1..=10 scale, and combines them with fixed weights. The breakdown is part of the
//! result so callers can see which statistic drove the score.
//!
//! - [`difficulty`]: how hard it is to rank for a keyword
//! - [`traffic`]: how much search traffic a keyword carries
//! - [`suggest`]: how readily the store suggests a keyword while typing (a traffic input)
//! - [`visibility`]: how visible an app currently is across its keywords and charts

pub mod difficulty;
pub mod suggest;
pub mod traffic;
pub mod visibility;

pub use difficulty::Difficulty;
pub use suggest::SuggestScore;
pub use traffic::Traffic;
pub use visibility::Visibility;

use crate::Error;
use crate::keywords::TextMiner;
use crate::store::{AppRecord, Marketplace, SearchQuery};
use serde::Serialize;

/// Number of leading search results most statistics look at.
pub const TOP_APPS: usize = 10;

/// Number of search results fetched when scoring a keyword from scratch.
const SEARCH_DEPTH: usize = 100;

/// Keywords longer than this are assumed to carry no traffic.
const MAX_KEYWORD_LENGTH: usize = 25;

/// 1-based position of the app with `id` in `apps`.
#[must_use]
pub fn find_rank(apps: &[AppRecord], id: &str) -> Option<usize> {
    apps.iter().position(|app| app.id == id).map(|index| index + 1)
}

#[expect(clippy::cast_precision_loss, reason = "counts and ranks are small")]
const fn as_f64(value: usize) -> f64 {
    value as f64
}

/// Difficulty and traffic of one keyword, scored from the same search.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordScores {
    pub keyword: String,
    pub difficulty: Difficulty,
    pub traffic: Traffic,
}

/// Search for `keyword` and score its difficulty and traffic concurrently.
///
/// The keyword is lowercased before searching.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if a marketplace or mining call fails, or [`Error::NoData`] if the
/// search returns no apps
pub async fn keyword_scores<M: Marketplace, T: TextMiner>(market: &M, miner: &T, keyword: &str) -> Result<KeywordScores, Error> {
    let keyword = keyword.to_lowercase();
    let apps = market
        .search(&SearchQuery::new(keyword.clone(), SEARCH_DEPTH).with_full_detail())
        .await?;

    let (difficulty, traffic) = tokio::try_join!(
        async { difficulty::score(miner, market.kind(), &keyword, &apps) },
        traffic::score(market, &keyword, &apps),
    )?;

    Ok(KeywordScores {
        keyword,
        difficulty,
        traffic,
    })
}
