//! How readily a store suggests a keyword while the user types it.

use super::{MAX_KEYWORD_LENGTH, as_f64};
use crate::Error;
use crate::calc;
use crate::store::{ITUNES_PRIORITY_CEILING, Marketplace, SuggestScoring};
use serde::Serialize;

/// Suggestion positions past this get the lowest index score.
const MAX_SUGGESTION_INDEX: f64 = 4.0;

const LENGTH_WEIGHT: f64 = 10.0;
const INDEX_WEIGHT: f64 = 1.0;

/// Outcome of looking a keyword up in the store's suggestions.
///
/// A keyword the store never suggests scores 1, the bottom of the scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestScore {
    /// Shortest prefix, in characters, at which the keyword was suggested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// 0-based position of the keyword within the suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Priority the store attached to the suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,

    pub score: f64,
}

/// Score how readily the store suggests `keyword`, using the store's own suggestion policy.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if a suggest call fails
pub async fn score<M: Marketplace>(market: &M, keyword: &str) -> Result<SuggestScore, Error> {
    match market.kind().suggest_scoring() {
        SuggestScoring::PrefixDepth => prefix_depth(market, keyword).await,
        SuggestScoring::Priority => priority(market, keyword).await,
    }
}

/// Type the keyword one character at a time until the store suggests it.
async fn prefix_depth<M: Marketplace>(market: &M, keyword: &str) -> Result<SuggestScore, Error> {
    let chars: Vec<char> = keyword.chars().collect();
    let cap = chars.len().min(MAX_KEYWORD_LENGTH);

    for length in 1..=cap {
        let prefix: String = chars[..length].iter().collect();
        let suggestions = market.suggest(&prefix).await?;

        if let Some(index) = suggestions.iter().position(|suggestion| suggestion.term == keyword) {
            let score = calc::aggregate(
                &[LENGTH_WEIGHT, INDEX_WEIGHT],
                &[
                    calc::i_score(1.0, as_f64(MAX_KEYWORD_LENGTH), as_f64(length)),
                    calc::iz_score(MAX_SUGGESTION_INDEX, as_f64(index)),
                ],
            );

            return Ok(SuggestScore {
                length: Some(length),
                index: Some(index),
                priority: None,
                score,
            });
        }
    }

    Ok(SuggestScore {
        length: None,
        index: None,
        priority: None,
        score: 1.0,
    })
}

/// Look the whole keyword up once and score the priority the store reports for it.
async fn priority<M: Marketplace>(market: &M, keyword: &str) -> Result<SuggestScore, Error> {
    let suggestions = market.suggest(keyword).await?;
    let found = suggestions.iter().position(|suggestion| suggestion.term == keyword);
    let priority = found.and_then(|index| suggestions[index].priority);

    Ok(SuggestScore {
        length: None,
        index: found,
        priority,
        score: calc::z_score(ITUNES_PRIORITY_CEILING, priority.unwrap_or(0.0)),
    })
}
