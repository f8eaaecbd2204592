//! Keyword extraction
//!
//! Raw keyword mining is delegated to a [`TextMiner`]. This module post-processes what the miner
//! reports into the ordered keyword lists the scorers and the suggestion engine consume:
//! short phrases are preferred over single words, everything is lowercased, and trivial
//! single-character tokens are dropped.

mod miner;

pub use miner::FrequencyMiner;

use crate::Error;
use crate::store::AppRecord;
use std::collections::HashSet;

/// Phrases longer than this are not useful as search keywords.
const MAX_PHRASE_WORDS: usize = 3;

/// Phrases are boosted relative to single words.
const PHRASE_BOOST: f64 = 2.5;

const CONTRACTIONS: [&str; 5] = ["'t", "'s", "'ll", "'re", "'ve"];

/// A mined term and its relevance within the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub value: String,
    pub score: f64,
}

impl ScoredTerm {
    #[must_use]
    pub fn new(value: impl Into<String>, score: f64) -> Self {
        Self { value: value.into(), score }
    }
}

/// The keywords and keyphrases found in a piece of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinedText {
    pub words: Vec<ScoredTerm>,
    pub phrases: Vec<ScoredTerm>,
}

/// Finds scored keywords and keyphrases in free text.
///
/// Implementations must be deterministic: the same text always yields the same result.
pub trait TextMiner: Send + Sync {
    /// Mine `text` for keywords and keyphrases.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be processed
    fn mine(&self, text: &str) -> crate::Result<MinedText>;
}

fn strip_contractions(text: &str) -> String {
    CONTRACTIONS
        .iter()
        .fold(text.to_string(), |text, contraction| text.replace(contraction, ""))
}

/// Extract the keywords of `text`, best first.
///
/// Phrases of up to three words are boosted 2.5 times and replace any single word with the
/// same value. Values are lowercased, single-character values are dropped, and each value
/// appears once.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if the miner fails
pub fn extract(miner: &impl TextMiner, text: &str) -> Result<Vec<String>, Error> {
    let mined = miner.mine(&strip_contractions(text))?;

    let phrases: Vec<ScoredTerm> = mined
        .phrases
        .into_iter()
        .filter(|phrase| phrase.value.split(' ').count() <= MAX_PHRASE_WORDS)
        .map(|phrase| ScoredTerm::new(phrase.value.to_lowercase(), phrase.score * PHRASE_BOOST))
        .collect();

    let mut terms: Vec<ScoredTerm> = mined
        .words
        .into_iter()
        .map(|word| ScoredTerm::new(word.value.to_lowercase(), word.score))
        .filter(|word| !phrases.iter().any(|phrase| phrase.value == word.value))
        .collect();
    terms.extend(phrases);
    terms.retain(|term| term.value.chars().count() > 1);
    terms.sort_by(|left, right| right.score.total_cmp(&left.score));

    let mut seen = HashSet::with_capacity(terms.len());
    Ok(terms
        .into_iter()
        .filter(|term| seen.insert(term.value.clone()))
        .map(|term| term.value)
        .collect())
}

/// The keywords of an app: title keywords first, then summary and description keywords that
/// the title did not already yield.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if the miner fails
pub fn app_keywords(miner: &impl TextMiner, app: &AppRecord) -> Result<Vec<String>, Error> {
    let mut keywords = extract(miner, &app.title)?;

    let body = format!("{} {}", app.summary.as_deref().unwrap_or_default(), app.description);
    let title_keywords: HashSet<String> = keywords.iter().cloned().collect();
    keywords.extend(
        extract(miner, &body)?
            .into_iter()
            .filter(|keyword| !title_keywords.contains(keyword)),
    );

    Ok(keywords)
}
