//! The engine's public facade.
//!
//! Keywords are compared against lowercase mined keywords and store suggestions, so every
//! keyword entering through the facade is lowercased first.

use crate::Error;
use crate::keywords::{FrequencyMiner, TextMiner, app_keywords};
use crate::scores::{self, Difficulty, KeywordScores, Traffic, Visibility};
use crate::store::{AppRecord, Marketplace, SearchQuery};
use crate::suggest::{self, Seed, Strategy, SuggestOptions, SuggestedKeyword};

/// Entry point of the scoring and suggestion engine.
///
/// Binds a marketplace and a keyword miner together so callers do not have to thread them
/// through every call.
#[derive(Debug)]
pub struct Analyzer<M, T = FrequencyMiner> {
    market: M,
    miner: T,
}

impl<M: Marketplace> Analyzer<M> {
    #[must_use]
    pub fn new(market: M) -> Self {
        Self::with_miner(market, FrequencyMiner::default())
    }
}

impl<M: Marketplace, T: TextMiner> Analyzer<M, T> {
    #[must_use]
    pub const fn with_miner(market: M, miner: T) -> Self {
        Self { market, miner }
    }

    #[must_use]
    pub const fn market(&self) -> &M {
        &self.market
    }

    /// Difficulty of `keyword` given its top search results. The keyword is lowercased first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] if `apps` is empty, or [`Error::Upstream`] if mining fails
    pub fn difficulty(&self, keyword: &str, apps: &[AppRecord]) -> Result<Difficulty, Error> {
        scores::difficulty::score(&self.miner, self.market.kind(), &keyword.to_lowercase(), apps)
    }

    /// Traffic of `keyword` given its top search results. The keyword is lowercased first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] if `apps` is empty, or [`Error::Upstream`] if a marketplace call fails
    pub async fn traffic(&self, keyword: &str, apps: &[AppRecord]) -> Result<Traffic, Error> {
        scores::traffic::score(&self.market, &keyword.to_lowercase(), apps).await
    }

    /// Search for `keyword` and score both its difficulty and traffic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] if the search finds nothing, or [`Error::Upstream`] if a call fails
    pub async fn scores(&self, keyword: &str) -> Result<KeywordScores, Error> {
        scores::keyword_scores(&self.market, &self.miner, keyword).await
    }

    /// Visibility of the app with `app_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] if a marketplace or mining call fails
    pub async fn visibility(&self, app_id: &str) -> Result<Visibility, Error> {
        scores::visibility::score(&self.market, &self.miner, app_id).await
    }

    /// Suggest keywords for `seed` using `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the seed does not fit the strategy, or
    /// [`Error::Upstream`] if a call fails
    pub async fn suggest(&self, seed: &Seed, strategy: Strategy, options: &SuggestOptions) -> Result<Vec<SuggestedKeyword>, Error> {
        suggest::suggest(&self.market, &self.miner, seed, strategy, options).await
    }

    /// The extracted keywords of the app with `app_id`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] if the app cannot be fetched or mining fails
    pub async fn app_keywords(&self, app_id: &str) -> Result<Vec<String>, Error> {
        let app = self.market.app(app_id).await?;
        app_keywords(&self.miner, &app)
    }
}
