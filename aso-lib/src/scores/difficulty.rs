//! Keyword difficulty
//!
//! A keyword is hard to rank for when the apps already ranking for it name it in their titles,
//! list it among their top keywords, are widely installed, are well rated, and are actively
//! maintained.

use super::{TOP_APPS, as_f64};
use crate::Error;
use crate::calc;
use crate::keywords::{TextMiner, app_keywords};
use crate::store::{AppRecord, InstallsScore, StoreKind};
use chrono::{DateTime, Utc};
use serde::Serialize;

const TITLE_WEIGHT: f64 = 4.0;
const COMPETITORS_WEIGHT: f64 = 3.0;
const INSTALLS_WEIGHT: f64 = 5.0;
const RATING_WEIGHT: f64 = 2.0;
const AGE_WEIGHT: f64 = 1.0;

/// An app is a competitor when the keyword is among this many of its top keywords.
const COMPETITOR_KEYWORDS: usize = 10;

/// Apps not updated for this many days get the lowest age score. Apps without an update
/// timestamp count as this old.
const AGE_MAX_DAYS: f64 = 500.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// How a title relates to a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// The whole keyword appears in the title.
    Exact,

    /// Every word of the keyword appears somewhere in the title.
    Broad,

    /// Some word of the keyword appears in the title.
    Partial,

    None,
}

impl MatchType {
    #[must_use]
    pub fn classify(keyword: &str, title: &str) -> Self {
        let keyword = keyword.to_lowercase();
        let title = title.to_lowercase();

        if title.contains(&keyword) {
            return Self::Exact;
        }

        let present: Vec<bool> = keyword.split(' ').map(|word| title.contains(word)).collect();
        if present.iter().all(|&found| found) {
            Self::Broad
        } else if present.iter().any(|&found| found) {
            Self::Partial
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleMatches {
    pub exact: usize,
    pub broad: usize,
    pub partial: usize,
    pub none: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Competitors {
    pub count: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub avg: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Age {
    pub avg_days_since_updated: f64,
    pub score: f64,
}

/// Difficulty of a keyword with the statistics it was computed from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Difficulty {
    pub title_matches: TitleMatches,
    pub competitors: Competitors,
    pub installs: InstallsScore,
    pub rating: Rating,
    pub age: Age,
    pub score: f64,
}

impl Difficulty {
    /// Recombine the breakdown with the fixed weights.
    #[must_use]
    pub fn weighted(&self) -> f64 {
        calc::aggregate(
            &[TITLE_WEIGHT, COMPETITORS_WEIGHT, INSTALLS_WEIGHT, RATING_WEIGHT, AGE_WEIGHT],
            &[
                self.title_matches.score,
                self.competitors.score,
                self.installs.score,
                self.rating.score,
                self.age.score,
            ],
        )
    }
}

/// Score the difficulty of `keyword` given its search results, best first.
///
/// # Errors
///
/// Returns [`Error::NoData`] if `apps` is empty, or [`Error::Upstream`] if keyword mining fails
pub fn score(miner: &impl TextMiner, kind: StoreKind, keyword: &str, apps: &[AppRecord]) -> Result<Difficulty, Error> {
    score_at(miner, kind, keyword, apps, Utc::now())
}

pub(crate) fn score_at(
    miner: &impl TextMiner,
    kind: StoreKind,
    keyword: &str,
    apps: &[AppRecord],
    now: DateTime<Utc>,
) -> Result<Difficulty, Error> {
    if apps.is_empty() {
        return Err(Error::NoData("difficulty"));
    }

    let top = &apps[..apps.len().min(TOP_APPS)];

    let mut difficulty = Difficulty {
        title_matches: title_matches(keyword, top),
        competitors: competitors(miner, keyword, top)?,
        installs: kind.installs_score(top)?,
        rating: rating(top),
        age: age(top, now),
        score: 0.0,
    };
    difficulty.score = difficulty.weighted();

    Ok(difficulty)
}

fn title_matches(keyword: &str, apps: &[AppRecord]) -> TitleMatches {
    let mut matches = TitleMatches {
        exact: 0,
        broad: 0,
        partial: 0,
        none: 0,
        score: 0.0,
    };

    for app in apps {
        match MatchType::classify(keyword, &app.title) {
            MatchType::Exact => matches.exact += 1,
            MatchType::Broad => matches.broad += 1,
            MatchType::Partial => matches.partial += 1,
            MatchType::None => matches.none += 1,
        }
    }

    let weighted = 10.0 * as_f64(matches.exact) + 5.0 * as_f64(matches.broad) + 2.5 * as_f64(matches.partial);
    matches.score = calc::round(weighted / as_f64(apps.len()));
    matches
}

fn competitors(miner: &impl TextMiner, keyword: &str, apps: &[AppRecord]) -> Result<Competitors, Error> {
    let mut count = 0;
    for app in apps {
        let keywords = app_keywords(miner, app)?;
        if keywords.iter().take(COMPETITOR_KEYWORDS).any(|candidate| candidate == keyword) {
            count += 1;
        }
    }

    Ok(Competitors {
        count,
        score: calc::z_score(as_f64(apps.len()), as_f64(count)),
    })
}

fn rating(apps: &[AppRecord]) -> Rating {
    let avg = apps.iter().map(|app| app.score.unwrap_or(0.0)).sum::<f64>() / as_f64(apps.len());
    Rating {
        avg,
        score: calc::round(avg * 2.0),
    }
}

#[expect(clippy::cast_precision_loss, reason = "millisecond spans of app lifetimes fit in f64")]
fn days_since(updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    updated.map_or(AGE_MAX_DAYS, |updated| {
        ((now - updated).num_milliseconds() as f64 / MILLIS_PER_DAY).floor()
    })
}

fn age(apps: &[AppRecord], now: DateTime<Utc>) -> Age {
    let avg = apps.iter().map(|app| days_since(app.updated, now)).sum::<f64>() / as_f64(apps.len());
    Age {
        avg_days_since_updated: avg,
        score: calc::iz_score(AGE_MAX_DAYS, avg),
    }
}
