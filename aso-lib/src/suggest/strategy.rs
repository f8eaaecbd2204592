use crate::Error;
use core::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How the candidate apps for a keyword suggestion are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strategy {
    /// Apps the store lists as similar to the seed app.
    Similar,

    /// Apps ranking for the seed app's own top keywords.
    Competition,

    /// Top apps of the seed app's chart and category.
    #[default]
    Category,

    /// A caller-supplied list of apps.
    Arbitrary,

    /// Top apps for caller-supplied keywords.
    Keywords,

    /// Top apps for the keywords found in the store's autocomplete suggestions for the seeds.
    Search,
}

impl Strategy {
    /// Parse a strategy tag, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStrategy`] if the tag names no strategy
    pub fn parse(tag: &str) -> Result<Self, Error> {
        Self::from_str(tag.trim())
            .ok()
            .ok_or_else(|| Error::InvalidStrategy(tag.to_string()))
    }

    /// Whether the strategy takes a list of seeds rather than a single app id.
    #[must_use]
    pub const fn requires_list(self) -> bool {
        matches!(self, Self::Arbitrary | Self::Keywords | Self::Search)
    }

    /// Whether the seeds are keywords rather than app ids.
    #[must_use]
    pub const fn seeds_are_keywords(self) -> bool {
        matches!(self, Self::Keywords | Self::Search)
    }
}
