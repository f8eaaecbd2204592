use super::{MinedText, ScoredTerm, TextMiner};
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("invalid regex"));

const DEFAULT_MAXIMUM: usize = 20;
const DEFAULT_MAX_PHRASE_WORDS: usize = 4;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "below", "between", "both", "but", "by", "can", "could", "did", "do", "does",
    "doing", "don", "down", "during", "each", "even", "every", "few", "for", "from", "further", "get", "gets", "got", "had",
    "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "let", "like", "make", "makes", "many", "may", "me", "more", "most", "much", "must",
    "my", "myself", "new", "no", "nor", "not", "now", "of", "off", "on", "once", "one", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "us", "use", "using", "very", "via", "was", "we", "well", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "within", "without", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Keyword and keyphrase miner driven by term frequency.
///
/// Text is split into runs of consecutive content words; punctuation, stop words, and
/// numbers end a run. Words are scored by their frequency relative to the most frequent word.
/// Keyphrases are the 2-word to `max_phrase_words`-word windows of each run, scored by how
/// often they occur times the mean score of their words, relative to the best phrase.
///
/// Surface forms keep the casing of their first occurrence. Output is deterministic: ties
/// keep first-occurrence order.
#[derive(Debug, Clone)]
pub struct FrequencyMiner {
    maximum: usize,
    max_phrase_words: usize,
}

impl Default for FrequencyMiner {
    fn default() -> Self {
        Self {
            maximum: DEFAULT_MAXIMUM,
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
        }
    }
}

#[derive(Debug)]
struct Tally {
    surface: String,
    count: usize,
    members: Vec<String>,
}

impl FrequencyMiner {
    /// Keep at most `maximum` words and `maximum` phrases.
    #[must_use]
    pub const fn with_maximum(mut self, maximum: usize) -> Self {
        self.maximum = maximum;
        self
    }

    fn is_stop_word(lower: &str) -> bool {
        STOP_WORDS.binary_search(&lower).is_ok()
    }

    fn runs(text: &str) -> Vec<Vec<&str>> {
        let mut runs = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut previous_end = 0;

        for token in TOKEN_REGEX.find_iter(text) {
            let gap = &text[previous_end..token.start()];
            previous_end = token.end();

            if gap.chars().any(|c| !c.is_whitespace()) && !current.is_empty() {
                runs.push(core::mem::take(&mut current));
            }

            let word = token.as_str();
            if !word.chars().any(char::is_alphabetic) || Self::is_stop_word(&word.to_lowercase()) {
                if !current.is_empty() {
                    runs.push(core::mem::take(&mut current));
                }
                continue;
            }

            current.push(word);
        }

        if !current.is_empty() {
            runs.push(current);
        }

        runs
    }

    fn tally<'a>(tallies: &mut Vec<Tally>, index: &mut HashMap<String, usize>, words: impl Iterator<Item = &'a str>) {
        let words: Vec<&str> = words.collect();
        let key = words.iter().map(|word| word.to_lowercase()).collect::<Vec<_>>().join(" ");

        if let Some(&at) = index.get(&key) {
            tallies[at].count += 1;
        } else {
            let _ = index.insert(key, tallies.len());
            tallies.push(Tally {
                surface: words.join(" "),
                count: 1,
                members: words.iter().map(|word| word.to_lowercase()).collect(),
            });
        }
    }

    fn top(&self, mut scored: Vec<ScoredTerm>) -> Vec<ScoredTerm> {
        scored.sort_by(|left, right| right.score.total_cmp(&left.score));
        scored.truncate(self.maximum);
        scored
    }
}

#[expect(clippy::cast_precision_loss, reason = "occurrence counts are small")]
impl TextMiner for FrequencyMiner {
    fn mine(&self, text: &str) -> Result<MinedText> {
        let runs = Self::runs(text);

        let mut words = Vec::new();
        let mut word_index = HashMap::new();
        for word in runs.iter().flatten() {
            Self::tally(&mut words, &mut word_index, core::iter::once(*word));
        }

        let max_count = words.iter().map(|tally| tally.count).max().unwrap_or(1) as f64;
        let word_scores: HashMap<&str, f64> = words
            .iter()
            .map(|tally| (tally.members[0].as_str(), tally.count as f64 / max_count))
            .collect();

        let mut phrases = Vec::new();
        let mut phrase_index = HashMap::new();
        for run in &runs {
            for size in 2..=self.max_phrase_words.min(run.len()) {
                for window in run.windows(size) {
                    Self::tally(&mut phrases, &mut phrase_index, window.iter().copied());
                }
            }
        }

        let raw_phrase_scores: Vec<f64> = phrases
            .iter()
            .map(|tally| {
                let mean = tally.members.iter().map(|member| word_scores.get(member.as_str()).copied().unwrap_or(0.0)).sum::<f64>()
                    / tally.members.len() as f64;
                tally.count as f64 * mean
            })
            .collect();
        let best_phrase = raw_phrase_scores.iter().copied().fold(0.0_f64, f64::max);

        let scored_words = words
            .iter()
            .map(|tally| ScoredTerm::new(tally.surface.clone(), tally.count as f64 / max_count))
            .collect();

        let scored_phrases = phrases
            .iter()
            .zip(raw_phrase_scores)
            .map(|(tally, raw)| ScoredTerm::new(tally.surface.clone(), if best_phrase > 0.0 { raw / best_phrase } else { 0.0 }))
            .collect();

        Ok(MinedText {
            words: self.top(scored_words),
            phrases: self.top(scored_phrases),
        })
    }
}
