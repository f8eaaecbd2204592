//! Report generation for scoring and suggestion results
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: Aligned human-readable breakdowns with optional ANSI colors
//! - **JSON**: Machine-readable structured data, the serialized result itself
//!
//! Both generators operate on the same input, a [`Report`] borrowing the result of one command,
//! so callers can pick the format at the last moment.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

use crate::scores::{KeywordScores, Visibility};
use crate::suggest::SuggestedKeyword;
use serde::Serialize;

/// The extracted keywords of one app.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppKeywords<'a> {
    pub app_id: &'a str,
    pub keywords: &'a [String],
}

/// The result of one command, ready to be rendered.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Scores(&'a KeywordScores),
    Visibility(&'a Visibility),
    Suggestions(&'a [SuggestedKeyword]),
    Keywords(AppKeywords<'a>),
}
