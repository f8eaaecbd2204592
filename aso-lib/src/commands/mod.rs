//! Command-line interface and orchestration for aso
//!
//! This module implements the CLI commands and wires the marketplace adapters, the keyword
//! miner, the scorers, and the report generators together. It handles argument parsing,
//! configuration management, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **scores**: Search for a keyword and report its difficulty and traffic
//! - **visibility**: Report how visible an app is across its own keywords and charts
//! - **suggest**: Pick candidate apps with a strategy and report their most common keywords
//! - **keywords**: Report the keywords extracted from an app
//! - **init**: Generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. Each scoring command follows the same pattern:
//!
//! 1. Load `aso.toml` and layer the command-line flags over it
//! 2. Open the configured marketplace (catalog snapshot or HTTP gateway), memoized for the run
//! 3. Call the matching [`crate::Analyzer`] operation
//! 4. Render the result as a console report or JSON
//!
//! The `common` module holds the shared setup: logging, configuration, source selection, and
//! output rendering.

mod common;
mod config;
mod host;
mod init;
mod keywords;
mod run;
mod scores;
mod suggest;
mod visibility;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use keywords::{KeywordsArgs, process_keywords};
pub use run::run;
pub use scores::{ScoresArgs, process_scores};
pub use suggest::{SuggestArgs, process_suggest};
pub use visibility::{VisibilityArgs, process_visibility};
