#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for aso
//!
//! This library consolidates all functionality for the aso tool, which estimates how hard a
//! search keyword is to rank for in an app marketplace, how much traffic it carries, and how
//! visible a given app currently is.
//!
//! # Module Organization
//!
//! - [`calc`]: Normalization and weighted aggregation onto the 1..=10 scale
//! - [`store`]: The marketplace capability, per-store policy, and adapters
//! - [`keywords`]: Keyword extraction from free text and app records
//! - [`scores`]: Difficulty, traffic, and visibility scorers
//! - [`suggest`]: Candidate app selection strategies and keyword suggestion
//! - [`commands`]: Command-line interface and orchestration
//! - [`reports`]: Console and JSON output

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

mod analyzer;
pub mod calc;
mod error;
pub mod keywords;
pub mod scores;
pub mod store;
pub mod suggest;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use analyzer::Analyzer;
pub use commands::{Host, run};
pub use error::Error;
