//! Command dispatch logic for aso

use super::{
    InitArgs, KeywordsArgs, ScoresArgs, SuggestArgs, VisibilityArgs, init_config, process_keywords, process_scores, process_suggest,
    process_visibility,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "aso", bin_name = "aso", version, author, long_about = None)]
#[command(about = "Score app store keywords for difficulty, traffic and app visibility")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: AsoSubcommand,
}

#[derive(Subcommand, Debug)]
enum AsoSubcommand {
    /// Score the difficulty and traffic of a keyword
    Scores(Box<ScoresArgs>),
    /// Score how visible an app is across its keywords and charts
    Visibility(Box<VisibilityArgs>),
    /// Suggest keywords from apps chosen by a strategy
    Suggest(Box<SuggestArgs>),
    /// Show the keywords extracted from an app
    Keywords(Box<KeywordsArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        AsoSubcommand::Scores(scores_args) => process_scores(host, scores_args).await,
        AsoSubcommand::Visibility(visibility_args) => process_visibility(host, visibility_args).await,
        AsoSubcommand::Suggest(suggest_args) => process_suggest(host, suggest_args).await,
        AsoSubcommand::Keywords(keywords_args) => process_keywords(host, keywords_args).await,
        AsoSubcommand::Init(init_args) => init_config(host, init_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_suggest_takes_many_seeds() {
        let cli = Cli::parse_from(["aso", "suggest", "--strategy", "keywords", "todo", "task list", "--exclude", "app"]);
        let AsoSubcommand::Suggest(args) = cli.command else {
            panic!("expected the suggest command");
        };
        assert_eq!(args.seeds, ["todo", "task list"]);
        assert_eq!(args.strategy, "keywords");
        assert_eq!(args.exclude, ["app"]);
        assert!(!args.exclude_seeds);
    }
}
