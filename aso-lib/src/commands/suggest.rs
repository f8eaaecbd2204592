use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::Report;
use crate::suggest::{Seed, Strategy, SuggestOptions};
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// App id for the similar, competition and category strategies; app ids or keywords for the others
    #[arg(value_name = "SEED", required = true)]
    pub seeds: Vec<String>,

    /// How candidate apps are chosen: similar, competition, category, arbitrary, keywords or search
    #[arg(long, short = 's', value_name = "STRATEGY", default_value = "category")]
    pub strategy: String,

    /// Number of keywords to suggest (default taken from the configuration)
    #[arg(long, short = 'n', value_name = "N")]
    pub num: Option<usize>,

    /// Never suggest this keyword
    #[arg(long, value_name = "KEYWORD")]
    pub exclude: Vec<String>,

    /// Leave the seed keywords themselves out of the suggestions
    #[arg(long)]
    pub exclude_seeds: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_suggest<H: Host>(host: &mut H, args: &SuggestArgs) -> Result<()> {
    // reject a bad strategy before touching configuration or the marketplace
    let strategy = Strategy::parse(&args.strategy).into_app_err("parsing --strategy")?;
    let seed = Seed::for_strategy(strategy, args.seeds.clone());
    crate::suggest::validate(&seed, strategy).into_app_err("checking seeds")?;

    let mut common = Common::new(host, &args.common)?;

    let options = SuggestOptions {
        num: args.num.unwrap_or(common.config.suggestion_count),
        exclude: args.exclude.clone(),
        exclude_seeds: args.exclude_seeds,
    };

    let suggestions = common
        .analyzer
        .suggest(&seed, strategy, &options)
        .await
        .into_app_err_with(|| format!("suggesting keywords with the {strategy} strategy"))?;

    common.report(&Report::Suggestions(&suggestions))
}
