use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::Report;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct ScoresArgs {
    /// Keyword to score
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_scores<H: Host>(host: &mut H, args: &ScoresArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let scores = common
        .analyzer
        .scores(&args.keyword)
        .await
        .into_app_err_with(|| format!("scoring keyword '{}'", args.keyword))?;

    common.report(&Report::Scores(&scores))
}
