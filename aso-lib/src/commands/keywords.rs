use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::{AppKeywords, Report};
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct KeywordsArgs {
    /// Id of the app whose keywords are extracted
    #[arg(value_name = "APP_ID")]
    pub app_id: String,

    /// Show at most this many keywords
    #[arg(long, short = 'n', value_name = "N")]
    pub num: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_keywords<H: Host>(host: &mut H, args: &KeywordsArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let mut keywords = common
        .analyzer
        .app_keywords(&args.app_id)
        .await
        .into_app_err_with(|| format!("extracting keywords of '{}'", args.app_id))?;

    if let Some(num) = args.num {
        keywords.truncate(num);
    }

    common.report(&Report::Keywords(AppKeywords {
        app_id: &args.app_id,
        keywords: &keywords,
    }))
}
