use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::Report;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct VisibilityArgs {
    /// Id of the app to score
    #[arg(value_name = "APP_ID")]
    pub app_id: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_visibility<H: Host>(host: &mut H, args: &VisibilityArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let visibility = common
        .analyzer
        .visibility(&args.app_id)
        .await
        .into_app_err_with(|| format!("scoring visibility of '{}'", args.app_id))?;

    common.report(&Report::Visibility(&visibility))
}
