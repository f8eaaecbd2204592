use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `aso.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(CONFIG_FILE_NAME));

    if output.exists() && !args.force {
        bail!("'{output}' already exists, pass --force to overwrite it");
    }

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn init_args(output: &Utf8PathBuf, force: bool) -> InitArgs {
        InitArgs {
            output: Some(output.clone()),
            force,
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_writes_loadable_config() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("aso.toml")).unwrap();
        let mut host = TestHost::default();

        init_config(&mut host, &init_args(&output, false)).unwrap();
        assert!(host.output_str().contains("aso.toml"));

        let config = Config::load(output.parent().unwrap(), Some(&output)).unwrap();
        config.validate().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("aso.toml")).unwrap();
        std::fs::write(&output, "# mine").unwrap();
        let mut host = TestHost::default();

        assert!(init_config(&mut host, &init_args(&output, false)).is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# mine");

        init_config(&mut host, &init_args(&output, true)).unwrap();
        assert_ne!(std::fs::read_to_string(&output).unwrap(), "# mine");
    }
}
