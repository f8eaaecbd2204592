//! Setup and output handling shared by the scoring commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::analyzer::Analyzer;
use crate::reports::{Report, generate_console, generate_json};
use crate::store::{CatalogMarketplace, HttpMarketplace, Memoized, Source, StoreKind};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::{IntoAppError, bail};
use std::io::Write;

const LOG_TARGET: &str = "    common";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every scoring command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `aso.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Marketplace to score against
    #[arg(long, value_name = "STORE")]
    pub store: Option<StoreKind>,

    /// Serve marketplace data from a JSON catalog snapshot (takes precedence over --endpoint)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<Utf8PathBuf>,

    /// Base URL of the marketplace gateway
    #[arg(long, value_name = "URL", env = "ASO_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Write results as JSON instead of a console report
    #[arg(long)]
    pub json: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common<'a, H: Host> {
    pub analyzer: Analyzer<Memoized<Source>>,
    pub config: Config,
    host: &'a mut H,
    color: ColorMode,
    json: bool,
}

impl<'a, H: Host> Common<'a, H> {
    /// Load the configuration, apply command-line overrides, and connect to the marketplace
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no marketplace can be reached
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let base_dir = Utf8PathBuf::try_from(std::env::current_dir()?).into_app_err("current directory is not valid UTF-8")?;
        let config = resolve_config(&base_dir, args)?;
        let source = open_source(&config)?;

        log::info!(target: LOG_TARGET, "Scoring against {}", config.store);

        Ok(Self {
            analyzer: Analyzer::new(Memoized::new(source)),
            config,
            host,
            color: args.color,
            json: args.json,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // a second command in the same process keeps the first logger
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Render `report` to the host's output in the requested format
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be rendered or written
    pub fn report(&mut self, report: &Report<'_>) -> Result<()> {
        let mut rendered = String::new();

        if self.json {
            generate_json(report, &mut rendered)?;
        } else {
            let use_colors = match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };
            generate_console(report, use_colors, &mut rendered)?;
        }

        write!(self.host.output(), "{rendered}")?;
        Ok(())
    }
}

/// Load the configuration file and layer the command-line flags over it.
fn resolve_config(base_dir: &Utf8Path, args: &CommonArgs) -> Result<Config> {
    let mut config = Config::load(base_dir, args.config.as_ref())?;

    if let Some(store) = args.store {
        config.store = store;
    }

    // an explicit source on the command line replaces whatever the file selects
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(catalog.clone());
        config.endpoint = None;
    } else if let Some(endpoint) = &args.endpoint {
        config.endpoint = Some(endpoint.clone());
        config.catalog = None;
    }

    config.validate()?;
    Ok(config)
}

fn open_source(config: &Config) -> Result<Source> {
    if let Some(catalog) = &config.catalog {
        return Ok(Source::Catalog(CatalogMarketplace::load(catalog, config.store)?));
    }

    if let Some(endpoint) = &config.endpoint {
        return Ok(Source::Http(HttpMarketplace::new(
            config.store,
            endpoint,
            config.request_timeout,
            config.max_concurrent_requests,
        )?));
    }

    bail!("no marketplace configured: pass --catalog or --endpoint, or set `catalog` or `endpoint` in aso.toml")
}
