pub mod account;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod progress;
pub mod projection;
pub mod query;
pub mod report;
pub mod source;
pub mod trace;

use crate::config::AppConfig;
use crate::progress::ProgressSource;
use crate::report::StdoutSink;
use crate::source::{AccountSource, HttpSource, ReplaySource};
use anyhow::Context;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub use account::AccountRecord;
pub use cli::{Cli, ColorMode, Commands, QueryArgs, cli_parse};
pub use error::AccountsError;
pub use fetch::{PageFetcher, fetch_all_instances};
pub use filter::{AccountMatcher, FilterExpression, FilterParseError};
pub use projection::{Projection, project};
pub use query::{AccountQuery, get_cloud_accounts, normalize_instance_ids, run_query};
pub use report::{AggregateResult, OutputFormat, ResultSink, render};

/// Route `tracing` output to stderr; `RUST_LOG` wins over `-v`/`-q`
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cloud_accounts={default_level},ureq=warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

impl From<&QueryArgs> for AccountQuery {
    fn from(args: &QueryArgs) -> Self {
        AccountQuery::new(&args.instance_ids)
            .filter(args.filter.clone())
            .case_sensitive(args.case_sensitive)
            .debug(args.debug)
    }
}

fn execute(
    query: &AccountQuery,
    source: &dyn AccountSource,
    config: &AppConfig,
    sink: &mut StdoutSink,
    show_progress: bool,
) -> anyhow::Result<()> {
    let fetcher = config.page_fetcher().map_err(AccountsError::from)?;
    let progress = ProgressSource::new(source, show_progress);
    let outcome = run_query(query, &progress, &fetcher, sink);
    progress.finish();
    outcome.map(|_| ())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    cli.color.apply();
    init_logging(cli.verbose, cli.quiet);

    dispatch(&cli).context("get-accounts failed")
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let mut config = config::load_config(cli.config.as_deref()).map_err(AccountsError::from)?;
    let mut sink = StdoutSink::new(cli.format, cli.output.clone());
    let show_progress = !cli.quiet && std::io::stderr().is_terminal();

    match &cli.command {
        Commands::Accounts {
            query,
            api_url,
            api_key,
            api_key_id,
            page_size,
        } => {
            if let Some(url) = api_url {
                config.api.base_url = Some(url.clone());
            }
            if let Some(key) = api_key {
                config.api.api_key = Some(key.clone());
            }
            if let Some(key_id) = api_key_id {
                config.api.api_key_id = Some(key_id.clone());
            }
            if let Some(size) = page_size {
                config.paging.page_size = *size;
            }

            let query = AccountQuery::from(query);
            let source_config = config.http_source_config().map_err(AccountsError::from)?;
            let source = HttpSource::new(source_config);
            execute(&query, &source, &config, &mut sink, show_progress)
        }
        Commands::Replay {
            file,
            query,
            page_size,
        } => {
            if let Some(size) = page_size {
                config.paging.page_size = *size;
            }

            let query = AccountQuery::from(query);
            let source = ReplaySource::load(file).map_err(AccountsError::from)?;
            execute(&query, &source, &config, &mut sink, show_progress)
        }
    }
}
