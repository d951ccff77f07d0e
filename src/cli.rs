mod options;

use clap::{ArgAction, Args, Parser, Subcommand};
pub use crate::report::OutputFormat;
pub use options::ColorMode;
use std::path::PathBuf;

/// Look up cloud accounts registered in Cloud Onboarding integration instances
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "CLOUD_ACCOUNTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Also write the rendered result to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and hide progress
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to color terminal output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query live integration instances through the public API
    Accounts {
        #[command(flatten)]
        query: QueryArgs,

        /// Tenant API URL
        #[arg(long, env = "CORTEX_API_URL")]
        api_url: Option<String>,

        /// API key sent in the Authorization header
        #[arg(long, env = "CORTEX_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// API key id sent in the x-xdr-auth-id header
        #[arg(long, env = "CORTEX_API_KEY_ID")]
        api_key_id: Option<String>,

        /// Accounts requested per page
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Run the same lookup against a local account dump (JSON or JSON5)
    Replay {
        /// Dump file: a list of accounts, or an object keyed by instance id
        file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,

        /// Accounts requested per page
        #[arg(long)]
        page_size: Option<usize>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Integration instance id; repeat, separate with commas or pass a JSON array
    #[arg(short = 'i', long = "instance-id")]
    pub instance_ids: Vec<String>,

    /// Filter on account name: "SOC", "-r ^AWS-SOC.*", "-or SOC, PROD", "-and SOC, Production"
    #[arg(short, long, allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Match the filter case-sensitively
    #[arg(short, long)]
    pub case_sensitive: bool,

    /// Include the diagnostic trace in the result
    #[arg(long)]
    pub debug: bool,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
