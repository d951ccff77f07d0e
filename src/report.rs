mod markdown;
mod sink;
mod table;

pub use markdown::format_markdown;
pub use sink::{ResultSink, StdoutSink, render};
pub use table::format_table;

use crate::account::AccountRecord;
use crate::fetch::InstanceOutcome;
use crate::trace::DiagnosticTrace;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary in markdown, as shown in a war room
    Markdown,
    /// Structured result as pretty JSON
    Json,
    /// One row per matching account
    Table,
}

/// Final answer of one `get_cloud_accounts` invocation
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub instance_ids: Vec<String>,
    pub filter_keyword: Option<String>,
    pub case_sensitive: bool,
    /// Number of ids in `values`
    pub results_count: usize,
    /// Matching `cloud_account_id`s, in encounter order
    pub values: Vec<String>,
    pub account_names: Vec<String>,
    /// Accounts fetched across all instances, before filtering
    pub fetched_count: usize,
    pub matched_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_trace: Option<DiagnosticTrace>,

    #[serde(skip)]
    pub matched: Vec<AccountRecord>,
    #[serde(skip)]
    pub instance_outcomes: Vec<InstanceOutcome>,
}
