use crate::error::AccountsError;
use crate::fetch::{PageFetcher, fetch_all_instances};
use crate::filter::{AccountMatcher, FilterExpression};
use crate::projection::project;
use crate::report::{AggregateResult, ResultSink};
use crate::source::AccountSource;
use crate::trace::DiagnosticTrace;
use serde_json::Value;
use tracing::info;

/// Arguments of one account lookup, as handed over by the host
#[derive(Debug, Clone, Default)]
pub struct AccountQuery {
    pub instance_ids: Vec<String>,
    pub filter_keyword: Option<String>,
    pub case_sensitive: bool,
    pub debug: bool,
}

impl AccountQuery {
    /// Build a query; instance ids go through [`normalize_instance_ids`]
    pub fn new<I, S>(instance_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            instance_ids: normalize_instance_ids(instance_ids),
            ..Self::default()
        }
    }

    pub fn filter(mut self, keyword: Option<impl Into<String>>) -> Self {
        self.filter_keyword = keyword.map(|k| k.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Turn host-supplied instance arguments into a flat list.
///
/// Each argument may be a single id, a comma-separated list or a JSON array.
/// Ids are trimmed, blanks dropped, order kept.
pub fn normalize_instance_ids<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids = Vec::new();
    for arg in raw {
        let arg = arg.as_ref().trim();
        if arg.starts_with('[') {
            if let Ok(items) = serde_json::from_str::<Vec<Value>>(arg) {
                ids.extend(items.iter().filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }));
                continue;
            }
        }
        ids.extend(arg.split(',').map(|id| id.trim().to_string()));
    }
    ids.retain(|id| !id.is_empty());
    ids
}

/// Look up, filter and project cloud accounts across instances.
///
/// Argument and filter problems fail before any page is requested. Failures
/// of individual instances are recorded in the trace and otherwise ignored.
pub fn get_cloud_accounts(
    query: &AccountQuery,
    source: &dyn AccountSource,
    fetcher: &PageFetcher,
) -> Result<AggregateResult, AccountsError> {
    let mut trace = DiagnosticTrace::new();
    trace.push(format!(
        "Arguments - instance_ids: {:?}, filter_keyword: {:?}, case_sensitive: {}",
        query.instance_ids, query.filter_keyword, query.case_sensitive
    ));

    if query.instance_ids.is_empty() {
        return Err(AccountsError::MissingArgument("instance_ids"));
    }

    let expr = FilterExpression::parse_opt(query.filter_keyword.as_deref())?;
    let matcher = AccountMatcher::new(&expr, query.case_sensitive)?;
    trace.push(format!("Parsed filter - type: {}, value: {expr}", expr.kind()));

    let merged = fetch_all_instances(source, fetcher, &query.instance_ids, &mut trace);
    if let Some(first) = merged.accounts.first() {
        trace.push(format!(
            "Sample account keys: {:?}",
            first.keys().collect::<Vec<_>>()
        ));
        trace.push(format!("First account: {}", first.as_value()));
    }

    let matched = matcher.apply(&merged.accounts);
    trace.push(format!("After filtering: {} accounts", matched.len()));

    let projection = project(matched.iter().copied());
    trace.push(format!(
        "Extracted {} account IDs and {} account names",
        projection.ids.len(),
        projection.names.len()
    ));

    info!(
        instances = query.instance_ids.len(),
        failed = merged.failed_count(),
        fetched = merged.accounts.len(),
        matched = matched.len(),
        "account lookup finished"
    );

    Ok(AggregateResult {
        instance_ids: query.instance_ids.clone(),
        filter_keyword: query.filter_keyword.clone(),
        case_sensitive: query.case_sensitive,
        results_count: projection.ids.len(),
        values: projection.ids,
        account_names: projection.names,
        fetched_count: merged.accounts.len(),
        matched_count: matched.len(),
        debug_trace: query.debug.then_some(trace),
        matched: matched.into_iter().cloned().collect(),
        instance_outcomes: merged.outcomes,
    })
}

/// Run a lookup and hand the result to `sink`
pub fn run_query(
    query: &AccountQuery,
    source: &dyn AccountSource,
    fetcher: &PageFetcher,
    sink: &mut dyn ResultSink,
) -> anyhow::Result<AggregateResult> {
    let result = get_cloud_accounts(query, source, fetcher)?;
    sink.emit(&result)?;
    Ok(result)
}
