use super::pager::PageFetcher;
use crate::account::AccountRecord;
use crate::source::AccountSource;
use crate::trace::DiagnosticTrace;
use tracing::{info, warn};

/// How fetching went for a single instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceOutcome {
    Fetched { instance_id: String, count: usize },
    Failed { instance_id: String, error: String },
}

impl InstanceOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Accounts merged across instances plus per-instance outcomes
#[derive(Debug, Clone, Default)]
pub struct MergedAccounts {
    pub accounts: Vec<AccountRecord>,
    pub outcomes: Vec<InstanceOutcome>,
}

impl MergedAccounts {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

/// Fetch all instances in order.
///
/// A failing instance contributes no accounts and does not stop the others.
pub fn fetch_all_instances(
    source: &dyn AccountSource,
    fetcher: &PageFetcher,
    instance_ids: &[String],
    trace: &mut DiagnosticTrace,
) -> MergedAccounts {
    let mut merged = MergedAccounts::default();

    for instance_id in instance_ids {
        trace.push(format!("--- Fetching from instance: {instance_id} ---"));

        match fetcher.fetch_all(source, instance_id, trace) {
            Ok(accounts) => {
                info!(instance_id = %instance_id, count = accounts.len(), "fetched accounts");
                trace.push(format!(
                    "Instance {instance_id}: fetched {} accounts",
                    accounts.len()
                ));
                merged.outcomes.push(InstanceOutcome::Fetched {
                    instance_id: instance_id.clone(),
                    count: accounts.len(),
                });
                merged.accounts.extend(accounts);
            }
            Err(e) => {
                warn!(instance_id = %instance_id, error = %e, "instance fetch failed");
                trace.push(format!("Instance {instance_id}: ERROR - {e}"));
                merged.outcomes.push(InstanceOutcome::Failed {
                    instance_id: instance_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    trace.push(format!(
        "Total accounts from all instances: {}",
        merged.accounts.len()
    ));
    merged
}
