mod envelope;
mod http;
mod replay;

pub use envelope::{PageBody, ShapeError, normalize_reply};
pub use http::{GET_ACCOUNTS_URI, HttpSource, HttpSourceConfig};
pub use replay::{ReplayError, ReplaySource};

use serde_json::Value;
use thiserror::Error;

/// Failure of one page request against the account source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to get accounts for instance {instance_id}: {message}")]
    Unavailable {
        instance_id: String,
        message: String,
    },

    #[error("Failed to get accounts for instance {instance_id}: HTTP status {status}")]
    Status { instance_id: String, status: u16 },

    #[error("Instance {0} is not present in the account dump")]
    UnknownInstance(String),
}

/// Outbound port: one paginated `get_accounts` call.
///
/// Implementations return the raw reply; envelope handling is done by the
/// caller through [`normalize_reply`].
pub trait AccountSource {
    fn fetch_page(&self, instance_id: &str, offset: usize, limit: usize)
    -> Result<Value, SourceError>;
}

/// Request body for one `get_accounts` page
pub fn page_request(instance_id: &str, offset: usize, limit: usize) -> Value {
    serde_json::json!({
        "request_data": {
            "instance_id": instance_id,
            "filter_data": {
                "paging": {
                    "from": offset,
                    "to": offset + limit,
                }
            }
        }
    })
}
