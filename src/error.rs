use crate::config::ConfigError;
use crate::filter::FilterParseError;
use crate::source::ReplayError;
use thiserror::Error;

/// Failures that abort a whole invocation.
///
/// Per-instance fetch problems are not in here: they are absorbed by the
/// orchestrator and only show up in the diagnostic trace.
#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("Invalid filter: {0}")]
    InvalidFilterSyntax(#[from] FilterParseError),

    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}
