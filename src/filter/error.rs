use thiserror::Error;

/// Errors that can occur when parsing or compiling filter expressions
#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error("Unknown filter flag: {0}. Use -r, -or, or -and")]
    UnknownFlag(String),

    #[error("Filter flag -r requires a pattern")]
    MissingPattern,

    #[error("Filter flag {0} requires at least one keyword")]
    MissingKeywords(&'static str),

    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}
