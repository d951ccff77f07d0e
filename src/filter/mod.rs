//! Account-name filter expressions
//!
//! A filter is a single string. Without a flag it is a plain substring match;
//! a leading flag selects another strategy.
//!
//! # Syntax
//!
//! ```text
//! SOC                    Name contains "SOC"
//! -r ^AWS-SOC.*          Name matches the regex (search, not full match)
//! -or SOC, PROD, DEV     Name contains ANY of the keywords
//! -and SOC, Production   Name contains ALL of the keywords
//! ```
//!
//! Matching is case-insensitive unless requested otherwise. Flags must be
//! followed by a space; anything else starting with `-` is rejected.

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::FilterParseError;
pub use matcher::{AccountMatcher, apply};
pub use parser::FilterExpression;
