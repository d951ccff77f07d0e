use crate::account::AccountRecord;
use serde_json::Value;
use thiserror::Error;

const RESPONSE_KEY: &str = "response";
const REPLY_KEY: &str = "reply";
const DATA_KEY: &str = "DATA";
const TOTAL_COUNT_KEY: &str = "TOTAL_COUNT";

/// A reply that does not look like a `get_accounts` answer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("reply has neither 'reply' nor 'response.reply'")]
    MissingReply,

    #[error("'{0}' is not a list of account objects")]
    InvalidData(&'static str),
}

/// Records and reported total extracted from one page reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBody {
    pub records: Vec<AccountRecord>,
    pub reported_total: Option<u64>,
}

/// Normalize a raw page reply.
///
/// The API answers either `{"reply": {...}}` or, through some proxies,
/// `{"response": {"reply": {...}}}`. Both are accepted here and nowhere else.
pub fn normalize_reply(raw: &Value) -> Result<PageBody, ShapeError> {
    let root = raw.as_object().ok_or(ShapeError::NotAnObject)?;

    let reply = match root.get(RESPONSE_KEY) {
        Some(response) => response.get(REPLY_KEY),
        None => root.get(REPLY_KEY),
    }
    .and_then(Value::as_object)
    .ok_or(ShapeError::MissingReply)?;

    let records = match reply.get(DATA_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| AccountRecord::from_value(item.clone()))
            .collect::<Option<Vec<_>>>()
            .ok_or(ShapeError::InvalidData(DATA_KEY))?,
        Some(_) => return Err(ShapeError::InvalidData(DATA_KEY)),
    };

    let reported_total = reply.get(TOTAL_COUNT_KEY).and_then(parse_total);

    Ok(PageBody {
        records,
        reported_total,
    })
}

fn parse_total(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
