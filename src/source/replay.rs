use super::envelope::{ShapeError, normalize_reply};
use super::{AccountSource, SourceError};
use crate::account::AccountRecord;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read account dump '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse account dump '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Account dump entry for instance '{instance_id}' is malformed: {source}")]
    Shape {
        instance_id: String,
        #[source]
        source: ShapeError,
    },
    #[error("Account dump must be a list of accounts or an object keyed by instance id")]
    Layout,
}

#[derive(Debug, Clone)]
enum Dump {
    /// Same accounts for every instance
    Shared(Vec<AccountRecord>),
    PerInstance(HashMap<String, Vec<AccountRecord>>),
}

/// Account source that pages through a local dump file.
///
/// Pages are served in the flat reply envelope so they go through the same
/// normalization as live replies.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    dump: Dump,
}

impl ReplaySource {
    /// Load a JSON or JSON5 dump.
    ///
    /// The file is either a list of account objects, or an object mapping
    /// instance ids to a list of accounts or to a captured reply envelope.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let path_display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path_display.clone(),
            source,
        })?;

        let value = json5::from_str::<Value>(&raw).map_err(|e| ReplayError::Parse {
            path: path_display,
            message: e.to_string(),
        })?;

        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ReplayError> {
        let dump = match value {
            Value::Array(_) => Dump::Shared(records_from(value, "*")?),
            Value::Object(map) => Dump::PerInstance(
                map.into_iter()
                    .map(|(instance_id, entry)| {
                        let records = records_from(entry, &instance_id)?;
                        Ok((instance_id, records))
                    })
                    .collect::<Result<_, ReplayError>>()?,
            ),
            _ => return Err(ReplayError::Layout),
        };
        Ok(Self { dump })
    }

    fn records_for(&self, instance_id: &str) -> Option<&[AccountRecord]> {
        match &self.dump {
            Dump::Shared(records) => Some(records.as_slice()),
            Dump::PerInstance(map) => map.get(instance_id).map(Vec::as_slice),
        }
    }
}

fn records_from(entry: Value, instance_id: &str) -> Result<Vec<AccountRecord>, ReplayError> {
    let shape_err = |source: ShapeError| ReplayError::Shape {
        instance_id: instance_id.to_string(),
        source,
    };

    match entry {
        Value::Array(items) => items
            .into_iter()
            .map(AccountRecord::from_value)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| shape_err(ShapeError::InvalidData("DATA"))),
        envelope @ Value::Object(_) => normalize_reply(&envelope)
            .map(|body| body.records)
            .map_err(shape_err),
        _ => Err(shape_err(ShapeError::NotAnObject)),
    }
}

impl AccountSource for ReplaySource {
    fn fetch_page(
        &self,
        instance_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Value, SourceError> {
        let records = self
            .records_for(instance_id)
            .ok_or_else(|| SourceError::UnknownInstance(instance_id.to_string()))?;

        let start = offset.min(records.len());
        let end = offset.saturating_add(limit).min(records.len());

        Ok(json!({
            "reply": {
                "DATA": &records[start..end],
                "TOTAL_COUNT": records.len(),
            }
        }))
    }
}
