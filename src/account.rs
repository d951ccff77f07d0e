use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

pub const ACCOUNT_ID_FIELD: &str = "cloud_account_id";
pub const ACCOUNT_NAME_FIELD: &str = "account_name";

/// One account row as returned by the onboarding API.
///
/// All fields are kept verbatim; only `cloud_account_id` and `account_name`
/// are interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRecord {
    fields: Map<String, Value>,
}

impl AccountRecord {
    /// Build a record from a JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn cloud_account_id(&self) -> Option<Cow<'_, str>> {
        self.text_field(ACCOUNT_ID_FIELD)
    }

    pub fn account_name(&self) -> Option<Cow<'_, str>> {
        self.text_field(ACCOUNT_NAME_FIELD)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Textual value of a scalar field. Null, empty and structured values
    /// count as absent.
    fn text_field(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(key)? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AccountRecord {
        AccountRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_string_fields() {
        let acc = record(json!({"cloud_account_id": "123", "account_name": "SOC-east", "provider": "AWS"}));
        assert_eq!(acc.cloud_account_id().as_deref(), Some("123"));
        assert_eq!(acc.account_name().as_deref(), Some("SOC-east"));
        assert_eq!(acc.keys().collect::<Vec<_>>().len(), 3);
    }

    #[test]
    fn test_numeric_id_is_rendered() {
        let acc = record(json!({"cloud_account_id": 123456789012u64}));
        assert_eq!(acc.cloud_account_id().as_deref(), Some("123456789012"));
    }

    #[test]
    fn test_empty_and_null_are_absent() {
        let acc = record(json!({"cloud_account_id": "", "account_name": null}));
        assert!(acc.cloud_account_id().is_none());
        assert!(acc.account_name().is_none());
        assert!(AccountRecord::default().account_name().is_none());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(AccountRecord::from_value(json!("nope")).is_none());
    }
}
