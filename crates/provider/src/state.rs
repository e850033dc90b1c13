//! Terraform state model
//!
//! The plugin host hands each operation a dynamically-typed attribute map.
//! [`ResourceState`] wraps that map with typed accessors, and the
//! [`ReadFromState`]/[`WriteToState`] traits translate between state and the
//! JSON payloads the control plane speaks.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dynamic attribute value as stored in Terraform state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<DynamicValue>),
    Map(HashMap<String, DynamicValue>),
}

impl DynamicValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DynamicValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }
}

impl Default for DynamicValue {
    fn default() -> Self {
        DynamicValue::Null
    }
}

/// Create a string DynamicValue
pub fn string_value(s: impl Into<String>) -> DynamicValue {
    DynamicValue::String(s.into())
}

/// Create a number DynamicValue from i64
pub fn int_value(n: i64) -> DynamicValue {
    DynamicValue::Number(serde_json::Number::from(n))
}

/// Create a bool DynamicValue
pub fn bool_value(b: bool) -> DynamicValue {
    DynamicValue::Bool(b)
}

/// Create a list-of-strings DynamicValue
pub fn string_list_value<I, S>(items: I) -> DynamicValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DynamicValue::List(items.into_iter().map(string_value).collect())
}

/// Errors raised while translating between state and API payloads
#[derive(Error, Debug)]
pub enum StateError {
    #[error("missing required attribute {0:?}")]
    MissingAttr(&'static str),

    #[error("attribute {attr:?} is not a {expected}")]
    WrongType {
        attr: &'static str,
        expected: &'static str,
    },

    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

/// Per-resource attribute store, keyed by schema attribute name.
///
/// The resource ID lives under the `id` attribute; a state without an ID is
/// a resource Terraform considers absent.
#[derive(Debug, Clone, Default)]
pub struct ResourceState {
    attrs: HashMap<String, DynamicValue>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from attribute pairs, mostly for tests and import.
    pub fn from_attrs<I, K>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, DynamicValue)>,
        K: Into<String>,
    {
        Self {
            attrs: attrs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.get_string("id")
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.set("id", string_value(id));
    }

    /// Drop the resource ID, marking the resource as gone from state.
    pub fn clear_id(&mut self) {
        self.attrs.remove("id");
    }

    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        match self.attrs.get(key) {
            Some(DynamicValue::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: DynamicValue) {
        self.attrs.insert(key.into(), value);
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(DynamicValue::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(DynamicValue::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(DynamicValue::as_bool)
    }

    pub fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        let list = self.get(key)?.as_list()?;
        Some(
            list.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }

    pub fn require_string(&self, key: &'static str) -> Result<&str, StateError> {
        match self.attrs.get(key) {
            Some(DynamicValue::String(s)) => Ok(s),
            Some(DynamicValue::Null) | None => Err(StateError::MissingAttr(key)),
            Some(_) => Err(StateError::WrongType {
                attr: key,
                expected: "string",
            }),
        }
    }

    pub fn require_i64(&self, key: &'static str) -> Result<i64, StateError> {
        match self.attrs.get(key) {
            Some(DynamicValue::Number(n)) => n.as_i64().ok_or(StateError::WrongType {
                attr: key,
                expected: "integer",
            }),
            Some(DynamicValue::Null) | None => Err(StateError::MissingAttr(key)),
            Some(_) => Err(StateError::WrongType {
                attr: key,
                expected: "integer",
            }),
        }
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, string_value(value));
    }

    pub fn set_i64(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, int_value(value));
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, bool_value(value));
    }

    pub fn set_string_list<I, S>(&mut self, key: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(key, string_list_value(items));
    }
}

/// Build an API request payload from Terraform state.
///
/// One implementation per resource kind; failures surface as diagnostics
/// instead of panicking on a bad attribute type.
pub trait ReadFromState: Serialize + Sized {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError>;
}

/// Write an API response back into Terraform state.
pub trait WriteToState: DeserializeOwned {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip_and_clear() {
        let mut state = ResourceState::new();
        assert_eq!(state.id(), None);

        state.set_id("abc");
        assert_eq!(state.id(), Some("abc"));

        state.clear_id();
        assert_eq!(state.id(), None);
    }

    #[test]
    fn null_reads_as_absent() {
        let state = ResourceState::from_attrs([("name", DynamicValue::Null)]);
        assert_eq!(state.get_string("name"), None);
        assert!(state.require_string("name").is_err());
    }

    #[test]
    fn typed_getters() {
        let mut state = ResourceState::new();
        state.set_string("name", "orders");
        state.set_i64("port", 5432);
        state.set_bool("enabled", true);
        state.set_string_list("labels", ["pii", "prod"]);

        assert_eq!(state.get_string("name"), Some("orders"));
        assert_eq!(state.get_i64("port"), Some(5432));
        assert_eq!(state.get_bool("enabled"), Some(true));
        assert_eq!(
            state.get_string_list("labels"),
            Some(vec!["pii".to_string(), "prod".to_string()])
        );
    }

    #[test]
    fn require_string_reports_wrong_type() {
        let state = ResourceState::from_attrs([("port", int_value(5432))]);
        match state.require_string("port") {
            Err(StateError::WrongType { attr, expected }) => {
                assert_eq!(attr, "port");
                assert_eq!(expected, "string");
            }
            other => panic!("expected WrongType, got {:?}", other),
        }
    }
}
