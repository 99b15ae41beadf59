use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::WireValue;

/// Concrete variable values supplied alongside one operation.
///
/// Values are terminal: a binding is copied into the output as-is and is never
/// itself searched for further `$variable` references.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, WireValue>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Bindings::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Option<WireValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Bind any JSON-encodable value, e.g. a generated enum or input struct.
    pub fn insert_serialize<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Option<WireValue>, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.0.insert(name.into(), value))
    }

    /// Read bindings from a JSON object.
    ///
    /// Anything that is not an object yields an empty table.
    #[must_use]
    pub fn from_json(value: WireValue) -> Self {
        match value {
            WireValue::Object(entries) => Self(entries.into_iter().collect()),
            WireValue::Null => Self::default(),
            other => {
                tracing::debug!(kind = json_kind(&other), "bindings are not a JSON object, ignoring");
                Self::default()
            }
        }
    }
}

fn json_kind(value: &WireValue) -> &'static str {
    match value {
        WireValue::Null => "null",
        WireValue::Bool(_) => "boolean",
        WireValue::Number(_) => "number",
        WireValue::String(_) => "string",
        WireValue::Array(_) => "array",
        WireValue::Object(_) => "object",
    }
}

impl Display for Bindings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            write!(f, "{}${name}: {value}", if i == 0 { "" } else { ", " })?;
        }
        f.write_str("}")
    }
}

impl<'de> Deserialize<'de> for Bindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(
            <Option<BTreeMap<String, WireValue>>>::deserialize(deserializer)?.unwrap_or_default(),
        ))
    }
}

impl Deref for Bindings {
    type Target = BTreeMap<String, WireValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Bindings {
    type Item = (String, WireValue);
    type IntoIter = <BTreeMap<String, WireValue> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod bindings_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let bindings = Bindings::from_json(json!({"episode": "JEDI", "first": 3}));
        assert_eq!(bindings.get("episode"), Some(&json!("JEDI")));
        assert_eq!(bindings.get("first"), Some(&json!(3)));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_from_json_non_object_is_empty() {
        assert!(Bindings::from_json(json!([1, 2])).is_empty());
        assert!(Bindings::from_json(json!(null)).is_empty());
        assert!(Bindings::from_json(json!("episode")).is_empty());
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let bindings: Bindings = serde_json::from_str("null").expect("deserialize");
        assert!(bindings.is_empty());
        let bindings: Bindings = serde_json::from_str(r#"{"id": "1000"}"#).expect("deserialize");
        assert_eq!(bindings.get("id"), Some(&json!("1000")));
    }

    #[test]
    fn test_insert_serialize() {
        #[derive(Serialize)]
        struct Stars(u8);
        let mut bindings = Bindings::new();
        bindings.insert_serialize("stars", &Stars(5)).expect("serialize");
        assert_eq!(bindings.get("stars"), Some(&json!(5)));
    }

    #[test]
    fn test_display() {
        let bindings = Bindings::new().with("b", true).with("a", "x");
        assert_eq!(bindings.to_string(), r#"{$a: "x", $b: true}"#);
    }

    #[test]
    fn test_lookup_is_exact() {
        let bindings: Bindings = [("Episode", "JEDI")].into_iter().collect();
        assert!(bindings.get("episode").is_none());
        assert!(bindings.get("Episode").is_some());
    }
}
