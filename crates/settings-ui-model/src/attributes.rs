//! Ordered HTML attribute lists.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{ControlError, Result};
use crate::value::to_text;

/// Attribute name/value pairs applied to an element, in insertion order.
///
/// Values are kept raw; escaping happens when the list is turned into markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlAttributes {
    entries: Vec<(String, String)>,
}

impl HtmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an attribute list from a configuration value.
    ///
    /// Null yields an empty list. Anything other than a map is rejected.
    pub fn from_value(argument: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(ControlError::invalid(argument, "a map of attribute values")),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut attributes = Self::new();
        for (name, value) in map {
            attributes.insert(name.clone(), to_text(value));
        }
        attributes
    }

    /// Sets an attribute, keeping the original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends every attribute of `other`, overriding duplicates.
    pub fn extend(&mut self, other: &HtmlAttributes) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HtmlAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order() {
        let value = json!({"data-b": "2", "data-a": 1, "checked": true});
        let attributes = HtmlAttributes::from_value("attributes", &value).unwrap();
        let names: Vec<&str> = attributes.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["data-b", "data-a", "checked"]);
        assert_eq!(attributes.get("data-a"), Some("1"));
        assert_eq!(attributes.get("checked"), Some("1"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut attributes = HtmlAttributes::new().with("id", "a").with("class", "x");
        attributes.insert("id", "b");
        let pairs: Vec<(&str, &str)> = attributes.iter().collect();
        assert_eq!(pairs, vec![("id", "b"), ("class", "x")]);
    }

    #[test]
    fn rejects_non_map() {
        let error = HtmlAttributes::from_value("attributes", &json!(["a"])).unwrap_err();
        assert_eq!(
            error,
            ControlError::invalid("attributes", "a map of attribute values")
        );
    }

    #[test]
    fn serializes_as_map() {
        let attributes = HtmlAttributes::new().with("foo", "bar");
        assert_eq!(serde_json::to_value(&attributes).unwrap(), json!({"foo": "bar"}));
    }
}
