//! Options store contract.
//!
//! Controls read their current values from a key/value settings store and
//! ask it for the physical form-field name of a logical key. The store is
//! owned by the host application; [`MemoryOptions`] is an in-process
//! implementation for tests and tooling.

use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};

/// A key/value settings store.
pub trait Options: Send + Sync {
    /// Returns the stored value at `key`, or null when nothing is stored.
    fn get(&self, key: &str) -> Value;

    /// Maps a logical key to its form-field name.
    fn get_name(&self, key: &str) -> String;
}

/// An in-memory options store whose field names are `prefix + key`.
#[derive(Debug, Default)]
pub struct MemoryOptions {
    prefix: String,
    values: RwLock<Map<String, Value>>,
}

impl MemoryOptions {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            values: RwLock::new(Map::new()),
        }
    }

    pub fn with_values(prefix: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            prefix: prefix.into(),
            values: RwLock::new(values),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value);
    }

    pub fn delete(&self, key: &str) -> Option<Value> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl Options for MemoryOptions {
    fn get(&self, key: &str) -> Value {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn get_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}
