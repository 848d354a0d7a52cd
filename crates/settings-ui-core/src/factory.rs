//! Builds a [`ControlSet`] from a configuration table.
//!
//! Initialization runs in two passes. The first builds every control,
//! failing on the first malformed entry. The second links each control
//! naming a `grouped_with` parent to that parent, so an entry may refer to
//! a parent declared later in the table.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info_span};

use settings_ui_model::{ControlArgs, ControlError, Result};

use crate::options::Options;
use crate::registry::{ControlRegistry, default_registry};
use crate::set::ControlSet;

/// Names the control type of an entry.
pub const UI: &str = "ui";
/// Names the parent an entry is grouped with.
pub const GROUPED_WITH: &str = "grouped_with";

/// Control configuration entries keyed by control id, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlTable {
    entries: Vec<(String, ControlArgs)>,
}

impl ControlTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a table from a JSON object of entry objects.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(ControlError::invalid("controls", "a map of control entries")),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        let mut table = Self::new();
        for (id, entry) in map {
            let args = ControlArgs::from_value(&id, entry)?;
            table.push(id, args);
        }
        Ok(table)
    }

    /// Appends an entry, replacing any entry with the same id in place.
    pub fn push(&mut self, id: impl Into<String>, args: ControlArgs) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = args,
            None => self.entries.push((id, args)),
        }
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, args: ControlArgs) -> Self {
        self.push(id, args);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControlArgs)> {
        self.entries.iter().map(|(id, args)| (id.as_str(), args))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds all controls of `table` using the built-in control types.
///
/// # Errors
///
/// Fails on the first entry without a `ui` field, with an unknown `ui`,
/// with invalid or missing arguments, or grouped with an id not in the
/// table. No controls are returned on failure.
pub fn initialize(
    table: &ControlTable,
    options: Arc<dyn Options>,
    options_key: &str,
) -> Result<ControlSet> {
    initialize_with_registry(default_registry(), table, options, options_key)
}

/// Builds all controls of `table`, resolving `ui` through `registry`.
pub fn initialize_with_registry(
    registry: &ControlRegistry,
    table: &ControlTable,
    options: Arc<dyn Options>,
    options_key: &str,
) -> Result<ControlSet> {
    let span = info_span!("initialize_controls", controls = table.len(), options_key);
    let _guard = span.enter();

    let mut set = ControlSet::new();
    let mut groups = Vec::new();

    for (id, args) in table.iter() {
        let ui = args.text(UI).ok_or_else(|| ControlError::missing(UI))?;
        let control_type = registry
            .get(&ui)
            .ok_or_else(|| ControlError::UnknownControlType {
                id: id.to_string(),
                ui: ui.clone(),
            })?;
        let control = control_type.create(Arc::clone(&options), options_key, id, args.clone())?;
        debug!(control = id, ui = %ui, "created control");

        if let Some(parent) = args.text(GROUPED_WITH).filter(|parent| !parent.is_empty()) {
            groups.push((parent, id));
        }
        set.insert(control);
    }

    for (parent, id) in groups {
        if !set.contains(&parent) {
            return Err(ControlError::UnknownGroup {
                id: id.to_string(),
                group: parent,
            });
        }
        set.group(&parent, id);
    }

    debug!(controls = set.len(), "initialized controls");
    Ok(set)
}
