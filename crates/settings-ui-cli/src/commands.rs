//! Command implementations, independent of argument parsing and output.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::{info_span, warn};

use settings_ui_core::{
    ControlSet, ControlTable, MemoryOptions, RecordingRegistrar, SettingsField, default_registry,
    initialize,
};

/// Where a settings page comes from.
#[derive(Debug, Clone, Default)]
pub struct PageSource {
    pub controls: PathBuf,
    pub options: Option<PathBuf>,
    pub options_key: String,
    pub prefix: String,
}

/// Loads the control table and options document and builds the controls.
pub fn load_page(source: &PageSource) -> Result<ControlSet> {
    let span = info_span!("load_page", controls = %source.controls.display());
    let _guard = span.enter();

    let table = ControlTable::from_value(read_json(&source.controls)?)
        .with_context(|| format!("invalid control table {}", source.controls.display()))?;
    let values = match &source.options {
        Some(path) => match read_json(path)? {
            Value::Object(map) => map,
            _ => bail!("options document {} is not a JSON object", path.display()),
        },
        None => Map::new(),
    };
    let options = Arc::new(MemoryOptions::with_values(source.prefix.clone(), values));

    initialize(&table, options, &source.options_key).context("initialize controls")
}

/// Renders the given controls, or every ungrouped control when `ids` is
/// empty, one control per line.
pub fn render_page(set: &ControlSet, ids: &[String]) -> Result<String> {
    let mut lines = Vec::new();
    if ids.is_empty() {
        for control in set.top_level() {
            lines.push(control.render_to_string(set));
        }
    } else {
        for id in ids {
            match set.render_control(id) {
                Some(markup) => lines.push(markup),
                None => bail!("unknown control '{id}'"),
            }
        }
    }
    Ok(lines.join("\n"))
}

/// Registers every control and returns the recorded fields.
pub fn register_page(set: &ControlSet, option_group: &str) -> Vec<SettingsField> {
    let mut registrar = RecordingRegistrar::new();
    set.register_all(option_group, &mut registrar);
    registrar.into_fields()
}

/// Sanitizes each posted value with its control. Posted fields without a
/// control are dropped.
pub fn sanitize_posted(set: &ControlSet, posted: Map<String, Value>) -> Map<String, Value> {
    let mut sanitized = Map::new();
    for (id, value) in posted {
        match set.sanitize(&id, value) {
            Some(value) => {
                sanitized.insert(id, value);
            }
            None => warn!(field = %id, "dropping posted field without a control"),
        }
    }
    sanitized
}

/// Reads a posted values document.
pub fn load_posted(path: &Path) -> Result<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        _ => bail!("posted values {} are not a JSON object", path.display()),
    }
}

/// Built-in control types as (ui, description) pairs, sorted by ui.
pub fn control_types() -> Vec<(&'static str, &'static str)> {
    let registry = default_registry();
    registry
        .uis()
        .into_iter()
        .filter_map(|ui| registry.get(ui).map(|control_type| (ui, control_type.description())))
        .collect()
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
