//! Settings registration contract.

use serde::Serialize;
use serde_json::{Map, Value};

/// One field registered with the host settings mechanism.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsField {
    /// Fully qualified form field name of the control.
    pub id: String,
    /// Short label shown next to the field.
    pub title: String,
    /// Key of the control in its [`ControlSet`](crate::ControlSet); the host
    /// renders the field by passing it to
    /// [`ControlSet::render_control`](crate::ControlSet::render_control).
    pub render_callback: String,
    pub page: String,
    pub section: String,
    /// Opaque arguments forwarded verbatim.
    pub args: Map<String, Value>,
}

/// Receives field registrations, mirroring the host's "add settings field" call.
pub trait SettingsRegistrar {
    fn add_settings_field(&mut self, field: SettingsField);
}

/// A registrar that records every field, in registration order.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    fields: Vec<SettingsField>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[SettingsField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<SettingsField> {
        self.fields
    }
}

impl SettingsRegistrar for RecordingRegistrar {
    fn add_settings_field(&mut self, field: SettingsField) {
        self.fields.push(field);
    }
}
