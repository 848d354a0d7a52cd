//! Control type trait and registry.
//!
//! Every control type implements [`ControlType`] and is registered in a
//! [`ControlRegistry`] under its `ui` identifier. The factory resolves the
//! `ui` field of each configuration entry through a registry, so new types
//! can be added without touching the factory.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use settings_ui_model::{ControlArgs, Result};

use crate::control::Control;
use crate::controls::{
    CheckboxInput, DisplayText, HiddenInput, Input, NumberInput, Select, SubmitInput, Textarea,
    TextInput,
};
use crate::options::Options;

/// A constructor for one kind of control.
pub trait ControlType: Send + Sync {
    /// The identifier used in the `ui` field of configuration entries.
    fn ui(&self) -> &'static str;

    /// Human-readable description of the control type.
    fn description(&self) -> &'static str {
        "Control"
    }

    /// Builds a control from raw configuration arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::MissingArgument`](settings_ui_model::ControlError::MissingArgument)
    /// when a required argument is absent and
    /// [`ControlError::InvalidArgument`](settings_ui_model::ControlError::InvalidArgument)
    /// when one has the wrong shape.
    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: ControlArgs,
    ) -> Result<Control>;
}

/// Control types by `ui` identifier.
///
/// The default registry is cached using [`OnceLock`].
#[derive(Default)]
pub struct ControlRegistry {
    types: HashMap<&'static str, Box<dyn ControlType>>,
}

impl ControlRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a control type, replacing any type with the same `ui`.
    pub fn register(&mut self, control_type: Box<dyn ControlType>) {
        self.types.insert(control_type.ui(), control_type);
    }

    pub fn get(&self, ui: &str) -> Option<&dyn ControlType> {
        self.types.get(ui).map(Box::as_ref)
    }

    pub fn contains(&self, ui: &str) -> bool {
        self.types.contains_key(ui)
    }

    /// Registered identifiers, sorted.
    pub fn uis(&self) -> Vec<&'static str> {
        let mut uis: Vec<_> = self.types.keys().copied().collect();
        uis.sort_unstable();
        uis
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

static DEFAULT_REGISTRY: OnceLock<ControlRegistry> = OnceLock::new();

/// Returns the registry of built-in control types.
///
/// The registry is built on first access.
pub fn default_registry() -> &'static ControlRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

/// Builds a registry holding every built-in control type.
pub fn build_default_registry() -> ControlRegistry {
    let mut registry = ControlRegistry::new();
    registry.register(Box::new(Input));
    registry.register(Box::new(TextInput));
    registry.register(Box::new(NumberInput));
    registry.register(Box::new(CheckboxInput));
    registry.register(Box::new(HiddenInput));
    registry.register(Box::new(SubmitInput));
    registry.register(Box::new(Select));
    registry.register(Box::new(Textarea));
    registry.register(Box::new(DisplayText));
    registry
}
