//! Settings page controls.
//!
//! A settings page is described by a [`ControlTable`]: one entry per form
//! field, naming its control type in `ui` and carrying its configuration.
//! [`initialize`] turns the table into a [`ControlSet`], which can then
//! register each control with the host ([`SettingsRegistrar`]), render it
//! ([`ControlSet::render_control`]) and sanitize posted values
//! ([`ControlSet::sanitize`]). Current values come from an [`Options`]
//! store.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use settings_ui_core::{ControlTable, MemoryOptions, initialize};
//!
//! let table = ControlTable::from_value(json!({
//!     "greeting": {"ui": "text_input", "tab_id": "general", "default": ""},
//! }))?;
//! let options = Arc::new(MemoryOptions::new("my_plugin_"));
//! options.set("config", json!({"greeting": "Hello"}));
//!
//! let controls = initialize(&table, options, "config")?;
//! assert_eq!(
//!     controls.render_control("greeting").as_deref(),
//!     Some(concat!(
//!         r#"<div><input type="text" id="my_plugin_config[greeting]" "#,
//!         r#"name="my_plugin_config[greeting]" value="Hello"/></div>"#
//!     ))
//! );
//! # Ok::<(), settings_ui_model::ControlError>(())
//! ```

pub mod control;
pub mod controls;
pub mod factory;
pub mod options;
mod partial;
pub mod registrar;
pub mod registry;
pub mod sanitize;
pub mod set;

pub use control::{Control, Element, LABEL_PLACEHOLDER};
pub use factory::{ControlTable, initialize, initialize_with_registry};
pub use options::{MemoryOptions, Options};
pub use registrar::{RecordingRegistrar, SettingsField, SettingsRegistrar};
pub use registry::{ControlRegistry, ControlType, default_registry};
pub use set::ControlSet;
