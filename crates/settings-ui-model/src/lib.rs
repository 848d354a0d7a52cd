//! Data model for settings page controls.
//!
//! This crate holds the pieces shared by every control type:
//!
//! - [`ControlArgs`] and [`prepare_args`]: keyword arguments and their
//!   normalization
//! - [`HtmlAttributes`]: ordered attribute lists for generated elements
//! - [`value`]: helpers for loosely-typed stored values
//! - [`ControlError`]: the construction error type

pub mod args;
pub mod attributes;
pub mod error;
pub mod value;

pub use args::{BASELINE_REQUIRED, ControlArgs, SanitizeCallback, prepare_args};
pub use attributes::HtmlAttributes;
pub use error::{ControlError, Result};
