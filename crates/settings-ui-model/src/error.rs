use thiserror::Error;

/// Errors raised while building controls from a configuration table.
///
/// Every variant signals a misconfigured table entry. They surface at
/// settings-page initialization and are not meant to be recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// A required configuration key is absent (or null).
    #[error("missing argument '{argument}'")]
    MissingArgument { argument: String },

    /// A configuration key is present but has the wrong shape.
    #[error("invalid argument '{argument}': expected {expected}")]
    InvalidArgument {
        argument: String,
        expected: &'static str,
    },

    /// The `ui` field names a control type that is not registered.
    #[error("control '{id}' uses unknown control type '{ui}'")]
    UnknownControlType { id: String, ui: String },

    /// The `grouped_with` field names a control that is not in the table.
    #[error("control '{id}' is grouped with unknown control '{group}'")]
    UnknownGroup { id: String, group: String },
}

impl ControlError {
    pub fn missing(argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
        }
    }

    pub fn invalid(argument: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;
