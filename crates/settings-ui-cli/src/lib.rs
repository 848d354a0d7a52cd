//! Library components of the `settings-ui` command line tool.

pub mod commands;
pub mod logging;
