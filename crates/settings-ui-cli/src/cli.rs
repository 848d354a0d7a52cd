//! CLI argument definitions for the settings UI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "settings-ui",
    version,
    about = "Render and register settings page controls",
    long_about = "Build settings page controls from a JSON control table.\n\n\
                  Renders control markup against a JSON options document, lists the\n\
                  fields a settings page registers, and sanitizes posted values."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON object of control entries keyed by control id.
    #[arg(long = "controls", value_name = "FILE", global = true)]
    pub controls: Option<PathBuf>,

    /// JSON object holding the stored option values.
    #[arg(long = "options", value_name = "FILE", global = true)]
    pub options: Option<PathBuf>,

    /// Store key holding the control values (empty: one key per control).
    #[arg(long = "options-key", value_name = "KEY", default_value = "", global = true)]
    pub options_key: String,

    /// Prefix turning store keys into form field names.
    #[arg(long = "prefix", value_name = "PREFIX", default_value = "", global = true)]
    pub prefix: String,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the markup of controls (all ungrouped controls by default).
    Render(RenderArgs),

    /// List the settings fields the controls register.
    Register(RegisterArgs),

    /// Sanitize posted values and print the result as JSON.
    Sanitize(SanitizeArgs),

    /// List the available control types.
    Controls,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Control ids to render.
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

#[derive(Parser)]
pub struct RegisterArgs {
    /// Option group prefixed to each control's tab to form the page.
    #[arg(long = "group", value_name = "PREFIX")]
    pub group: String,

    /// Print the fields as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SanitizeArgs {
    /// JSON object of posted values keyed by control id.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
