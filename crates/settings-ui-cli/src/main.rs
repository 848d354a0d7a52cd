//! Settings UI command line tool.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use settings_ui_cli::commands::{
    PageSource, control_types, load_page, load_posted, register_page, render_page,
    sanitize_posted,
};
use settings_ui_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_control_types, print_fields};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Render(args) => {
            let set = load_page(&page_source(cli)?)?;
            println!("{}", render_page(&set, &args.ids)?);
        }
        Command::Register(args) => {
            let set = load_page(&page_source(cli)?)?;
            let fields = register_page(&set, &args.group);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                print_fields(&fields);
            }
        }
        Command::Sanitize(args) => {
            let set = load_page(&page_source(cli)?)?;
            let posted = load_posted(&args.input)?;
            let sanitized = sanitize_posted(&set, posted);
            println!("{}", serde_json::to_string_pretty(&sanitized)?);
        }
        Command::Controls => print_control_types(&control_types()),
    }
    Ok(())
}

fn page_source(cli: &Cli) -> Result<PageSource> {
    let controls = cli
        .controls
        .clone()
        .context("--controls <FILE> is required for this command")?;
    Ok(PageSource {
        controls,
        options: cli.options.clone(),
        options_key: cli.options_key.clone(),
        prefix: cli.prefix.clone(),
    })
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
