//! sheetmap CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use sheetmap_cli::logging::{LogConfig, LogFormat, init_logging};
use sheetmap_map::TemplateRepository;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, TemplatesCommand};
use crate::commands::{
    run_mapping, run_sheets, run_templates_delete, run_templates_list, run_templates_show,
};
use crate::summary::print_run;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match cli.command {
        Command::Sheets(args) => run_sheets(&args),
        Command::Templates(command) => with_repository(&cli.templates_dir, |repository| {
            match command {
                TemplatesCommand::List => run_templates_list(repository),
                TemplatesCommand::Show { id } => run_templates_show(repository, &id),
                TemplatesCommand::Delete { id } => run_templates_delete(repository, &id),
            }
        }),
        Command::Run(args) => with_repository(&cli.templates_dir, |repository| {
            let preview = args.preview;
            let result = run_mapping(args, repository)?;
            print_run(&result, preview);
            Ok(())
        }),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Open the template store once and hand it to the command.
fn with_repository(
    templates_dir: &Path,
    command: impl FnOnce(&TemplateRepository) -> Result<()>,
) -> Result<()> {
    let repository = TemplateRepository::new(templates_dir)
        .with_context(|| format!("open templates directory {}", templates_dir.display()))?;
    command(&repository)
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
