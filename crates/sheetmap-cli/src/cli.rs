//! CLI argument definitions for sheetmap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sheetmap_cli::types::ColumnOverride;
use sheetmap_model::{DEFAULT_BLANK_MARKER, DEFAULT_MANUAL_MARKER};

#[derive(Parser)]
#[command(
    name = "sheetmap",
    version,
    about = "Map source spreadsheet columns onto a target layout",
    long_about = "Map the columns of a source spreadsheet onto the columns of a target layout.\n\n\
                  Each target column is left blank, copied from a source column, or filled\n\
                  with a constant. Mappings can be saved as reusable JSON templates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding saved templates.
    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        env = "SHEETMAP_TEMPLATES_DIR",
        default_value = "templates",
        global = true
    )]
    pub templates_dir: PathBuf,

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
    /// Show the sheets of a workbook with their columns.
    Sheets(SheetsArgs),

    /// Manage saved templates.
    #[command(subcommand)]
    Templates(TemplatesCommand),

    /// Map a source sheet onto a target layout.
    Run(RunArgs),
}

#[derive(Args)]
pub struct SheetsArgs {
    /// Workbook to inspect (xlsx, xlsm, xlsb, xls, ods or csv).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,
}

#[derive(Subcommand)]
pub enum TemplatesCommand {
    /// List saved template identifiers.
    List,

    /// Print the rules stored in a template.
    Show {
        /// Template identifier (with or without `.json`).
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete a saved template.
    Delete {
        /// Template identifier (with or without `.json`).
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Source workbook providing the data rows.
    #[arg(long = "source", value_name = "WORKBOOK")]
    pub source: PathBuf,

    /// Target workbook providing the output column layout.
    #[arg(long = "target", value_name = "WORKBOOK")]
    pub target: PathBuf,

    /// Source sheet (default: first sheet).
    #[arg(long = "source-sheet", value_name = "SHEET")]
    pub source_sheet: Option<String>,

    /// Target sheet (default: first sheet).
    #[arg(long = "target-sheet", value_name = "SHEET")]
    pub target_sheet: Option<String>,

    /// Template to prefill the mapping from.
    #[arg(long = "template", value_name = "ID")]
    pub template: Option<String>,

    /// Only target columns containing this text accept `--set` edits.
    ///
    /// Columns hidden by the filter keep their template rule.
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Rule for one target column: TARGET=blank, TARGET=source:COL or TARGET=manual:VALUE.
    #[arg(long = "set", value_name = "TARGET=RULE")]
    pub set: Vec<ColumnOverride>,

    /// Save the resolved mapping as a template under this name.
    #[arg(long = "save-template", value_name = "NAME")]
    pub save_template: Option<String>,

    /// Write the output table (.xlsx or .csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of output rows to preview.
    #[arg(long = "preview", value_name = "N", default_value_t = 20)]
    pub preview: usize,

    /// Option label meaning "leave blank" in legacy templates.
    #[arg(long = "blank-marker", value_name = "TEXT", default_value = DEFAULT_BLANK_MARKER)]
    pub blank_marker: String,

    /// Option label meaning "manual value" in legacy templates.
    #[arg(long = "manual-marker", value_name = "TEXT", default_value = DEFAULT_MANUAL_MARKER)]
    pub manual_marker: String,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_run(args: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(
            ["sheetmap", "run", "--source", "kaynak.xlsx", "--target", "hedef.xlsx"]
                .iter()
                .chain(args)
                .copied(),
        )
        .unwrap();
        match cli.command {
            Command::Run(args) => args,
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_run_defaults() {
        let args = parse_run(&[]);
        assert_eq!(args.preview, 20);
        assert_eq!(args.blank_marker, DEFAULT_BLANK_MARKER);
        assert_eq!(args.manual_marker, DEFAULT_MANUAL_MARKER);
        assert!(args.set.is_empty());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_run_collects_set_arguments() {
        let args = parse_run(&[
            "--set",
            "Musteri=source:Ad",
            "--set",
            "Ulke=manual:TR",
            "--preview",
            "3",
        ]);
        assert_eq!(args.preview, 3);
        assert_eq!(args.set.len(), 2);
        assert_eq!(args.set[1].to_string(), "Ulke=manual:TR");
    }
}
