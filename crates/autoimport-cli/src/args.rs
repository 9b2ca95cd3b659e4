use autoimport::InsertionOrder;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the autoimport binary.
#[derive(Parser, Debug)]
#[command(
    name = "autoimport",
    version,
    about = "Add missing import statements for configured free identifiers"
)]
pub struct CliArgs {
    /// Files or directories to rewrite. Reads stdin when omitted.
    pub paths: Vec<PathBuf>,

    /// Path to the config file. Defaults to ./autoimport.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Rewrite files in place.
    #[arg(short = 'w', long, conflicts_with = "check")]
    pub write: bool,

    /// List files that would change and exit with status 1 if any would.
    #[arg(long)]
    pub check: bool,

    /// File name used for `[name]` paths and exclude patterns when reading stdin.
    #[arg(long = "stdin-filename", alias = "stdinFilename")]
    pub stdin_filename: Option<String>,

    /// Where new import statements go. Overrides the config file.
    #[arg(long = "insertion-order", alias = "insertionOrder", value_enum, ignore_case = true)]
    pub insertion_order: Option<InsertionOrderArg>,

    /// Number of worker threads (defaults to the number of CPUs).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InsertionOrderArg {
    Prepend,
    Append,
}

impl From<InsertionOrderArg> for InsertionOrder {
    fn from(value: InsertionOrderArg) -> InsertionOrder {
        match value {
            InsertionOrderArg::Prepend => InsertionOrder::Prepend,
            InsertionOrderArg::Append => InsertionOrder::Append,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
