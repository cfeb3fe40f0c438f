use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "peel",
    about = "List and extract gzip and tar archives.",
    version
)]
pub struct Cli {
    /// Show debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(visible_aliases = ["l", "ls"], about = "List entries in an archive")]
    List(ListArgs),

    #[command(visible_alias = "x", about = "Extract entries from an archive")]
    Extract(ExtractArgs),
}

/// Container format of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Infer from the file name
    Auto,
    /// Plain tar archive
    Tar,
    /// Single-member gzip stream
    Gzip,
    /// Gzip-compressed tar archive
    Tgz,
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Path to the .tar, .gz or .tgz archive
    pub archive: PathBuf,

    /// Archive format
    #[arg(short = 'F', long, value_enum, default_value_t = Format::Auto)]
    pub format: Format,

    /// Output in JSON format
    #[arg(short = 'j', long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// Path to the .tar, .gz or .tgz archive
    pub archive: PathBuf,

    /// Archive format
    #[arg(short = 'F', long, value_enum, default_value_t = Format::Auto)]
    pub format: Format,

    /// Output directory (defaults to current directory)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
